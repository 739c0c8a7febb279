// SPDX-License-Identifier: MPL-2.0
//! Location value types.
//!
//! A search is scoped either by a free-text place name or by a coordinate
//! pair, never both. The fetch path branches on the variant, so the two
//! representations are kept mutually exclusive at the type level.

use std::fmt;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees, positive north.
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a new coordinate pair.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// Where a search is scoped: a named place or a resolved position.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchLocation {
    /// Free-text place name, e.g. `"San Diego"`.
    Place(String),
    /// A resolved coordinate pair from the location provider.
    Position(Coordinates),
}

impl SearchLocation {
    /// Creates a place-name location, trimming surrounding whitespace.
    #[must_use]
    pub fn place(name: impl Into<String>) -> Self {
        Self::Place(name.into().trim().to_string())
    }

    /// Returns `true` if this location is a coordinate pair.
    #[must_use]
    pub fn is_position(&self) -> bool {
        matches!(self, Self::Position(_))
    }

    /// Returns the place name, if this is the free-text variant.
    #[must_use]
    pub fn place_name(&self) -> Option<&str> {
        match self {
            Self::Place(name) => Some(name),
            Self::Position(_) => None,
        }
    }
}

impl fmt::Display for SearchLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Place(name) => write!(f, "{}", name),
            Self::Position(coords) => write!(f, "{}", coords),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_display_uses_fixed_precision() {
        let coords = Coordinates::new(32.715736, -117.161087);
        assert_eq!(format!("{}", coords), "32.71574,-117.16109");
    }

    #[test]
    fn place_constructor_trims_whitespace() {
        let location = SearchLocation::place("  San Diego  ");
        assert_eq!(location.place_name(), Some("San Diego"));
    }

    #[test]
    fn position_variant_has_no_place_name() {
        let location = SearchLocation::Position(Coordinates::new(1.0, 2.0));
        assert!(location.is_position());
        assert_eq!(location.place_name(), None);
    }

    #[test]
    fn place_variant_is_not_position() {
        assert!(!SearchLocation::place("Berlin").is_position());
    }
}
