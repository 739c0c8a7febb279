// SPDX-License-Identifier: MPL-2.0
//! Business-search API response types.
//!
//! All types model the JSON structures returned by the remote
//! business-search REST API. The service wraps every result list in a
//! `{"businesses": [...], "total": N}` envelope; [`SearchResponse`]
//! captures that shape. Records are display data only and are never
//! validated or transformed beyond deserialization.

use serde::Deserialize;

/// Top-level envelope for a business search response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub businesses: Vec<BusinessRecord>,
    /// Total number of matches known to the service, not the page length.
    #[serde(default)]
    pub total: u64,
}

/// A single business as returned by the search endpoint.
///
/// Fields beyond the identifier are optional or defaulted because the
/// service omits them for sparsely listed businesses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BusinessRecord {
    pub id: String,
    pub name: String,
    /// Average review rating from 0.0 to 5.0, in half-star steps.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub review_count: u64,
    /// Price tier as a currency-symbol string, e.g. `"$$"`.
    #[serde(default)]
    pub price: Option<String>,
}

impl BusinessRecord {
    /// Returns the photo URL if the record carries a non-empty one.
    ///
    /// The service sends `""` instead of omitting the field for some
    /// records, so emptiness is normalized here rather than at call sites.
    #[must_use]
    pub fn photo_url(&self) -> Option<&str> {
        match self.image_url.as_deref() {
            Some("") | None => None,
            Some(url) => Some(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_record() {
        let json = serde_json::json!({
            "businesses": [{
                "id": "north-italia-san-diego",
                "name": "North Italia",
                "rating": 4.5,
                "image_url": "https://example.com/photo.jpg",
                "review_count": 1276,
                "price": "$$",
                "categories": [{"alias": "italian", "title": "Italian"}]
            }],
            "total": 8228
        });

        let response: SearchResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.total, 8228);
        assert_eq!(response.businesses.len(), 1);

        let record = &response.businesses[0];
        assert_eq!(record.id, "north-italia-san-diego");
        assert_eq!(record.name, "North Italia");
        assert!((record.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(record.review_count, 1276);
        assert_eq!(record.price.as_deref(), Some("$$"));
        assert_eq!(record.photo_url(), Some("https://example.com/photo.jpg"));
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = serde_json::json!({
            "businesses": [{"id": "b1", "name": "Taco Stand"}]
        });

        let response: SearchResponse = serde_json::from_value(json).unwrap();
        let record = &response.businesses[0];
        assert!((record.rating - 0.0).abs() < f64::EPSILON);
        assert_eq!(record.review_count, 0);
        assert_eq!(record.price, None);
        assert_eq!(record.photo_url(), None);
        assert_eq!(response.total, 0);
    }

    #[test]
    fn empty_image_url_is_treated_as_absent() {
        let json = serde_json::json!({
            "businesses": [{"id": "b2", "name": "Pho Corner", "image_url": ""}]
        });

        let response: SearchResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.businesses[0].photo_url(), None);
    }

    #[test]
    fn empty_envelope_deserializes() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.businesses.is_empty());
        assert_eq!(response.total, 0);
    }
}
