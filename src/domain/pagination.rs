// SPDX-License-Identifier: MPL-2.0
//! Paging value objects.
//!
//! This module provides type-safe wrappers for pagination values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Page Size Bounds
// =============================================================================

/// Page size bounds (1 to 50 records per fetch).
///
/// The upper bound is the remote search service's documented maximum for
/// its `limit` parameter.
pub mod page_size_bounds {
    /// Minimum records per page.
    pub const MIN: usize = 1;
    /// Maximum records per page.
    pub const MAX: usize = 50;
    /// Default records per page.
    pub const DEFAULT: usize = 12;
}

// =============================================================================
// PageSize
// =============================================================================

/// Number of records requested per fetch, guaranteed to be within 1–50.
///
/// This type ensures the `limit` query parameter is always valid,
/// eliminating the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    /// Creates a new page size, clamping the value to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(page_size_bounds::MIN, page_size_bounds::MAX))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(page_size_bounds::DEFAULT)
    }
}

// =============================================================================
// Prefetch Margin Bounds
// =============================================================================

/// Prefetch margin bounds (1 to 20 cards before the end).
pub mod prefetch_bounds {
    /// Minimum margin.
    pub const MIN: usize = 1;
    /// Maximum margin.
    pub const MAX: usize = 20;
    /// Default margin.
    pub const DEFAULT: usize = 4;
}

// =============================================================================
// PrefetchMargin
// =============================================================================

/// How many cards before the end of the list the next page is requested.
///
/// The trigger index saturates at zero, so lists shorter than the margin
/// prefetch from the first card instead of computing a negative index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefetchMargin(usize);

impl PrefetchMargin {
    /// Creates a new margin, clamping the value to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(prefetch_bounds::MIN, prefetch_bounds::MAX))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns the card index at which the next page should be requested
    /// for a list of `len` items.
    #[must_use]
    pub fn trigger_index(self, len: usize) -> usize {
        len.saturating_sub(self.0)
    }
}

impl Default for PrefetchMargin {
    fn default() -> Self {
        Self(prefetch_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // PageSize tests
    // -------------------------------------------------------------------------

    #[test]
    fn page_size_clamps() {
        assert_eq!(PageSize::new(0).value(), page_size_bounds::MIN);
        assert_eq!(PageSize::new(500).value(), page_size_bounds::MAX);
        assert_eq!(PageSize::new(12).value(), 12);
    }

    #[test]
    fn page_size_default() {
        assert_eq!(PageSize::default().value(), page_size_bounds::DEFAULT);
    }

    // -------------------------------------------------------------------------
    // PrefetchMargin tests
    // -------------------------------------------------------------------------

    #[test]
    fn prefetch_margin_clamps() {
        assert_eq!(PrefetchMargin::new(0).value(), prefetch_bounds::MIN);
        assert_eq!(PrefetchMargin::new(100).value(), prefetch_bounds::MAX);
    }

    #[test]
    fn prefetch_margin_default() {
        assert_eq!(PrefetchMargin::default().value(), prefetch_bounds::DEFAULT);
    }

    #[test]
    fn trigger_index_is_margin_before_end() {
        let margin = PrefetchMargin::new(4);
        assert_eq!(margin.trigger_index(20), 16);
        assert_eq!(margin.trigger_index(12), 8);
    }

    #[test]
    fn trigger_index_saturates_for_short_lists() {
        let margin = PrefetchMargin::new(4);
        assert_eq!(margin.trigger_index(3), 0);
        assert_eq!(margin.trigger_index(0), 0);
        assert_eq!(margin.trigger_index(4), 0);
    }
}
