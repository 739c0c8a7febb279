// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **API**: Search endpoint and request timeout bounds
//! - **Search**: Page size, fallback place, prefetch margin
//! - **Location**: Position read timeout bounds

use crate::domain::{page_size_bounds, prefetch_bounds};

// ==========================================================================
// API Defaults
// ==========================================================================

/// Default base URL of the business-search API.
pub const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3/";

/// Default timeout for a single search request (in seconds).
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Minimum allowed search request timeout (in seconds).
pub const MIN_API_TIMEOUT_SECS: u64 = 1;

/// Maximum allowed search request timeout (in seconds).
pub const MAX_API_TIMEOUT_SECS: u64 = 120;

// ==========================================================================
// Search Defaults
// ==========================================================================

/// Search term sent with every page request. The free-text input feeds the
/// location parameter instead, so the term stays fixed.
pub const SEARCH_TERM: &str = "restaurant";

/// Place searched when neither a position nor a typed place is available.
pub const DEFAULT_PLACE: &str = "San Diego";

/// Default number of results fetched per page.
pub const DEFAULT_PAGE_SIZE: usize = page_size_bounds::DEFAULT;

/// Minimum configurable page size.
pub const MIN_PAGE_SIZE: usize = page_size_bounds::MIN;

/// Maximum configurable page size.
pub const MAX_PAGE_SIZE: usize = page_size_bounds::MAX;

/// Default distance from the carousel end that triggers the next page load.
pub const DEFAULT_PREFETCH_MARGIN: usize = prefetch_bounds::DEFAULT;

/// Minimum configurable prefetch margin.
pub const MIN_PREFETCH_MARGIN: usize = prefetch_bounds::MIN;

/// Maximum configurable prefetch margin.
pub const MAX_PREFETCH_MARGIN: usize = prefetch_bounds::MAX;

// ==========================================================================
// Location Defaults
// ==========================================================================

/// Default timeout for a one-shot position read (in milliseconds).
pub const DEFAULT_POSITION_TIMEOUT_MS: u64 = 15_000;

/// Minimum allowed position read timeout (in milliseconds).
pub const MIN_POSITION_TIMEOUT_MS: u64 = 1_000;

/// Maximum allowed position read timeout (in milliseconds).
pub const MAX_POSITION_TIMEOUT_MS: u64 = 60_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_API_TIMEOUT_SECS <= DEFAULT_API_TIMEOUT_SECS);
    assert!(DEFAULT_API_TIMEOUT_SECS <= MAX_API_TIMEOUT_SECS);
    assert!(MIN_PAGE_SIZE <= DEFAULT_PAGE_SIZE);
    assert!(DEFAULT_PAGE_SIZE <= MAX_PAGE_SIZE);
    assert!(MIN_PREFETCH_MARGIN <= DEFAULT_PREFETCH_MARGIN);
    assert!(DEFAULT_PREFETCH_MARGIN <= MAX_PREFETCH_MARGIN);
    assert!(MIN_POSITION_TIMEOUT_MS <= DEFAULT_POSITION_TIMEOUT_MS);
    assert!(DEFAULT_POSITION_TIMEOUT_MS <= MAX_POSITION_TIMEOUT_MS);
    assert!(!DEFAULT_PLACE.is_empty());
    assert!(!SEARCH_TERM.is_empty());
};
