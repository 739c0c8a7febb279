// SPDX-License-Identifier: MPL-2.0
//! Business-search service access.
//!
//! The [`client::SearchClient`] issues authenticated, paginated queries
//! against the remote search endpoint; [`types`] holds the wire-facing
//! records it deserializes.

pub mod client;
pub mod types;

pub use client::{SearchClient, SearchError, SearchResult};
pub use types::{BusinessRecord, SearchResponse};
