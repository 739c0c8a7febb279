// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with ZERO external dependencies.
//!
//! This module contains pure domain types and business rules. It has no
//! dependencies on external crates (except `std`) to ensure testability;
//! wire-facing types with serde derives live next to the clients that
//! produce them.
//!
//! # Modules
//!
//! - [`location`]: Where a search is scoped ([`Coordinates`](location::Coordinates),
//!   [`SearchLocation`](location::SearchLocation))
//! - [`pagination`]: Paging value objects ([`PageSize`](pagination::PageSize),
//!   [`PrefetchMargin`](pagination::PrefetchMargin))
//! - [`permission`]: Location consent states ([`PermissionStatus`](permission::PermissionStatus))

pub mod location;
pub mod pagination;
pub mod permission;

pub use location::{Coordinates, SearchLocation};
pub use pagination::{page_size_bounds, prefetch_bounds, PageSize, PrefetchMargin};
pub use permission::PermissionStatus;
