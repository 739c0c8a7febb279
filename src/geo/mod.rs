// SPDX-License-Identifier: MPL-2.0
//! Device-location access.
//!
//! [`provider`] defines the [`LocationProvider`] port together with the
//! HTTP-backed production implementation that approximates the machine's
//! position from its public IP address.

pub mod provider;

pub use provider::{
    consent_identifier, GeoError, GeoResult, HttpLocationProvider, LocationProvider, PositionFuture,
};
