// SPDX-License-Identifier: MPL-2.0
//! Location provider port and its HTTP-backed implementation.
//!
//! The port splits device location into three capabilities: reading the
//! stored consent decision, opening a consent request, and a one-shot
//! position read. The shell only ever consumes [`PermissionStatus`] values
//! and the position result, so tests can drive the whole flow with a
//! scripted fake.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use serde::Deserialize;

use crate::app::persisted_state::AppState;
use crate::domain::{Coordinates, PermissionStatus};

/// Position lookup endpoint used when no override is configured.
///
/// Returns a JSON object with `latitude`/`longitude` fields derived from
/// the caller's public IP address.
pub const DEFAULT_ENDPOINT: &str = "https://ipapi.co/json/";

/// How long to allow connection establishment, separate from the full
/// position timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// GeoError
// =============================================================================

/// Errors that can occur while resolving the device position.
///
/// Payloads are plain strings so the error can ride inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoError {
    /// The underlying HTTP client could not be constructed.
    Client(String),
    /// A position was requested without a granted consent decision.
    ConsentUnavailable,
    /// The lookup did not complete within the configured timeout.
    Timeout,
    /// The request never produced a usable HTTP response.
    Transport(String),
    /// The response body did not match the expected shape.
    Decode(String),
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::Client(msg) => write!(f, "Client setup failed: {msg}"),
            GeoError::ConsentUnavailable => write!(f, "Location consent not granted"),
            GeoError::Timeout => write!(f, "Position lookup timed out"),
            GeoError::Transport(msg) => write!(f, "Transport failed: {msg}"),
            GeoError::Decode(msg) => write!(f, "Decode failed: {msg}"),
        }
    }
}

impl std::error::Error for GeoError {}

/// Convenience alias for geolocation results.
pub type GeoResult<T> = std::result::Result<T, GeoError>;

/// Boxed future returned by [`LocationProvider::current_position`].
pub type PositionFuture = Pin<Box<dyn Future<Output = GeoResult<Coordinates>> + Send>>;

// =============================================================================
// Consent identifier
// =============================================================================

/// Permission identifier the consent decision is stored under.
///
/// Each platform family uses its own identifier, mirroring how mobile
/// permission systems scope a grant to a concrete permission name. A stored
/// decision made under a different identifier is treated as absent.
#[must_use]
pub fn consent_identifier() -> &'static str {
    if cfg!(target_os = "macos") {
        "location-when-in-use"
    } else {
        "location-fine"
    }
}

// =============================================================================
// LocationProvider
// =============================================================================

/// Port for location permission handling and position lookup.
///
/// Implementations must be cheap to call from the update loop:
/// [`LocationProvider::check_permission`] and
/// [`LocationProvider::request_permission`] are synchronous reads of the
/// stored decision, while the position read is async and one-shot.
pub trait LocationProvider: Send + Sync {
    /// Returns the stored consent decision for the active platform
    /// identifier. A missing decision reads as
    /// [`PermissionStatus::Denied`], which routes the shell into the
    /// request flow.
    fn check_permission(&self) -> PermissionStatus;

    /// Begins a consent request.
    ///
    /// When a decision is already on record it is returned as-is and no
    /// prompt is shown again. [`PermissionStatus::Unknown`] means the
    /// in-app prompt still has to collect an answer from the user.
    fn request_permission(&self) -> PermissionStatus;

    /// Resolves the device position once.
    ///
    /// The future completes within the provider's configured timeout or
    /// fails with [`GeoError::Timeout`].
    fn current_position(&self) -> PositionFuture;
}

// =============================================================================
// HttpLocationProvider
// =============================================================================

/// Shape of the position lookup response body.
#[derive(Debug, Deserialize)]
struct PositionPayload {
    latitude: f64,
    longitude: f64,
}

/// Production [`LocationProvider`] backed by an IP-geolocation service.
///
/// Consent decisions are read from the persisted application state; the
/// position itself comes from a single HTTP lookup. Use
/// [`HttpLocationProvider::with_base_url`] to point at a mock server and
/// [`HttpLocationProvider::with_data_dir`] to read consent from a custom
/// directory in tests.
#[derive(Debug, Clone)]
pub struct HttpLocationProvider {
    client: reqwest::Client,
    endpoint: String,
    data_dir: Option<PathBuf>,
}

impl HttpLocationProvider {
    /// Creates a provider against the default lookup endpoint.
    ///
    /// `timeout_ms` caps the whole position read, mirroring the timeout a
    /// platform geolocation API would receive.
    pub fn new(timeout_ms: u64) -> GeoResult<Self> {
        Self::with_base_url(timeout_ms, DEFAULT_ENDPOINT)
    }

    /// Creates a provider against a custom lookup endpoint.
    pub fn with_base_url(timeout_ms: u64, endpoint: &str) -> GeoResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .connect_timeout(CONNECT_TIMEOUT.min(Duration::from_millis(timeout_ms)))
            .user_agent(concat!("IcedBites/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeoError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            data_dir: None,
        })
    }

    /// Reads consent decisions from `dir` instead of the standard data
    /// directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = Some(dir);
        self
    }

    fn stored_state(&self) -> AppState {
        let (state, warning) = AppState::load_from(self.data_dir.clone());
        if let Some(key) = warning {
            tracing::warn!(warning = key, "state load produced a warning");
        }
        state
    }
}

impl LocationProvider for HttpLocationProvider {
    fn check_permission(&self) -> PermissionStatus {
        self.stored_state().consent_status(consent_identifier())
    }

    fn request_permission(&self) -> PermissionStatus {
        self.stored_state()
            .stored_decision(consent_identifier())
            .unwrap_or(PermissionStatus::Unknown)
    }

    fn current_position(&self) -> PositionFuture {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let consent = self.check_permission();

        Box::pin(async move {
            if !consent.is_granted() {
                return Err(GeoError::ConsentUnavailable);
            }

            let response = client.get(&endpoint).send().await.map_err(|e| {
                if e.is_timeout() {
                    GeoError::Timeout
                } else {
                    GeoError::Transport(e.to_string())
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(GeoError::Transport(format!(
                    "position service returned {status}"
                )));
            }

            let payload: PositionPayload = response
                .json()
                .await
                .map_err(|e| GeoError::Decode(e.to_string()))?;

            tracing::debug!(
                latitude = payload.latitude,
                longitude = payload.longitude,
                "position resolved"
            );
            Ok(Coordinates::new(payload.latitude, payload.longitude))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_in(dir: &tempfile::TempDir) -> HttpLocationProvider {
        HttpLocationProvider::new(15_000)
            .expect("provider should build")
            .with_data_dir(dir.path().to_path_buf())
    }

    fn store_decision(dir: &tempfile::TempDir, status: PermissionStatus) {
        let mut state = AppState::default();
        state.record_consent(consent_identifier(), status);
        assert!(state.save_to(Some(dir.path().to_path_buf())).is_none());
    }

    #[test]
    fn consent_identifier_is_stable_and_nonempty() {
        assert!(!consent_identifier().is_empty());
        assert_eq!(consent_identifier(), consent_identifier());
    }

    #[test]
    fn check_without_stored_decision_reads_denied() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(provider_in(&dir).check_permission(), PermissionStatus::Denied);
    }

    #[test]
    fn request_without_stored_decision_reads_unknown() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            provider_in(&dir).request_permission(),
            PermissionStatus::Unknown
        );
    }

    #[test]
    fn stored_grant_round_trips_through_both_reads() {
        let dir = tempfile::tempdir().expect("tempdir");
        store_decision(&dir, PermissionStatus::Granted);

        let provider = provider_in(&dir);
        assert_eq!(provider.check_permission(), PermissionStatus::Granted);
        assert_eq!(provider.request_permission(), PermissionStatus::Granted);
    }

    #[test]
    fn stored_denial_is_not_prompted_again() {
        let dir = tempfile::tempdir().expect("tempdir");
        store_decision(&dir, PermissionStatus::Denied);

        // Denied on record means the request resolves immediately instead
        // of surfacing the prompt a second time.
        assert_eq!(
            provider_in(&dir).request_permission(),
            PermissionStatus::Denied
        );
    }

    #[tokio::test]
    async fn position_read_requires_granted_consent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = provider_in(&dir).current_position().await;
        assert_eq!(result, Err(GeoError::ConsentUnavailable));
    }

    #[test]
    fn error_display_is_human_readable() {
        assert_eq!(
            GeoError::Timeout.to_string(),
            "Position lookup timed out"
        );
        assert_eq!(
            GeoError::Transport("boom".to_string()).to_string(),
            "Transport failed: boom"
        );
        assert_eq!(
            GeoError::ConsentUnavailable.to_string(),
            "Location consent not granted"
        );
    }
}
