// SPDX-License-Identifier: MPL-2.0
//! Application state persistence.
//!
//! This module handles the one piece of state that outlives a session and
//! is not a user preference: the location-consent decision. The decision
//! is bound to the platform permission identifier it was given under, so
//! a binary built for a different platform re-asks instead of silently
//! reusing a foreign grant.
//!
//! # Path Resolution
//!
//! The state file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from()`/`save_to()` with explicit path override
//! 2. Set `ICED_BITES_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use super::paths;
use crate::domain::PermissionStatus;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// State file name within the app data directory.
const STATE_FILE: &str = "state.toml";

/// Decision strings written by [`AppState::record_consent`].
/// Anything else found in the file maps to [`PermissionStatus::Other`].
const DECISION_GRANTED: &str = "granted";
const DECISION_DENIED: &str = "denied";
const DECISION_SUPPRESSED: &str = "suppressed";

/// A consent decision together with the identifier it was granted under.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredConsent {
    /// Platform permission identifier active when the decision was made.
    pub identifier: String,
    /// One of `granted`, `denied`, or `suppressed`.
    pub decision: String,
}

/// Application state that persists across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppState {
    /// Location-consent decision, if the user has answered the prompt.
    #[serde(default)]
    pub location_consent: Option<StoredConsent>,
}

impl AppState {
    /// Loads application state from the default location.
    ///
    /// Returns a tuple of (state, optional warning). If loading fails, the
    /// default state is returned with an i18n warning key explaining what
    /// went wrong; the caller logs it.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads application state from a custom directory.
    ///
    /// With `base_dir` set to `None` the standard path resolution applies
    /// (see [`paths::get_app_data_dir`]).
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(state) => (state, None),
                Err(_) => (
                    Self::default(),
                    Some("warning-state-parse-error".to_string()),
                ),
            },
            Err(_) => (
                Self::default(),
                Some("warning-state-read-error".to_string()),
            ),
        }
    }

    /// Saves application state to the default location.
    ///
    /// Creates the parent directory if it doesn't exist. Returns an i18n
    /// warning key if the save failed.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves application state to a custom directory.
    ///
    /// With `base_dir` set to `None` the standard path resolution applies
    /// (see [`paths::get_app_data_dir`]).
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("warning-state-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("warning-state-dir-error".to_string());
            }
        }

        let Ok(contents) = toml::to_string_pretty(self) else {
            return Some("warning-state-write-error".to_string());
        };

        match fs::write(&path, contents) {
            Ok(()) => None,
            Err(_) => Some("warning-state-write-error".to_string()),
        }
    }

    /// Returns the full path to the state file with optional override.
    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }

    /// Interprets the stored consent for the given permission identifier.
    ///
    /// - no stored decision, or one bound to a different identifier:
    ///   [`PermissionStatus::Denied`] (ask the user)
    /// - `granted` / `denied`: the corresponding status
    /// - any other decision string: [`PermissionStatus::Other`]
    ///   (do not read a position, do not ask again)
    #[must_use]
    pub fn consent_status(&self, identifier: &str) -> PermissionStatus {
        self.stored_decision(identifier)
            .unwrap_or(PermissionStatus::Denied)
    }

    /// Returns the decision stored under the given identifier, if any.
    ///
    /// Unlike [`AppState::consent_status`] this distinguishes "never asked"
    /// (`None`) from an explicit denial, so the caller knows whether a
    /// consent prompt is still owed to the user.
    #[must_use]
    pub fn stored_decision(&self, identifier: &str) -> Option<PermissionStatus> {
        match &self.location_consent {
            Some(consent) if consent.identifier == identifier => {
                Some(match consent.decision.as_str() {
                    DECISION_GRANTED => PermissionStatus::Granted,
                    DECISION_DENIED => PermissionStatus::Denied,
                    _ => PermissionStatus::Other,
                })
            }
            _ => None,
        }
    }

    /// Records a consent decision under the given permission identifier.
    ///
    /// `Unknown` clears the stored decision; the next check asks again.
    pub fn record_consent(&mut self, identifier: &str, status: PermissionStatus) {
        let decision = match status {
            PermissionStatus::Granted => DECISION_GRANTED,
            PermissionStatus::Denied => DECISION_DENIED,
            PermissionStatus::Other => DECISION_SUPPRESSED,
            PermissionStatus::Unknown => {
                self.location_consent = None;
                return;
            }
        };
        self.location_consent = Some(StoredConsent {
            identifier: identifier.to_string(),
            decision: decision.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_state_has_no_consent() {
        let state = AppState::default();
        assert!(state.location_consent.is_none());
        assert_eq!(state.consent_status("location-fine"), PermissionStatus::Denied);
    }

    #[test]
    fn recorded_grant_round_trips() {
        let mut state = AppState::default();
        state.record_consent("location-fine", PermissionStatus::Granted);
        assert_eq!(
            state.consent_status("location-fine"),
            PermissionStatus::Granted
        );
    }

    #[test]
    fn identifier_mismatch_asks_again() {
        let mut state = AppState::default();
        state.record_consent("location-when-in-use", PermissionStatus::Granted);
        assert_eq!(
            state.consent_status("location-fine"),
            PermissionStatus::Denied
        );
    }

    #[test]
    fn unrecognized_decision_maps_to_other() {
        let state = AppState {
            location_consent: Some(StoredConsent {
                identifier: "location-fine".to_string(),
                decision: "while-using".to_string(),
            }),
        };
        assert_eq!(
            state.consent_status("location-fine"),
            PermissionStatus::Other
        );
    }

    #[test]
    fn suppression_survives_round_trip() {
        let mut state = AppState::default();
        state.record_consent("location-fine", PermissionStatus::Other);
        assert_eq!(
            state.consent_status("location-fine"),
            PermissionStatus::Other
        );
    }

    #[test]
    fn recording_unknown_clears_decision() {
        let mut state = AppState::default();
        state.record_consent("location-fine", PermissionStatus::Granted);
        state.record_consent("location-fine", PermissionStatus::Unknown);
        assert!(state.location_consent.is_none());
    }

    #[test]
    fn save_to_and_load_from_custom_directory() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut original = AppState::default();
        original.record_consent("location-fine", PermissionStatus::Granted);

        let save_result = original.save_to(Some(base_dir.clone()));
        assert!(save_result.is_none(), "save should succeed");
        assert!(base_dir.join(STATE_FILE).exists(), "state file should exist");

        let (loaded, warning) = AppState::load_from(Some(base_dir));
        assert!(warning.is_none(), "load should succeed without warning");
        assert_eq!(original, loaded);
    }

    #[test]
    fn load_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("create temp dir");
        let (state, warning) = AppState::load_from(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn load_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        fs::write(base_dir.join(STATE_FILE), "not [valid toml").expect("write file");

        let (state, warning) = AppState::load_from(Some(base_dir));
        assert_eq!(warning.as_deref(), Some("warning-state-parse-error"));
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp_dir = tempdir().expect("create temp dir");
        let nested_dir = temp_dir.path().join("nested").join("deeply");

        let state = AppState::default();
        let result = state.save_to(Some(nested_dir.clone()));
        assert!(result.is_none(), "save should succeed");
        assert!(nested_dir.join(STATE_FILE).exists());
    }
}
