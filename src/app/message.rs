// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::{Coordinates, PermissionStatus};
use crate::error::Error;
use crate::geo::GeoResult;
use crate::search::{BusinessRecord, SearchResult};
use crate::ui::carousel;
use crate::ui::consent;
use crate::ui::search_bar;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    /// Stored location permission read during startup.
    ConsentChecked(PermissionStatus),
    /// Outcome of asking for location permission.
    ConsentAnswered(PermissionStatus),
    Consent(consent::Message),
    SearchBar(search_bar::Message),
    Carousel(carousel::Message),
    /// Result of the one-shot position lookup.
    PositionResolved(GeoResult<Coordinates>),
    /// A page of search results arrived for the given fetch generation.
    PageLoaded {
        generation: u64,
        result: SearchResult<Vec<BusinessRecord>>,
    },
    /// Result from downloading a card photo in the background.
    PhotoFetched {
        url: String,
        result: Result<Vec<u8>, Error>,
    },
    Tick, // Periodic tick for the loading spinner
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `de`, `en-US`).
    pub lang: Option<String>,
    /// Optional data directory override (for state files).
    /// Takes precedence over `ICED_BITES_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_BITES_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
