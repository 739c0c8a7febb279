// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the UI components.
//!
//! The `App` struct wires together localization, configuration, the
//! search client, the location provider, and the carousel state, and
//! translates messages into side effects like network fetches or state
//! persistence. This file intentionally keeps policy decisions (window
//! size, startup sequence, permission flow) close to the main update
//! loop so it is easy to audit user-facing behavior.

pub mod config;
mod message;
pub mod paths;
pub mod persisted_state;
pub mod state;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::domain::PermissionStatus;
use crate::geo::{HttpLocationProvider, LocationProvider};
use crate::i18n::fluent::I18n;
use crate::search::SearchClient;
use crate::ui::carousel;
use crate::ui::photos::{PhotoCache, PhotoCacheConfig};
use crate::ui::theme::ThemeMode;
use config::Config;
use iced::{window, Element, Subscription, Task, Theme};
use state::ViewState;
use std::fmt;
use std::sync::Arc;
use update::UpdateContext;

/// Root Iced application state that bridges UI components, localization,
/// and persisted consent.
pub struct App {
    pub i18n: I18n,
    config: Config,
    theme_mode: ThemeMode,
    /// Search results, permission, and fetch bookkeeping.
    state: ViewState,
    carousel: carousel::State,
    photos: PhotoCache,
    /// Whether the in-app consent prompt is on screen.
    awaiting_consent: bool,
    /// Rotation angle of the loading spinner (in radians).
    spinner_rotation: f32,
    /// `None` until a usable API key is configured.
    search_client: Option<SearchClient>,
    photo_client: reqwest::Client,
    /// `None` when the provider could not be built at startup.
    provider: Option<Arc<dyn LocationProvider>>,
    /// Persisted application state (consent decision).
    app_state: persisted_state::AppState,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("results", &self.state.results.len())
            .field("awaiting_consent", &self.awaiting_consent)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 620;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    iced::application(move || App::new(flags.clone()), App::update, App::view)
        .title(|state: &App| state.title())
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            config: Config::default(),
            theme_mode: ThemeMode::System,
            state: ViewState::new(),
            carousel: carousel::State::new(),
            photos: PhotoCache::new(PhotoCacheConfig::default()),
            awaiting_consent: false,
            spinner_rotation: 0.0,
            search_client: None,
            photo_client: reqwest::Client::new(),
            provider: None,
            app_state: persisted_state::AppState::default(),
        }
    }
}

impl App {
    /// Initializes application state and kicks off the permission check
    /// that starts the location-then-search sequence.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang, &config);

        let mut app = App {
            i18n,
            ..Self::default()
        };

        app.theme_mode = config.general.theme_mode;

        if let Some(key) = config_warning {
            tracing::warn!(message = %app.i18n.tr(&key), "configuration problem");
        }

        // Load application state (stored consent decision)
        let (app_state, state_warning) = persisted_state::AppState::load();
        app.app_state = app_state;
        if let Some(key) = state_warning {
            tracing::warn!(message = %app.i18n.tr(&key), "state problem");
        }

        let api_key = config.api.effective_key();
        app.search_client = if api_key.trim().is_empty() {
            tracing::warn!("no API key configured; search is disabled");
            None
        } else {
            match SearchClient::with_base_url(&api_key, config.api.timeout_secs, &config.api.base_url)
            {
                Ok(client) => Some(client),
                Err(error) => {
                    tracing::error!(error = %error, "failed to build search client");
                    None
                }
            }
        };

        app.provider = match HttpLocationProvider::new(config.location.timeout_ms) {
            Ok(provider) => Some(Arc::new(provider) as Arc<dyn LocationProvider>),
            Err(error) => {
                tracing::error!(error = %error, "failed to build location provider");
                None
            }
        };

        app.config = config;

        let stored = match &app.provider {
            Some(provider) => provider.check_permission(),
            None => PermissionStatus::Other,
        };
        let task = Task::done(Message::ConsentChecked(stored));

        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let events = subscription::create_event_subscription();
        let ticks = subscription::create_tick_subscription(self.state.loading);
        Subscription::batch([events, ticks])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = UpdateContext {
            state: &mut self.state,
            carousel: &mut self.carousel,
            photos: &mut self.photos,
            persisted: &mut self.app_state,
            awaiting_consent: &mut self.awaiting_consent,
            provider: self.provider.as_ref(),
            search_client: self.search_client.as_ref(),
            photo_client: &self.photo_client,
            config: &self.config,
        };

        match message {
            Message::ConsentChecked(status) => update::handle_consent_checked(&mut ctx, status),
            Message::ConsentAnswered(status) => update::handle_consent_answered(&mut ctx, status),
            Message::Consent(message) => update::handle_consent_prompt(&mut ctx, message),
            Message::SearchBar(message) => update::handle_search_bar(&mut ctx, message),
            Message::Carousel(message) => update::handle_carousel(&mut ctx, message),
            Message::PositionResolved(result) => update::handle_position_resolved(&mut ctx, result),
            Message::PageLoaded { generation, result } => {
                update::handle_page_loaded(&mut ctx, generation, result)
            }
            Message::PhotoFetched { url, result } => {
                update::handle_photo_fetched(&mut ctx, &url, result)
            }
            Message::Tick => {
                const ROTATION_SPEED: f32 = std::f32::consts::PI / 20.0;
                self.spinner_rotation =
                    (self.spinner_rotation + ROTATION_SPEED) % (2.0 * std::f32::consts::PI);
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            state: &self.state,
            carousel: &self.carousel,
            photos: &self.photos,
            awaiting_consent: self.awaiting_consent,
            spinner_rotation: self.spinner_rotation,
            theme_mode: self.theme_mode,
        })
    }
}
