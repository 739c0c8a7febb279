// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! This module contains the specialized message handlers for consent,
//! position lookup, searching, and the carousel. Each handler mutates
//! state through [`UpdateContext`] and returns the follow-up [`Task`].

use super::{persisted_state::AppState, Message};
use crate::app::config::Config;
use crate::app::state::ViewState;
use crate::domain::{Coordinates, PageSize, PermissionStatus, PrefetchMargin};
use crate::geo::{consent_identifier, GeoResult, LocationProvider};
use crate::search::{BusinessRecord, SearchClient, SearchResult};
use crate::ui::carousel;
use crate::ui::consent;
use crate::ui::photos::{self, PhotoCache};
use crate::ui::search_bar;
use iced::Task;
use std::sync::Arc;

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub state: &'a mut ViewState,
    pub carousel: &'a mut carousel::State,
    pub photos: &'a mut PhotoCache,
    pub persisted: &'a mut AppState,
    pub awaiting_consent: &'a mut bool,
    /// `None` when the provider could not be built; the app then runs
    /// on manual searches only.
    pub provider: Option<&'a Arc<dyn LocationProvider>>,
    pub search_client: Option<&'a SearchClient>,
    pub photo_client: &'a reqwest::Client,
    pub config: &'a Config,
}

/// Handles the stored permission read during startup.
///
/// A stored grant goes straight to the position lookup. A denial is
/// turned into a request, whose outcome decides whether the in-app
/// prompt has to be shown.
pub fn handle_consent_checked(
    ctx: &mut UpdateContext<'_>,
    status: PermissionStatus,
) -> Task<Message> {
    ctx.state.permission = status;
    match status {
        PermissionStatus::Granted => begin_position_lookup(ctx),
        PermissionStatus::Denied => match ctx.provider {
            Some(provider) => {
                let answer = provider.request_permission();
                Task::done(Message::ConsentAnswered(answer))
            }
            None => Task::none(),
        },
        PermissionStatus::Unknown | PermissionStatus::Other => Task::none(),
    }
}

/// Handles the outcome of a permission request.
///
/// `Unknown` means no decision is on record yet, so the consent prompt
/// is shown. A stored denial stands and is not asked about again.
pub fn handle_consent_answered(
    ctx: &mut UpdateContext<'_>,
    status: PermissionStatus,
) -> Task<Message> {
    match status {
        PermissionStatus::Unknown => {
            *ctx.awaiting_consent = true;
            Task::none()
        }
        PermissionStatus::Granted => {
            ctx.state.permission = PermissionStatus::Granted;
            begin_position_lookup(ctx)
        }
        PermissionStatus::Denied | PermissionStatus::Other => {
            ctx.state.permission = status;
            tracing::info!(status = ?status, "position lookup not available");
            Task::none()
        }
    }
}

/// Handles the answer given in the in-app consent prompt.
///
/// The decision is recorded so later launches skip the prompt.
pub fn handle_consent_prompt(
    ctx: &mut UpdateContext<'_>,
    message: consent::Message,
) -> Task<Message> {
    *ctx.awaiting_consent = false;

    let status = match message {
        consent::Message::Accept => PermissionStatus::Granted,
        consent::Message::Decline => PermissionStatus::Denied,
    };
    ctx.state.permission = status;
    ctx.persisted.record_consent(consent_identifier(), status);
    if let Some(key) = ctx.persisted.save() {
        tracing::warn!(key = %key, "failed to persist consent decision");
    }

    match status {
        PermissionStatus::Granted => begin_position_lookup(ctx),
        _ => Task::none(),
    }
}

/// Handles the result of the one-shot position lookup.
///
/// Success clears any previous results and starts a fresh coordinate
/// search; failure only clears the loading state, leaving the user with
/// the search bar.
pub fn handle_position_resolved(
    ctx: &mut UpdateContext<'_>,
    result: GeoResult<Coordinates>,
) -> Task<Message> {
    match result {
        Ok(coordinates) => {
            tracing::debug!(
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                "position resolved"
            );
            ctx.state.set_position(coordinates);
            ctx.carousel.reset();
            load_more(ctx)
        }
        Err(error) => {
            tracing::warn!(error = %error, "error getting location");
            ctx.state.position_failed();
            Task::none()
        }
    }
}

/// Handles search bar input and submission.
pub fn handle_search_bar(
    ctx: &mut UpdateContext<'_>,
    message: search_bar::Message,
) -> Task<Message> {
    match search_bar::update(message, &mut ctx.state.search_text) {
        search_bar::Event::None => Task::none(),
        search_bar::Event::Submitted => {
            ctx.state.reset_results();
            ctx.carousel.reset();
            load_more(ctx)
        }
    }
}

/// Handles carousel movement.
///
/// Every snap refreshes the photo prefetch window; landing on the
/// near-end trigger card additionally requests the next result page.
pub fn handle_carousel(
    ctx: &mut UpdateContext<'_>,
    message: carousel::Message,
) -> Task<Message> {
    match carousel::update(message, ctx.carousel, ctx.state.results.len()) {
        carousel::Event::None => Task::none(),
        carousel::Event::Snapped(index) => {
            let mut tasks = vec![photo_prefetch(ctx, index)];

            let margin = PrefetchMargin::new(ctx.config.search.prefetch_margin);
            if ctx.state.should_prefetch(index, margin) {
                tasks.push(load_more(ctx));
            }

            Task::batch(tasks)
        }
    }
}

/// Handles an arriving result page.
///
/// Pages from an older fetch generation are dropped without touching
/// the current results.
pub fn handle_page_loaded(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    result: SearchResult<Vec<BusinessRecord>>,
) -> Task<Message> {
    match result {
        Ok(page) => {
            if ctx.state.apply_page(generation, page) {
                ctx.carousel.clamp_to(ctx.state.results.len());
                photo_prefetch(ctx, ctx.carousel.active())
            } else {
                tracing::debug!(generation, "dropped stale result page");
                Task::none()
            }
        }
        Err(error) => {
            if ctx.state.fail_fetch(generation) {
                tracing::warn!(error = %error, "search request failed");
            }
            Task::none()
        }
    }
}

/// Handles a finished background photo download.
pub fn handle_photo_fetched(
    ctx: &mut UpdateContext<'_>,
    url: &str,
    result: crate::error::Result<Vec<u8>>,
) -> Task<Message> {
    match result {
        Ok(bytes) => {
            ctx.photos.insert(url, bytes);
        }
        Err(error) => {
            ctx.photos.fetch_failed(url);
            tracing::debug!(url, error = %error, "photo download failed");
        }
    }
    Task::none()
}

/// Requests the next result page for the current search target.
///
/// The page starts where the current results end; the plan's generation
/// lets the arriving page be matched against resets that happened in
/// the meantime.
pub fn load_more(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(client) = ctx.search_client else {
        tracing::warn!("search unavailable: no API key configured");
        return Task::none();
    };

    let plan = ctx.state.begin_fetch(
        PageSize::new(ctx.config.search.page_size),
        &ctx.config.search.default_place,
    );
    let client = client.clone();
    let generation = plan.generation;

    Task::perform(
        async move {
            client
                .fetch_page(plan.term, &plan.location, plan.offset, plan.limit)
                .await
        },
        move |result| Message::PageLoaded { generation, result },
    )
}

/// Starts the one-shot position lookup.
fn begin_position_lookup(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(provider) = ctx.provider else {
        tracing::warn!("location provider unavailable");
        return Task::none();
    };
    ctx.state.begin_position_read();
    Task::perform(provider.current_position(), Message::PositionResolved)
}

/// Queues downloads for photos around the active card.
///
/// Already cached or in-flight URLs are skipped by the cache itself.
fn photo_prefetch(ctx: &mut UpdateContext<'_>, active: usize) -> Task<Message> {
    if !ctx.photos.is_enabled() {
        return Task::none();
    }

    // Touch the active photo so eviction prefers cards further away.
    if let Some(url) = ctx
        .state
        .results
        .get(active)
        .and_then(BusinessRecord::photo_url)
    {
        ctx.photos.get(url);
    }

    let reach = ctx.photos.prefetch_reach();
    let wanted = photos::neighbor_urls(&ctx.state.results, active, reach);
    let downloads: Vec<Task<Message>> = ctx
        .photos
        .urls_to_fetch(&wanted)
        .into_iter()
        .map(|url| {
            let client = ctx.photo_client.clone();
            Task::perform(photos::fetch_photo(client, url), |(url, result)| {
                Message::PhotoFetched { url, result }
            })
        })
        .collect();

    Task::batch(downloads)
}
