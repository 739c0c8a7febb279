// SPDX-License-Identifier: MPL-2.0
//! Core view state and the transitions the update loop runs on it.
//!
//! Everything that decides *what* to fetch and *whether* a completion still
//! applies lives here as plain methods, so the whole search flow can be
//! unit-tested without constructing the application shell.
//!
//! # Stale completions
//!
//! Every fetch is stamped with the generation current at dispatch time.
//! Resetting the result list (new search, new position) bumps the
//! generation, and completions carrying an older stamp are dropped in
//! [`ViewState::apply_page`]. This is what keeps a slow first page from
//! leaking into a newer search.

use crate::app::config::SEARCH_TERM;
use crate::domain::{Coordinates, PageSize, PermissionStatus, PrefetchMargin, SearchLocation};
use crate::search::BusinessRecord;

/// Everything a page fetch needs, captured at dispatch time.
///
/// The plan is computed synchronously from [`ViewState`] so tests can
/// assert on it without running the async task it feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    /// Search term, pinned to [`SEARCH_TERM`] for every page.
    pub term: &'static str,
    /// Where to search; the free-text input rides in here as a place.
    pub location: SearchLocation,
    /// Number of results already shown, used directly as the page offset.
    pub offset: usize,
    /// Page size.
    pub limit: usize,
    /// Generation stamp checked again when the page arrives.
    pub generation: u64,
}

/// State backing the single search screen.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Whether the initial page (or a position read) is in flight.
    /// Follow-up pages load silently and never set this.
    pub loading: bool,

    /// Last known consent decision.
    pub permission: PermissionStatus,

    /// Results shown so far, in arrival order.
    pub results: Vec<BusinessRecord>,

    /// Device position, once one has been resolved.
    pub current_location: Option<SearchLocation>,

    /// Current content of the search input.
    pub search_text: String,

    /// Stamp for in-flight fetches; bumped whenever `results` is reset.
    fetch_generation: u64,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation that new fetches are stamped with.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.fetch_generation
    }

    /// Where the next fetch should search.
    ///
    /// Typed text wins over a resolved position, which wins over the
    /// configured fallback place. The raw text is passed through as-is;
    /// the client logs suspicious values instead of rejecting them.
    #[must_use]
    pub fn effective_location(&self, default_place: &str) -> SearchLocation {
        if !self.search_text.is_empty() {
            SearchLocation::Place(self.search_text.clone())
        } else if let Some(location) = &self.current_location {
            location.clone()
        } else {
            SearchLocation::place(default_place)
        }
    }

    /// Captures a [`FetchPlan`] for the next page and flips the loading
    /// flag when the carousel is still empty.
    ///
    /// The offset is always the number of results already held, so pages
    /// stay contiguous no matter what triggered the fetch.
    pub fn begin_fetch(&mut self, page_size: PageSize, default_place: &str) -> FetchPlan {
        if self.results.is_empty() {
            self.loading = true;
        }

        FetchPlan {
            term: SEARCH_TERM,
            location: self.effective_location(default_place),
            offset: self.results.len(),
            limit: page_size.value(),
            generation: self.fetch_generation,
        }
    }

    /// Marks a position read as in flight.
    pub fn begin_position_read(&mut self) {
        self.loading = true;
    }

    /// Stores a resolved position and restarts the result list around it.
    pub fn set_position(&mut self, coordinates: Coordinates) {
        self.current_location = Some(SearchLocation::Position(coordinates));
        self.loading = false;
        self.reset_results();
    }

    /// Clears the loading flag after a failed position read. Results are
    /// left alone; the search box keeps working without a position.
    pub fn position_failed(&mut self) {
        self.loading = false;
    }

    /// Empties the result list and invalidates every in-flight fetch.
    pub fn reset_results(&mut self) {
        self.results.clear();
        self.fetch_generation += 1;
    }

    /// Appends a fetched page if its generation is still current.
    ///
    /// Returns `false` for stale completions, which are dropped without
    /// touching any state.
    pub fn apply_page(&mut self, generation: u64, page: Vec<BusinessRecord>) -> bool {
        if generation != self.fetch_generation {
            return false;
        }
        self.loading = false;
        self.results.extend(page);
        true
    }

    /// Clears the loading flag after a failed fetch of the current
    /// generation. Stale failures are ignored, like stale pages.
    pub fn fail_fetch(&mut self, generation: u64) -> bool {
        if generation != self.fetch_generation {
            return false;
        }
        self.loading = false;
        true
    }

    /// Whether snapping to `index` should pull the next page.
    ///
    /// Fires exactly at the trigger index (which saturates to the list
    /// start for short lists), never on an empty carousel.
    #[must_use]
    pub fn should_prefetch(&self, index: usize, margin: PrefetchMargin) -> bool {
        !self.results.is_empty() && index == margin.trigger_index(self.results.len())
    }
}
