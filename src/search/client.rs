// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the remote business-search API.
//!
//! Wraps `reqwest` with bearer-token authentication, query assembly for
//! the two search variants (coordinate pair vs. free-text place), and
//! typed response deserialization. Server-side errors (HTTP status 400
//! and above) resolve to an empty page rather than an error, so callers
//! cannot distinguish them from genuinely empty results; only transport
//! and decode failures take the error path.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::domain::SearchLocation;
use crate::search::types::{BusinessRecord, SearchResponse};

/// Search term pinned for coordinate-based queries.
///
/// The free-text keyword only applies to the place variant; a position
/// query always asks for the restaurant category.
const COORDINATE_TERM: &str = "restaurant";

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while talking to the search service.
///
/// Payloads are plain strings so the error can ride inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The underlying HTTP client could not be constructed.
    Client(String),
    /// The request never produced an HTTP response.
    Transport(String),
    /// The response body did not match the expected shape.
    Decode(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Client(msg) => write!(f, "Client setup failed: {msg}"),
            SearchError::Transport(msg) => write!(f, "Transport failed: {msg}"),
            SearchError::Decode(msg) => write!(f, "Decode failed: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Client for the business-search REST API.
///
/// Holds the HTTP client, bearer token, and resolved endpoint URL. The
/// base URL always comes from the caller (configuration in production,
/// a mock server in tests).
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl SearchClient {
    /// Creates a new client for the search service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed or `base_url` is not a valid URL.
    pub fn with_base_url(api_key: &str, timeout_secs: u64, base_url: &str) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("IcedBites/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Client(e.to_string()))?;

        // Normalise: ensure the base URL ends with exactly one slash so the
        // endpoint join appends to the path instead of replacing its last
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("businesses/search"))
            .map_err(|e| SearchError::Client(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Fetches one page of businesses.
    ///
    /// With a [`SearchLocation::Position`] the query pins the term to the
    /// restaurant category and sends the coordinates; with a
    /// [`SearchLocation::Place`] it sends `keyword` as the term and the
    /// place name. `offset` and `limit` page through the result set.
    ///
    /// Suspicious parameters (empty keyword or place, zero limit) are
    /// logged and the request is still attempted; the service answers
    /// them with an error page, which resolves to an empty page here.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Transport`] if the request never reaches the
    ///   service or the connection drops.
    /// - [`SearchError::Decode`] if a successful response does not match
    ///   the expected JSON shape.
    pub async fn fetch_page(
        &self,
        keyword: &str,
        location: &SearchLocation,
        offset: usize,
        limit: usize,
    ) -> SearchResult<Vec<BusinessRecord>> {
        log_suspicious_input(keyword, location, limit);

        let url = self.build_url(keyword, location, offset, limit);
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            tracing::warn!(status = %status, url = %url, "bad response from search service");
            return Ok(Vec::new());
        }

        let page: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        tracing::debug!(
            count = page.businesses.len(),
            total = page.total,
            offset,
            "fetched result page"
        );
        Ok(page.businesses)
    }

    /// Builds the full request URL with percent-encoded query parameters.
    fn build_url(
        &self,
        keyword: &str,
        location: &SearchLocation,
        offset: usize,
        limit: usize,
    ) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            match location {
                SearchLocation::Position(coords) => {
                    pairs.append_pair("term", COORDINATE_TERM);
                    pairs.append_pair("latitude", &coords.latitude.to_string());
                    pairs.append_pair("longitude", &coords.longitude.to_string());
                }
                SearchLocation::Place(name) => {
                    pairs.append_pair("term", keyword);
                    pairs.append_pair("location", name);
                }
            }
            pairs.append_pair("offset", &offset.to_string());
            pairs.append_pair("limit", &limit.to_string());
        }
        url
    }
}

/// Logs parameter combinations the service is known to reject.
///
/// Mirrors the request path's tolerance: nothing is rejected locally, the
/// service stays the authority on what constitutes a bad query.
fn log_suspicious_input(keyword: &str, location: &SearchLocation, limit: usize) {
    let empty_place = matches!(location, SearchLocation::Place(name) if name.is_empty());
    if keyword.is_empty() && !location.is_position() {
        tracing::warn!("search requested with an empty keyword");
    }
    if empty_place {
        tracing::warn!("search requested with an empty place name");
    }
    if limit == 0 {
        tracing::warn!("search requested with a zero page limit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;

    fn test_client(base_url: &str) -> SearchClient {
        SearchClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_pins_term_for_coordinate_queries() {
        let client = test_client("https://api.example.com/v3");
        let location = SearchLocation::Position(Coordinates::new(32.5, -117.25));
        let url = client.build_url("sushi", &location, 0, 12);
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v3/businesses/search\
             ?term=restaurant&latitude=32.5&longitude=-117.25&offset=0&limit=12"
        );
    }

    #[test]
    fn build_url_sends_keyword_and_place_for_text_queries() {
        let client = test_client("https://api.example.com/v3");
        let location = SearchLocation::place("San Diego");
        let url = client.build_url("restaurant", &location, 24, 12);
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v3/businesses/search\
             ?term=restaurant&location=San+Diego&offset=24&limit=12"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://api.example.com/v3/");
        let location = SearchLocation::place("Berlin");
        let url = client.build_url("ramen", &location, 0, 12);
        assert!(url
            .as_str()
            .starts_with("https://api.example.com/v3/businesses/search?"));
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://api.example.com/v3");
        let location = SearchLocation::place("Coeur d'Alene & Post Falls");
        let url = client.build_url("fish & chips", &location, 0, 12);
        assert!(
            url.as_str().contains("term=fish+%26+chips"),
            "keyword should be percent-encoded: {url}"
        );
        assert!(
            url.as_str().contains("%26+Post+Falls"),
            "place should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SearchClient::with_base_url("k", 30, "not a url");
        assert!(matches!(result, Err(SearchError::Client(_))));
    }

    #[test]
    fn search_error_display() {
        let err = SearchError::Transport("connection reset".to_string());
        assert_eq!(err.to_string(), "Transport failed: connection reset");

        let err = SearchError::Decode("missing field".to_string());
        assert_eq!(err.to_string(), "Decode failed: missing field");
    }
}
