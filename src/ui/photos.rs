// SPDX-License-Identifier: MPL-2.0
//! Photo cache for the restaurant carousel.
//!
//! Card photos come from CDN URLs in the search results. This module keeps
//! downloaded photos in a memory-bounded LRU cache and tracks which URLs
//! are already being fetched, so snapping through the carousel never
//! downloads the same photo twice.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently shown photos are evicted first
//! - **Memory-bounded**: Total cache size limited by a byte limit
//! - **URL-keyed**: Photos indexed by their source URL
//! - **Single-flight**: A pending set dedupes concurrent fetches
//!
//! # Usage
//!
//! ```ignore
//! let mut cache = PhotoCache::with_defaults();
//!
//! // Check if a photo is already cached
//! if let Some(handle) = cache.get(url) {
//!     // Render the cached photo
//! }
//!
//! // Decide what to download for the cards around the active one
//! let urls = cache.urls_to_fetch(&neighbor_urls(&records, active, 2));
//! ```

use crate::error::Result;
use crate::search::BusinessRecord;
use iced::widget::image::Handle;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Default photo cache size in bytes (16 MB).
/// CDN card photos run 100-500 KB, so this holds several carousel pages.
pub const DEFAULT_PHOTO_CACHE_BYTES: usize = 16 * 1024 * 1024;

/// Minimum photo cache size in bytes (4 MB).
pub const MIN_PHOTO_CACHE_BYTES: usize = 4 * 1024 * 1024;

/// Maximum photo cache size in bytes (64 MB).
pub const MAX_PHOTO_CACHE_BYTES: usize = 64 * 1024 * 1024;

/// Default maximum number of photos to cache.
pub const DEFAULT_MAX_PHOTOS: usize = 48;

/// Minimum photos to cache.
pub const MIN_MAX_PHOTOS: usize = 8;

/// Maximum photos to cache.
pub const MAX_MAX_PHOTOS: usize = 128;

/// Default number of cards to fetch photos for in each direction.
pub const DEFAULT_PREFETCH_REACH: usize = 2;

/// Configuration for the photo cache.
#[derive(Debug, Clone, Copy)]
pub struct PhotoCacheConfig {
    /// Maximum cache size in bytes.
    pub max_bytes: usize,

    /// Maximum number of photos to cache.
    pub max_photos: usize,

    /// Number of cards to fetch photos for in each direction.
    pub prefetch_reach: usize,

    /// Whether photo caching is enabled.
    pub enabled: bool,
}

impl Default for PhotoCacheConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_PHOTO_CACHE_BYTES,
            max_photos: DEFAULT_MAX_PHOTOS,
            prefetch_reach: DEFAULT_PREFETCH_REACH,
            enabled: true,
        }
    }
}

impl PhotoCacheConfig {
    /// Creates a new photo cache configuration with specified limits.
    #[must_use]
    pub fn new(max_bytes: usize, max_photos: usize, prefetch_reach: usize) -> Self {
        Self {
            max_bytes: max_bytes.clamp(MIN_PHOTO_CACHE_BYTES, MAX_PHOTO_CACHE_BYTES),
            max_photos: max_photos.clamp(MIN_MAX_PHOTOS, MAX_MAX_PHOTOS),
            prefetch_reach,
            enabled: true,
        }
    }

    /// Creates a disabled photo cache configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Cached photo entry with its memory footprint.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Decodable image handle (reference-counted internally).
    handle: Handle,

    /// Size of the downloaded bytes backing this entry.
    size_bytes: usize,
}

/// Statistics about photo cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoStats {
    /// Number of photos currently in cache.
    pub photo_count: usize,

    /// Total bytes currently used by cached photos.
    pub total_bytes: usize,

    /// Number of cache hits (photo found).
    pub hits: u64,

    /// Number of cache misses (photo not found).
    pub misses: u64,

    /// Number of photos evicted due to limits.
    pub evictions: u64,

    /// Number of photos inserted.
    pub insertions: u64,
}

impl PhotoStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache for card photos.
///
/// Provides memory-bounded caching with LRU eviction, plus in-flight
/// tracking so each URL is downloaded at most once at a time.
pub struct PhotoCache {
    /// LRU cache mapping photo URLs to entries.
    cache: LruCache<String, CacheEntry>,

    /// URLs currently being downloaded.
    pending: HashSet<String>,

    /// Cache configuration.
    config: PhotoCacheConfig,

    /// Current total size in bytes.
    current_bytes: usize,

    /// Performance statistics.
    stats: PhotoStats,
}

impl PhotoCache {
    /// Creates a new photo cache with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `DEFAULT_MAX_PHOTOS` is zero, which would indicate a build
    /// configuration error.
    #[must_use]
    pub fn new(config: PhotoCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_photos).unwrap_or(
            NonZeroUsize::new(DEFAULT_MAX_PHOTOS).expect("DEFAULT_MAX_PHOTOS must be non-zero"),
        );

        Self {
            cache: LruCache::new(capacity),
            pending: HashSet::new(),
            config,
            current_bytes: 0,
            stats: PhotoStats::default(),
        }
    }

    /// Creates a new photo cache with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PhotoCacheConfig::default())
    }

    /// Returns whether photo caching is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Returns the number of cards to fetch photos for in each direction.
    #[must_use]
    pub fn prefetch_reach(&self) -> usize {
        self.config.prefetch_reach
    }

    /// Stores a downloaded photo and clears its pending mark.
    ///
    /// Returns `true` if the photo was cached, `false` if caching is
    /// disabled or the download is too large to be worth holding.
    pub fn insert(&mut self, url: &str, bytes: Vec<u8>) -> bool {
        self.pending.remove(url);

        if !self.config.enabled {
            return false;
        }

        let size_bytes = bytes.len();

        // Don't cache photos larger than half the cache size
        if size_bytes > self.config.max_bytes / 2 {
            return false;
        }

        let entry = CacheEntry {
            handle: Handle::from_bytes(bytes),
            size_bytes,
        };

        // Evict photos until we have room
        while self.current_bytes + size_bytes > self.config.max_bytes && !self.cache.is_empty() {
            if let Some((_, evicted)) = self.cache.pop_lru() {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes);
                self.stats.evictions += 1;
            }
        }

        // Check if we already have this URL (update if so)
        if let Some(existing) = self.cache.pop(url) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes);
        }

        self.current_bytes += entry.size_bytes;
        self.cache.put(url.to_string(), entry);
        self.stats.insertions += 1;
        self.stats.photo_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;

        true
    }

    /// Gets a photo handle from the cache by URL.
    ///
    /// Updates LRU order on access. The handle clone is cheap; pixel data
    /// is reference-counted inside it.
    pub fn get(&mut self, url: &str) -> Option<Handle> {
        if !self.config.enabled {
            return None;
        }

        if let Some(entry) = self.cache.get(url) {
            self.stats.hits += 1;
            Some(entry.handle.clone())
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Returns a cached handle without updating LRU order or stats.
    ///
    /// For render paths that only hold a shared reference; [`get`]
    /// stays the accessor of record for state transitions.
    ///
    /// [`get`]: Self::get
    #[must_use]
    pub fn peek(&self, url: &str) -> Option<Handle> {
        if !self.config.enabled {
            return None;
        }
        self.cache.peek(url).map(|entry| entry.handle.clone())
    }

    /// Checks whether a photo is cached without updating LRU order.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        if !self.config.enabled {
            return false;
        }
        self.cache.contains(url)
    }

    /// Clears the pending mark after a failed download.
    ///
    /// The URL becomes fetchable again the next time its card scrolls
    /// into reach.
    pub fn fetch_failed(&mut self, url: &str) {
        self.pending.remove(url);
    }

    /// Filters `urls` down to the ones worth downloading now and marks
    /// them pending.
    ///
    /// Cached and already-in-flight URLs are skipped, so every returned
    /// URL corresponds to exactly one new download task.
    pub fn urls_to_fetch(&mut self, urls: &[String]) -> Vec<String> {
        if !self.config.enabled {
            return Vec::new();
        }

        let mut to_fetch = Vec::new();
        for url in urls {
            if self.cache.contains(url.as_str()) || self.pending.contains(url.as_str()) {
                continue;
            }
            self.pending.insert(url.clone());
            to_fetch.push(url.clone());
        }
        to_fetch
    }

    /// Clears all cached photos and pending marks.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.pending.clear();
        self.current_bytes = 0;
        self.stats.photo_count = 0;
        self.stats.total_bytes = 0;
    }

    /// Returns the current cache statistics.
    #[must_use]
    pub fn stats(&self) -> PhotoStats {
        self.stats
    }

    /// Returns the current number of cached photos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns the current memory usage in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }
}

impl std::fmt::Debug for PhotoCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoCache")
            .field("enabled", &self.config.enabled)
            .field("photo_count", &self.cache.len())
            .field("pending", &self.pending.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("max_photos", &self.config.max_photos)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Photo URLs for the cards around `active`, nearest first.
///
/// Covers `active` itself plus up to `reach` cards in each direction.
/// Cards without a usable photo URL are skipped.
#[must_use]
pub fn neighbor_urls(records: &[BusinessRecord], active: usize, reach: usize) -> Vec<String> {
    let mut urls = Vec::new();
    let mut push = |index: usize| {
        if let Some(url) = records.get(index).and_then(BusinessRecord::photo_url) {
            let url = url.to_string();
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    };

    push(active);
    for step in 1..=reach {
        push(active + step);
        if let Some(index) = active.checked_sub(step) {
            push(index);
        }
    }
    urls
}

/// Downloads one photo.
///
/// This is the async function behind each photo task; the URL rides along
/// so the completion can be matched back to its cache slot.
pub async fn fetch_photo(client: reqwest::Client, url: String) -> (String, Result<Vec<u8>>) {
    let result = download(&client, &url).await;
    (url, result)
}

async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(crate::error::Error::Http(format!(
            "photo fetch returned {status}"
        )));
    }
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
