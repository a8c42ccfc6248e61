// SPDX-License-Identifier: MPL-2.0
//! Slide prefetch cache for latency-free navigation.
//!
//! Slides adjacent to the current position are requested ahead of
//! navigation and kept as encoded image bytes in a memory-bounded LRU
//! cache. Prefetching is an optimization only: a cache miss never blocks
//! or fails navigation, it just loads on demand.

use crate::assets::SlideSource;
use crate::error::{Error, Result};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default prefetch cache size in bytes (32 MB).
pub const DEFAULT_PREFETCH_CACHE_BYTES: usize = 32 * 1024 * 1024;

/// Minimum prefetch cache size in bytes (8 MB).
pub const MIN_PREFETCH_CACHE_BYTES: usize = 8 * 1024 * 1024;

/// Maximum prefetch cache size in bytes (128 MB).
pub const MAX_PREFETCH_CACHE_BYTES: usize = 128 * 1024 * 1024;

/// Default maximum number of slides to cache.
pub const DEFAULT_MAX_SLIDES: usize = 16;

/// Minimum slides to cache.
pub const MIN_MAX_SLIDES: usize = 4;

/// Maximum slides to cache.
pub const MAX_MAX_SLIDES: usize = 32;

/// Default number of slides to prefetch in each direction.
pub const DEFAULT_PREFETCH_DEPTH: usize = 2;

/// Configuration for the prefetch cache.
#[derive(Debug, Clone, Copy)]
pub struct PrefetchConfig {
    /// Maximum cache size in bytes.
    pub max_bytes: usize,

    /// Maximum number of slides to cache.
    pub max_slides: usize,

    /// Number of slides to prefetch in each direction (next/previous).
    pub depth: usize,

    /// Whether prefetching is enabled.
    pub enabled: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_PREFETCH_CACHE_BYTES,
            max_slides: DEFAULT_MAX_SLIDES,
            depth: DEFAULT_PREFETCH_DEPTH,
            enabled: true,
        }
    }
}

impl PrefetchConfig {
    /// Creates a new prefetch configuration with specified limits.
    #[must_use]
    pub fn new(max_bytes: usize, max_slides: usize, depth: usize) -> Self {
        Self {
            max_bytes: max_bytes.clamp(MIN_PREFETCH_CACHE_BYTES, MAX_PREFETCH_CACHE_BYTES),
            max_slides: max_slides.clamp(MIN_MAX_SLIDES, MAX_MAX_SLIDES),
            depth,
            enabled: true,
        }
    }

    /// Creates a disabled prefetch configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Cached slide entry.
#[derive(Debug, Clone)]
struct CacheEntry {
    bytes: Arc<Vec<u8>>,
}

impl CacheEntry {
    fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
        }
    }

    fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Statistics about prefetch cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefetchStats {
    /// Number of slides currently in cache.
    pub slide_count: usize,

    /// Total bytes currently used by cached slides.
    pub total_bytes: usize,

    /// Number of cache hits (slide found).
    pub hits: u64,

    /// Number of cache misses (slide not found).
    pub misses: u64,

    /// Number of slides evicted due to limits.
    pub evictions: u64,

    /// Number of slides inserted.
    pub insertions: u64,
}

impl PrefetchStats {
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

/// Returns the slide indices to prefetch around `current`.
///
/// Walks `depth` steps forward and backward with wraparound, skipping the
/// current index and duplicates (a short list is covered entirely by a
/// deep enough plan).
#[must_use]
pub fn prefetch_plan(current: usize, len: usize, depth: usize) -> Vec<usize> {
    if len < 2 || current >= len {
        return Vec::new();
    }

    let mut plan = Vec::new();
    for step in 1..=depth {
        let forward = (current + step) % len;
        if forward != current && !plan.contains(&forward) {
            plan.push(forward);
        }
        let backward = (current + len - (step % len)) % len;
        if backward != current && !plan.contains(&backward) {
            plan.push(backward);
        }
    }
    plan
}

/// LRU cache for prefetched slide bytes.
///
/// Provides memory-bounded caching with LRU eviction, keyed by the
/// resolved slide source.
pub struct SlideCache {
    cache: LruCache<SlideSource, CacheEntry>,
    config: PrefetchConfig,
    current_bytes: usize,
    stats: PrefetchStats,
}

impl SlideCache {
    /// Creates a new slide cache with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `DEFAULT_MAX_SLIDES` is zero, which would indicate a build
    /// configuration error.
    #[must_use]
    pub fn new(config: PrefetchConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_slides).unwrap_or(
            NonZeroUsize::new(DEFAULT_MAX_SLIDES).expect("DEFAULT_MAX_SLIDES must be non-zero"),
        );

        Self {
            cache: LruCache::new(capacity),
            config,
            current_bytes: 0,
            stats: PrefetchStats::default(),
        }
    }

    /// Creates a new slide cache with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PrefetchConfig::default())
    }

    /// Returns whether prefetching is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Returns the number of slides to prefetch in each direction.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.config.depth
    }

    /// Inserts slide bytes into the cache.
    ///
    /// Returns `true` if the slide was inserted, `false` if caching is
    /// disabled or the payload is too large.
    pub fn insert(&mut self, source: SlideSource, bytes: Vec<u8>) -> bool {
        if !self.config.enabled {
            return false;
        }

        let entry = CacheEntry::new(bytes);
        let entry_size = entry.size_bytes();

        // Don't cache payloads larger than half the cache size
        if entry_size > self.config.max_bytes / 2 {
            return false;
        }

        // Evict slides until there is room
        while self.current_bytes + entry_size > self.config.max_bytes && !self.cache.is_empty() {
            if let Some((_, evicted)) = self.cache.pop_lru() {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
                self.stats.evictions += 1;
            }
        }

        // Replace an existing entry for the same source
        if let Some(existing) = self.cache.pop(&source) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes());
        }

        self.current_bytes += entry_size;
        self.cache.put(source, entry);
        self.stats.insertions += 1;
        self.stats.slide_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;

        true
    }

    /// Gets slide bytes from the cache, updating LRU order on access.
    pub fn get(&mut self, source: &SlideSource) -> Option<Arc<Vec<u8>>> {
        if !self.config.enabled {
            return None;
        }

        if let Some(entry) = self.cache.get(source) {
            self.stats.hits += 1;
            Some(Arc::clone(&entry.bytes))
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Reads slide bytes without updating LRU order or stats.
    ///
    /// The render path uses this so drawing a frame does not count as a
    /// navigation access.
    #[must_use]
    pub fn peek(&self, source: &SlideSource) -> Option<&Arc<Vec<u8>>> {
        if !self.config.enabled {
            return None;
        }
        self.cache.peek(source).map(|entry| &entry.bytes)
    }

    /// Checks if a slide is cached without updating LRU order.
    #[must_use]
    pub fn contains(&self, source: &SlideSource) -> bool {
        if !self.config.enabled {
            return false;
        }
        self.cache.contains(source)
    }

    /// Returns the sources from `sources` that still need to be fetched.
    #[must_use]
    pub fn missing_from(&self, sources: &[SlideSource]) -> Vec<SlideSource> {
        if !self.config.enabled {
            return Vec::new();
        }

        sources
            .iter()
            .filter(|s| !self.cache.contains(s))
            .cloned()
            .collect()
    }

    /// Clears all cached slides.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_bytes = 0;
        self.stats.slide_count = 0;
        self.stats.total_bytes = 0;
    }

    /// Returns the current cache statistics.
    #[must_use]
    pub fn stats(&self) -> PrefetchStats {
        self.stats
    }

    /// Returns the current number of cached slides.
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

    /// Returns the cache configuration.
    #[must_use]
    pub fn config(&self) -> &PrefetchConfig {
        &self.config
    }
}

impl std::fmt::Debug for SlideCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideCache")
            .field("enabled", &self.config.enabled)
            .field("slide_count", &self.cache.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("max_slides", &self.config.max_slides)
            .field("depth", &self.config.depth)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Loads the bytes behind a slide source.
///
/// This is the async function called by the prefetch task. Local files are
/// read on a blocking task; remote sources are fetched over HTTPS. Returns
/// the source together with the loaded bytes, or an error.
pub async fn load_slide(source: SlideSource) -> (SlideSource, Result<Vec<u8>>) {
    let result = match &source {
        SlideSource::Local(path) => {
            let path = path.clone();
            tokio::task::spawn_blocking(move || std::fs::read(&path).map_err(Error::from))
                .await
                .unwrap_or_else(|e| Err(Error::Io(format!("Prefetch task failed: {e}"))))
        }
        SlideSource::Remote(url) => fetch_remote(url).await,
    };

    (source, result)
}

async fn fetch_remote(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source(name: &str) -> SlideSource {
        SlideSource::Local(PathBuf::from(name))
    }

    fn payload(len: usize) -> Vec<u8> {
        vec![0u8; len]
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = SlideCache::with_defaults();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.memory_usage(), 0);
    }

    #[test]
    fn insert_and_get_slide() {
        let mut cache = SlideCache::with_defaults();
        let src = source("a.jpg");

        assert!(cache.insert(src.clone(), payload(1024)));
        assert_eq!(cache.len(), 1);

        let retrieved = cache.get(&src);
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().len(), 1024);
    }

    #[test]
    fn disabled_cache_returns_none() {
        let mut cache = SlideCache::new(PrefetchConfig::disabled());
        let src = source("a.jpg");

        assert!(!cache.insert(src.clone(), payload(1024)));
        assert!(cache.get(&src).is_none());
        assert!(cache.missing_from(&[src]).is_empty());
    }

    #[test]
    fn lru_eviction_on_byte_limit() {
        let config = PrefetchConfig {
            max_bytes: MIN_PREFETCH_CACHE_BYTES,
            max_slides: MAX_MAX_SLIDES,
            depth: 2,
            enabled: true,
        };
        let mut cache = SlideCache::new(config);

        // Each payload is 1 MB; inserting well past the 8 MB limit must evict
        for i in 0..12 {
            cache.insert(source(&format!("slide_{i}.jpg")), payload(1024 * 1024));
        }

        assert!(cache.memory_usage() <= MIN_PREFETCH_CACHE_BYTES);
        assert!(cache.stats().evictions > 0);
    }

    #[test]
    fn contains_checks_without_updating_lru() {
        let mut cache = SlideCache::with_defaults();
        let src = source("a.jpg");
        cache.insert(src.clone(), payload(16));

        assert!(cache.contains(&src));
        assert!(!cache.contains(&source("missing.jpg")));
    }

    #[test]
    fn peek_reads_without_touching_stats() {
        let mut cache = SlideCache::with_defaults();
        let src = source("a.jpg");
        cache.insert(src.clone(), payload(16));

        assert!(cache.peek(&src).is_some());
        assert!(cache.peek(&source("missing.jpg")).is_none());
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn missing_from_filters_cached_sources() {
        let mut cache = SlideCache::with_defaults();
        let cached = source("cached.jpg");
        cache.insert(cached.clone(), payload(16));

        let sources = vec![cached.clone(), source("x.jpg"), source("y.jpg")];
        let missing = cache.missing_from(&sources);

        assert_eq!(missing.len(), 2);
        assert!(!missing.contains(&cached));
    }

    #[test]
    fn clear_removes_all_slides() {
        let mut cache = SlideCache::with_defaults();
        for i in 0..5 {
            cache.insert(source(&format!("slide_{i}.jpg")), payload(64));
        }

        assert_eq!(cache.len(), 5);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.memory_usage(), 0);
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let mut cache = SlideCache::with_defaults();
        let src = source("a.jpg");
        cache.insert(src.clone(), payload(16));

        let _ = cache.get(&src);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 0);

        let _ = cache.get(&source("missing.jpg"));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);

        assert!((cache.stats().hit_rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn oversized_payload_not_cached() {
        let config = PrefetchConfig {
            max_bytes: MIN_PREFETCH_CACHE_BYTES,
            max_slides: MAX_MAX_SLIDES,
            depth: 2,
            enabled: true,
        };
        let mut cache = SlideCache::new(config);

        // Larger than half the cache size
        assert!(!cache.insert(source("huge.jpg"), payload(MIN_PREFETCH_CACHE_BYTES / 2 + 1)));
        assert!(cache.is_empty());
    }

    #[test]
    fn duplicate_source_updates_payload() {
        let mut cache = SlideCache::with_defaults();
        let src = source("a.jpg");

        cache.insert(src.clone(), payload(100));
        cache.insert(src.clone(), payload(200));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.memory_usage(), 200);
        assert_eq!(cache.get(&src).unwrap().len(), 200);
    }

    #[test]
    fn config_clamps_values() {
        let config = PrefetchConfig::new(0, 0, 2);
        assert_eq!(config.max_bytes, MIN_PREFETCH_CACHE_BYTES);
        assert_eq!(config.max_slides, MIN_MAX_SLIDES);

        let config = PrefetchConfig::new(usize::MAX, usize::MAX, 2);
        assert_eq!(config.max_bytes, MAX_PREFETCH_CACHE_BYTES);
        assert_eq!(config.max_slides, MAX_MAX_SLIDES);
    }

    #[test]
    fn plan_covers_next_and_previous_neighbors() {
        assert_eq!(prefetch_plan(0, 5, 1), vec![1, 4]);
        assert_eq!(prefetch_plan(0, 5, 2), vec![1, 4, 2, 3]);
    }

    #[test]
    fn plan_wraps_around_boundaries() {
        assert_eq!(prefetch_plan(4, 5, 1), vec![0, 3]);
    }

    #[test]
    fn plan_deduplicates_on_short_lists() {
        // With 3 slides and depth 2, every other slide appears exactly once
        let plan = prefetch_plan(0, 3, 2);
        assert_eq!(plan.len(), 2);
        assert!(plan.contains(&1));
        assert!(plan.contains(&2));
    }

    #[test]
    fn plan_is_empty_for_degenerate_lists() {
        assert!(prefetch_plan(0, 0, 2).is_empty());
        assert!(prefetch_plan(0, 1, 2).is_empty());
        assert!(prefetch_plan(9, 5, 2).is_empty());
    }

    #[tokio::test]
    async fn load_slide_reads_local_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("slide.jpg");
        std::fs::write(&path, b"fake image data").expect("failed to write test file");

        let (returned, result) = load_slide(SlideSource::Local(path.clone())).await;
        assert_eq!(returned, SlideSource::Local(path));
        assert_eq!(result.expect("local read should succeed"), b"fake image data");
    }

    #[tokio::test]
    async fn load_slide_reports_missing_local_file() {
        let (_, result) = load_slide(SlideSource::Local(PathBuf::from("/nonexistent/x.jpg"))).await;
        assert!(result.is_err());
    }
}
