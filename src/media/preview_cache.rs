// SPDX-License-Identifier: MPL-2.0
//! Memory-bounded LRU cache of decoded previews.
//!
//! # Design
//!
//! - **LRU eviction**: least recently used previews are evicted first
//! - **Memory-bounded**: total RGBA size limited by a configurable byte budget
//! - **URL-keyed**: previews indexed by the record's image URL
//! - **Request tracking**: URLs in flight or known to fail are not requested again
//! - **Pinning**: previews of the rendered gallery stay cached whatever the budget
//!
//! Result sets are never cached; only the images behind them are.

use crate::media::Preview;
use lru::LruCache;
use std::collections::HashSet;

const MIB: usize = 1024 * 1024;

/// Default cache size in mebibytes.
pub const DEFAULT_CACHE_MB: u32 = 64;

/// Minimum cache size in mebibytes.
pub const MIN_CACHE_MB: u32 = 8;

/// Maximum cache size in mebibytes.
pub const MAX_CACHE_MB: u32 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewCacheConfig {
    /// Maximum total size of cached pixels in bytes.
    pub max_bytes: usize,
}

impl Default for PreviewCacheConfig {
    fn default() -> Self {
        Self::from_megabytes(DEFAULT_CACHE_MB)
    }
}

impl PreviewCacheConfig {
    /// Budget of `megabytes`, clamped to the supported range.
    #[must_use]
    pub fn from_megabytes(megabytes: u32) -> Self {
        let clamped = megabytes.clamp(MIN_CACHE_MB, MAX_CACHE_MB) as usize;
        Self {
            max_bytes: clamped * MIB,
        }
    }
}

/// Outcome of [`PreviewCache::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The preview is cached.
    Stored,
    /// The preview belongs to no rendered tile and the budget is spent.
    Skipped,
    /// The preview alone takes more than half the budget.
    TooLarge,
}

pub struct PreviewCache {
    cache: LruCache<String, Preview>,
    config: PreviewCacheConfig,
    current_bytes: usize,
    /// URLs of the tiles currently rendered. Never evicted.
    pinned: HashSet<String>,
    pending: HashSet<String>,
    failed: HashSet<String>,
}

impl PreviewCache {
    #[must_use]
    pub fn new(config: PreviewCacheConfig) -> Self {
        Self {
            // Bounded by bytes, not entry count.
            cache: LruCache::unbounded(),
            config,
            current_bytes: 0,
            pinned: HashSet::new(),
            pending: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    /// Replaces the set of URLs shown by the gallery.
    ///
    /// Pinned previews are never evicted, so the budget may be exceeded by a
    /// gallery larger than it. Everything else is evicted first.
    pub fn pin<'a, I>(&mut self, urls: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.pinned = urls.into_iter().map(str::to_string).collect();
    }

    /// Stores `preview` for `url`, evicting unpinned entries to stay in budget.
    pub fn insert(&mut self, url: String, preview: Preview) -> Admission {
        self.pending.remove(&url);

        let size = preview.size_bytes();
        if size > self.config.max_bytes / 2 {
            log::debug!("Preview for {url} too large to cache ({size} bytes)");
            return Admission::TooLarge;
        }

        if let Some(existing) = self.cache.pop(&url) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes());
        }

        while self.current_bytes + size > self.config.max_bytes {
            if !self.evict_unpinned() {
                break;
            }
        }

        let fits = self.current_bytes + size <= self.config.max_bytes;
        if !fits && !self.pinned.contains(&url) {
            log::debug!("Dropping preview for {url}: not shown and cache full");
            return Admission::Skipped;
        }

        self.current_bytes += size;
        self.cache.put(url, preview);
        Admission::Stored
    }

    /// Evicts the least recently used unpinned preview.
    fn evict_unpinned(&mut self) -> bool {
        let victim = self
            .cache
            .iter()
            .rev()
            .map(|(url, _)| url)
            .find(|url| !self.pinned.contains(*url))
            .cloned();

        match victim.and_then(|url| self.cache.pop(&url)) {
            Some(evicted) => {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
                true
            }
            None => false,
        }
    }

    /// Looks up `url` without touching LRU order.
    ///
    /// Used from `view`, which only has shared access.
    #[must_use]
    pub fn peek(&self, url: &str) -> Option<&Preview> {
        self.cache.peek(url)
    }

    /// Returns the URLs that still need a request and marks them pending.
    ///
    /// Cached, in-flight and previously failed URLs are skipped, as are
    /// duplicates within `urls`.
    pub fn claim<'a, I>(&mut self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut claimed = Vec::new();
        for url in urls {
            if self.cache.contains(url) || self.pending.contains(url) || self.failed.contains(url)
            {
                continue;
            }
            self.pending.insert(url.to_string());
            claimed.push(url.to_string());
        }
        claimed
    }

    /// Records that loading `url` failed so it is not requested again.
    pub fn mark_failed(&mut self, url: &str) {
        self.pending.remove(url);
        self.failed.insert(url.to_string());
    }

    #[must_use]
    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    #[must_use]
    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    /// Forgets failures so a retry can request those URLs again.
    pub fn clear_failures(&mut self) {
        self.failed.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new(PreviewCacheConfig::default())
    }
}

impl std::fmt::Debug for PreviewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewCache")
            .field("entries", &self.cache.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("pinned", &self.pinned.len())
            .field("pending", &self.pending.len())
            .field("failed", &self.failed.len())
            .finish()
    }
}
