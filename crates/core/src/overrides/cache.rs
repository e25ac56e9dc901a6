//! Process-wide override table cache using Moka.
//!
//! Tables are keyed by the configured file path. Concurrent first use of
//! the same path is coalesced into a single load; afterwards every caller
//! shares the same read-only `Arc`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use moka::sync::Cache;
use once_cell::sync::Lazy;

use moneytag_shared::{TagError, TagResult};

use super::table::LocationOverrideTable;

/// Distinct override files expected per process.
const DEFAULT_CACHE_CAPACITY: u64 = 16;

static TABLES: Lazy<OverrideCache> = Lazy::new(OverrideCache::new);

/// Cache of loaded override tables.
#[derive(Clone)]
pub struct OverrideCache {
    cache: Cache<PathBuf, Arc<LocationOverrideTable>>,
}

impl OverrideCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().max_capacity(DEFAULT_CACHE_CAPACITY).build(),
        }
    }

    /// The process-wide instance.
    #[must_use]
    pub fn global() -> &'static Self {
        &TABLES
    }

    /// Returns the table for `path`, loading it on first use.
    ///
    /// A failed load is not cached; the next call retries.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Config`] if the file exists but is invalid.
    pub fn get_or_load(&self, path: &Path) -> TagResult<Arc<LocationOverrideTable>> {
        self.cache
            .try_get_with(path.to_path_buf(), || {
                LocationOverrideTable::load(path).map(Arc::new)
            })
            .map_err(|e: Arc<TagError>| TagError::config(e.to_string()))
    }

    /// Drops every cached table so the next lookup reloads from disk.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns true if a table for `path` is cached.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.cache.contains_key(path)
    }
}

impl Default for OverrideCache {
    fn default() -> Self {
        Self::new()
    }
}
