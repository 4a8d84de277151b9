//! TTL-keyed caching of rate snapshots using Moka.
//!
//! Provides in-memory caching for fetched rate snapshots so repeated
//! conversions against the same base currency skip the provider until
//! its next scheduled update.

use std::time::{Duration, Instant};

use cambio_shared::Currency;
use moka::Expiry;
use moka::sync::Cache;

use super::error::RateError;
use super::types::RateSnapshot;

/// Default maximum number of cached base currencies.
const DEFAULT_MAX_ENTRIES: u64 = 64;

/// Store abstraction for cached rate snapshots, keyed by base currency.
///
/// The store is injected into the fetch pipeline so tests can substitute
/// a preloaded or failing backend. Implementations must make `get`/`put`
/// on a single key individually atomic; concurrent fetches for the same
/// cold key may both miss, and the last writer wins on `put`.
pub trait RateStore: Send + Sync {
    /// Returns the snapshot cached for `base`, or `None` on a miss or
    /// after TTL expiry.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::Store`] on a backend failure. Callers treat
    /// this as a miss.
    fn get(&self, base: Currency) -> Result<Option<RateSnapshot>, RateError>;

    /// Inserts or replaces the snapshot for its base currency with a
    /// fresh TTL.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::Store`] on a backend failure.
    fn put(&self, snapshot: RateSnapshot, ttl: Duration) -> Result<(), RateError>;
}

/// Entry stored in the cache: the snapshot plus the TTL it was inserted
/// with.
#[derive(Clone)]
struct Entry {
    snapshot: RateSnapshot,
    ttl: Duration,
}

/// Per-entry expiry policy reading the TTL off the stored entry.
struct EntryTtl;

impl Expiry<Currency, Entry> for EntryTtl {
    fn expire_after_create(
        &self,
        _base: &Currency,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory rate cache backed by Moka.
///
/// Thread-safe and shared process-wide for the process lifetime. Expiry
/// is lazy: an entry past its TTL is simply never returned as a hit.
#[derive(Clone)]
pub struct MemoryRateStore {
    cache: Cache<Currency, Entry>,
}

impl MemoryRateStore {
    /// Creates a cache with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Creates a cache bounded to `max_entries` base currencies.
    #[must_use]
    pub fn with_capacity(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(EntryTtl)
            .build();

        Self { cache }
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    ///
    /// Moka handles expiry lazily in the background; calling this
    /// explicitly reclaims expired entries sooner.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for MemoryRateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RateStore for MemoryRateStore {
    fn get(&self, base: Currency) -> Result<Option<RateSnapshot>, RateError> {
        Ok(self.cache.get(&base).map(|entry| entry.snapshot))
    }

    fn put(&self, snapshot: RateSnapshot, ttl: Duration) -> Result<(), RateError> {
        self.cache.insert(snapshot.base, Entry { snapshot, ttl });
        Ok(())
    }
}
