//! Data Store Module
//!
//! Write-back LRU cache engine in front of a durable key-value store.

use tracing::{debug, error, info, warn};

use crate::cache::{CacheEntry, CacheStats, LruList};
use crate::config::Config;
use crate::error::{DataStoreError, Result};
use crate::persistence::{Persistence, SqliteStore};

/// Upper bound on slots reserved up front, whatever the capacity.
const MAX_PREALLOCATED: usize = 4096;

// == Data Store ==
/// Fixed-capacity LRU cache that defers writes to a durable backend.
///
/// Modified entries are written back when evicted, on [`flush`], and when
/// the store is closed or dropped. Entries loaded from the backend are
/// cached clean and never written back unless modified afterwards.
///
/// [`flush`]: DataStore::flush
#[derive(Debug)]
pub struct DataStore<P: Persistence = SqliteStore> {
    /// Recency-ordered entries with their key index
    entries: LruList,
    /// Durable backing store
    backend: P,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries held after any operation
    capacity: usize,
    /// Set once `close` has run the final flush
    closed: bool,
}

impl DataStore<SqliteStore> {
    // == Open ==
    /// Opens the SQLite store named by `config` and wraps it in a cache.
    ///
    /// Fails with `StoreUnavailable` if the database cannot be opened.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        let backend = if config.is_in_memory() {
            SqliteStore::in_memory()?
        } else {
            SqliteStore::open(&config.database_path())?
        };

        Self::with_backend(config.capacity, backend)
    }
}

impl<P: Persistence> DataStore<P> {
    // == Constructor ==
    /// Creates a cache of `capacity` entries over an existing backend.
    ///
    /// The backend is initialized before the cache is returned.
    pub fn with_backend(capacity: usize, mut backend: P) -> Result<Self> {
        if capacity == 0 {
            return Err(DataStoreError::InvalidConfig(
                "capacity must be a positive integer".to_string(),
            ));
        }
        backend.initialize()?;

        Ok(Self {
            entries: LruList::with_capacity(capacity.saturating_add(1).min(MAX_PREALLOCATED)),
            backend,
            stats: CacheStats::new(),
            capacity,
            closed: false,
        })
    }

    // == Put ==
    /// Stores a value, marking it for write-back.
    ///
    /// If this pushes the cache over capacity the least recently used entry
    /// is evicted and, if dirty, written to the backend. A failed write is
    /// logged and counted; the evicted value is dropped either way.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(CacheEntry::modified(key.into(), value.into()));
    }

    // == Get ==
    /// Retrieves a value, loading it from the backend on a miss.
    ///
    /// A backend read failure is logged and reported as `None`.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Treating failed read of {} as absent: {}", key, e);
                None
            }
        }
    }

    /// Like [`get`](DataStore::get) but surfaces backend read failures.
    pub fn try_get(&mut self, key: &str) -> Result<Option<String>> {
        if let Some(entry) = self.entries.touch(key) {
            let value = entry.value.clone();
            self.stats.record_hit();
            return Ok(Some(value));
        }

        self.stats.record_miss();
        match self.backend.read(key) {
            Ok(Some(value)) => {
                debug!("Filled {} from durable store", key);
                self.insert(CacheEntry::clean(key.to_string(), value.clone()));
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.stats.record_read_failure();
                Err(e)
            }
        }
    }

    // == Queries ==
    /// Checks cache membership only; never touches the backend or recency.
    pub fn is_in_cache(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// True if `key` is cached with changes not yet written back.
    pub fn is_dirty(&self, key: &str) -> bool {
        self.entries.peek(key).is_some_and(|e| e.dirty)
    }

    /// Returns the current number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Flush ==
    /// Writes every dirty entry to the backend in one batch.
    ///
    /// Entries stay cached and become clean. On failure they stay dirty.
    /// Returns the number of entries written.
    pub fn flush(&mut self) -> Result<usize> {
        let dirty: Vec<(&str, &str)> = self
            .entries
            .iter()
            .filter(|e| e.dirty)
            .map(|e| (e.key.as_str(), e.value.as_str()))
            .collect();

        if dirty.is_empty() {
            return Ok(0);
        }

        match self.backend.batch_write(&dirty) {
            Ok(written) => {
                for entry in self.entries.entries_mut() {
                    entry.mark_clean();
                }
                self.stats.record_write_backs(written as u64);
                debug!("Flushed {} dirty entries", written);
                Ok(written)
            }
            Err(e) => {
                self.stats.record_write_failure();
                Err(e)
            }
        }
    }

    // == Close ==
    /// Runs the final flush and releases the backend.
    ///
    /// Unlike dropping the store, a flush failure is returned to the caller.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        let written = self.flush()?;
        info!("Data store closed, {} entries written back", written);
        Ok(())
    }

    // == Internals ==
    fn insert(&mut self, entry: CacheEntry) {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.evict_oldest();
        }
        self.stats.set_total_entries(self.entries.len());
    }

    fn evict_oldest(&mut self) {
        let evicted = match self.entries.pop_oldest() {
            Some(entry) => entry,
            None => return,
        };
        self.stats.record_eviction();

        if !evicted.dirty {
            debug!("Evicted clean entry {}", evicted.key);
            self.stats.record_skipped_write();
            return;
        }

        match self.backend.write(&evicted.key, &evicted.value) {
            Ok(()) => {
                debug!("Evicted {} and wrote it back", evicted.key);
                self.stats.record_write_backs(1);
            }
            Err(e) => {
                warn!("Write-back of evicted {} failed, value lost: {}", evicted.key, e);
                self.stats.record_write_failure();
            }
        }
    }
}

impl<P: Persistence> Drop for DataStore<P> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.flush() {
            error!("Final flush failed, unsaved entries lost: {}", e);
        }
    }
}
