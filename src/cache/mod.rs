//! Cache Module
//!
//! Write-back LRU caching in front of a durable key-value store.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod testing;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruList;
pub use stats::CacheStats;
pub use store::DataStore;
