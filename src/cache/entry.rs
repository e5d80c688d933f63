//! Cache Entry Module
//!
//! Defines a single cached key/value pair with its write-back state.

// == Cache Entry ==
/// A cached key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The key this entry is stored under
    pub key: String,
    /// The stored value
    pub value: String,
    /// True when `value` may differ from the durable copy
    pub dirty: bool,
}

impl CacheEntry {
    // == Constructors ==
    /// Creates an entry written by the caller, pending write-back.
    pub fn modified(key: String, value: String) -> Self {
        Self {
            key,
            value,
            dirty: true,
        }
    }

    /// Creates an entry known to match durable storage.
    pub fn clean(key: String, value: String) -> Self {
        Self {
            key,
            value,
            dirty: false,
        }
    }

    /// Marks the entry as synced with durable storage.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
