//! Persistence Module
//!
//! The durable key-value store the cache writes back to.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;

// == Persistence Trait ==
/// Durable key-value backend consumed by the cache engine.
///
/// Implementations own their connection; it is released when the value is
/// dropped.
pub trait Persistence {
    /// Ensures the backing table exists. Must be idempotent.
    fn initialize(&mut self) -> Result<()>;

    /// Upserts a single key/value pair.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Point lookup. `Ok(None)` means the key is not stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Upserts several pairs, returning how many were written.
    ///
    /// No atomicity across the batch is required of implementations.
    fn batch_write(&mut self, entries: &[(&str, &str)]) -> Result<usize>;
}
