//! DataStore - A write-back LRU cache over SQLite
//!
//! Keeps a fixed number of string entries in memory and writes modified
//! ones to durable storage on eviction and shutdown.

pub mod cache;
pub mod config;
pub mod error;
pub mod persistence;
pub mod shell;

pub use cache::{CacheStats, DataStore};
pub use config::Config;
pub use error::{DataStoreError, Result};
pub use persistence::{Persistence, SqliteStore};
