//! Configuration Module
//!
//! Handles loading and validating data store configuration.

use std::env;

use crate::error::{DataStoreError, Result};

/// Store name used when none is supplied.
pub const DEFAULT_STORE_NAME: &str = "DataStore";

/// Special store name selecting an in-memory SQLite database.
pub const IN_MEMORY_STORE: &str = ":memory:";

/// Data store configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries held in memory
    pub capacity: usize,
    /// Location/name of the durable store
    pub store_name: String,
}

impl Config {
    /// Creates a config with an explicit capacity and store name.
    pub fn new(capacity: usize, store_name: impl Into<String>) -> Self {
        Self {
            capacity,
            store_name: store_name.into(),
        }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATASTORE_CAPACITY` - Maximum cached entries (default: 1000)
    /// - `DATASTORE_NAME` - Durable store name (default: "DataStore")
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("DATASTORE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            store_name: env::var("DATASTORE_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_STORE_NAME.to_string()),
        }
    }

    /// Rejects configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(DataStoreError::InvalidConfig(
                "capacity must be a positive integer".to_string(),
            ));
        }
        if self.store_name.is_empty() {
            return Err(DataStoreError::InvalidConfig(
                "store name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolves the SQLite database path for the store name.
    ///
    /// `.db` is appended unless already present; `:memory:` passes through.
    pub fn database_path(&self) -> String {
        if self.store_name == IN_MEMORY_STORE || self.store_name.ends_with(".db") {
            self.store_name.clone()
        } else {
            format!("{}.db", self.store_name)
        }
    }

    /// True when the store lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.store_name == IN_MEMORY_STORE
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            store_name: DEFAULT_STORE_NAME.to_string(),
        }
    }
}
