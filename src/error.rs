//! Error types for the data store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Data Store Error Enum ==
/// Unified error type for the data store.
#[derive(Error, Debug)]
pub enum DataStoreError {
    /// The durable store could not be opened or initialized
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// An upsert to durable storage did not succeed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// A lookup against durable storage did not succeed
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Construction parameters are unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the data store.
pub type Result<T> = std::result::Result<T, DataStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DataStoreError::WriteFailed("disk full".to_string());
        assert_eq!(err.to_string(), "Write failed: disk full");

        let err = DataStoreError::StoreUnavailable("no such dir".to_string());
        assert_eq!(err.to_string(), "Store unavailable: no such dir");
    }
}
