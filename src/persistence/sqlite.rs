//! SQLite Persistence
//!
//! Stores key/value pairs in a single `data` table.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{DataStoreError, Result};
use crate::persistence::Persistence;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS data (key TEXT PRIMARY KEY, value TEXT)";
const UPSERT_SQL: &str = "INSERT OR REPLACE INTO data (key, value) VALUES (?1, ?2)";
const SELECT_SQL: &str = "SELECT value FROM data WHERE key = ?1 LIMIT 1";

// == SQLite Store ==
/// SQLite-backed durable store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path` and initializes it.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            DataStoreError::StoreUnavailable(format!("Failed to open database {}: {}", path, e))
        })?;
        info!("Opened SQLite store at {}", path);

        let mut store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DataStoreError::StoreUnavailable(format!("Failed to open in-memory database: {}", e))
        })?;

        let mut store = Self { conn };
        store.initialize()?;
        Ok(store)
    }
}

impl Persistence for SqliteStore {
    fn initialize(&mut self) -> Result<()> {
        self.conn
            .execute(CREATE_TABLE_SQL, [])
            .map_err(|e| DataStoreError::StoreUnavailable(format!("SQL error: {}", e)))?;
        Ok(())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(UPSERT_SQL, params![key, value])
            .map_err(|e| DataStoreError::WriteFailed(format!("{}: {}", key, e)))?;
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(SELECT_SQL, params![key], |row| row.get::<_, Option<String>>(0))
            .optional()
            .map(Option::flatten)
            .map_err(|e| DataStoreError::ReadFailed(format!("{}: {}", key, e)))
    }

    fn batch_write(&mut self, entries: &[(&str, &str)]) -> Result<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let write_err = |e: rusqlite::Error| DataStoreError::WriteFailed(format!("batch: {}", e));

        let tx = self.conn.transaction().map_err(write_err)?;
        {
            let mut stmt = tx.prepare_cached(UPSERT_SQL).map_err(write_err)?;
            for (key, value) in entries {
                stmt.execute(params![key, value]).map_err(write_err)?;
            }
        }
        tx.commit().map_err(write_err)?;

        debug!("Batch wrote {} entries", entries.len());
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.read("nope").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.write("1", "one").unwrap();
        assert_eq!(store.read("1").unwrap(), Some("one".to_string()));
    }

    #[test]
    fn test_write_upserts() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.write("1", "one").unwrap();
        store.write("1", "numberone").unwrap();
        assert_eq!(store.read("1").unwrap(), Some("numberone".to_string()));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.write("k", "v").unwrap();
        store.initialize().unwrap();
        assert_eq!(store.read("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_quotes_are_stored_verbatim() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.write("it's", "a 'quoted'; DROP TABLE data; --").unwrap();
        assert_eq!(
            store.read("it's").unwrap(),
            Some("a 'quoted'; DROP TABLE data; --".to_string())
        );
    }

    #[test]
    fn test_empty_strings() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.write("", "").unwrap();
        assert_eq!(store.read("").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_batch_write() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.write("a", "old").unwrap();

        let written = store.batch_write(&[("a", "new"), ("b", "two")]).unwrap();
        assert_eq!(written, 2);
        assert_eq!(store.read("a").unwrap(), Some("new".to_string()));
        assert_eq!(store.read("b").unwrap(), Some("two".to_string()));
    }

    #[test]
    fn test_batch_write_empty() {
        let mut store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.batch_write(&[]).unwrap(), 0);
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let result = SqliteStore::open("/nonexistent-dir/for/sure/store.db");
        assert!(matches!(result, Err(DataStoreError::StoreUnavailable(_))));
    }
}
