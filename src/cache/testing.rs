//! Test double for the persistence layer.
//!
//! Records every call in shared state so tests can inspect it after the
//! cache (and with it the backend) has been dropped.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{DataStoreError, Result};
use crate::persistence::Persistence;

#[derive(Debug, Default)]
pub struct BackendState {
    pub data: HashMap<String, String>,
    /// Single-key writes, in call order
    pub writes: Vec<(String, String)>,
    /// Batched writes, one vec per call
    pub batches: Vec<Vec<(String, String)>>,
    pub reads: usize,
    pub fail_init: bool,
    pub fail_writes: bool,
    pub fail_reads: bool,
}

impl BackendState {
    /// Total number of key writes across single and batched calls.
    pub fn write_count(&self) -> usize {
        self.writes.len() + self.batches.iter().map(Vec::len).sum::<usize>()
    }

    /// Every key written, single or batched.
    pub fn written_keys(&self) -> Vec<String> {
        self.writes
            .iter()
            .chain(self.batches.iter().flatten())
            .map(|(k, _)| k.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub state: Rc<RefCell<BackendState>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds durable data without recording it as a write.
    pub fn with_data(pairs: &[(&str, &str)]) -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state.borrow_mut();
            for (k, v) in pairs {
                state.data.insert(k.to_string(), v.to_string());
            }
        }
        backend
    }
}

impl Persistence for RecordingBackend {
    fn initialize(&mut self) -> Result<()> {
        if self.state.borrow().fail_init {
            return Err(DataStoreError::StoreUnavailable("init refused".to_string()));
        }
        Ok(())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(DataStoreError::WriteFailed(key.to_string()));
        }
        state.writes.push((key.to_string(), value.to_string()));
        state.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let mut state = self.state.borrow_mut();
        state.reads += 1;
        if state.fail_reads {
            return Err(DataStoreError::ReadFailed(key.to_string()));
        }
        Ok(state.data.get(key).cloned())
    }

    fn batch_write(&mut self, entries: &[(&str, &str)]) -> Result<usize> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(DataStoreError::WriteFailed("batch".to_string()));
        }
        let batch: Vec<(String, String)> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (k, v) in &batch {
            state.data.insert(k.clone(), v.clone());
        }
        state.batches.push(batch);
        Ok(entries.len())
    }
}
