use std::cell::RefCell;

use crate::{RecordStore, Result};

/// In-memory append-only record store backed by a `Vec`.
///
/// Useful for tests and ephemeral computations.
#[derive(Clone, Default)]
pub struct MemStore(RefCell<Vec<Vec<u8>>>);

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemStore {
    fn record_count(&self) -> Result<u64> {
        Ok(self.0.borrow().len() as u64)
    }

    fn record(&self, index: u64) -> Result<Option<Vec<u8>>> {
        Ok(self.0.borrow().get(index as usize).cloned())
    }

    fn append(&self, record: &[u8]) -> Result<u64> {
        let mut records = self.0.borrow_mut();
        records.push(record.to_vec());
        Ok(records.len() as u64 - 1)
    }
}
