//! In-memory backend with no disk I/O

use crate::persistence::Persistence;
use chronolog_core::{Record, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Backend that keeps the last persisted collection in memory
///
/// Nothing survives the process. Useful for tests and caches, and for
/// observing exactly what a store persisted and when.
#[derive(Debug, Default)]
pub struct Ephemeral {
    persisted: Mutex<Vec<Record>>,
    persist_count: AtomicU64,
}

impl Ephemeral {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already holds `records`
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            persisted: Mutex::new(records),
            persist_count: AtomicU64::new(0),
        }
    }

    /// Copy of the last persisted collection
    pub fn snapshot(&self) -> Vec<Record> {
        self.persisted.lock().clone()
    }

    /// Number of successful `persist` calls so far
    pub fn persist_count(&self) -> u64 {
        self.persist_count.load(Ordering::Acquire)
    }
}

impl Persistence for Ephemeral {
    fn load(&self) -> Result<Vec<Record>> {
        Ok(self.snapshot())
    }

    fn persist(&self, records: &[Record]) -> Result<()> {
        *self.persisted.lock() = records.to_vec();
        self.persist_count.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}
