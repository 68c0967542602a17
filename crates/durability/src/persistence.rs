//! Persistence backend contract
//!
//! The store persists by handing its entire collection to a backend and
//! loads by asking for everything back. Whole-collection rewrites are the
//! scalability ceiling of the design; an incremental backend can be dropped
//! in behind this trait without touching the store's public API.

use chronolog_core::{Record, Result};
use std::fmt::Debug;
use std::path::Path;

/// Where a store's records live between process runs
///
/// Implementations are called with the store's exclusive lock held, so they
/// never see two concurrent `persist` calls from the same store.
pub trait Persistence: Send + Sync + Debug {
    /// Read every persisted record
    ///
    /// Records may come back in any order; the store re-sorts them. Absence
    /// of any persisted state is an empty collection, not an error.
    fn load(&self) -> Result<Vec<Record>>;

    /// Replace the persisted state with `records`
    fn persist(&self, records: &[Record]) -> Result<()>;

    /// Backing file, if this backend has one
    fn location(&self) -> Option<&Path> {
        None
    }
}
