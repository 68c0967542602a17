//! # Chronolog
//!
//! Embedded, file-backed, time-ordered record store.
//!
//! Chronolog keeps history and audit data (trade history, prompt/response
//! logs, any append-only dataset) as records stamped with the instant they
//! were added. Records stay sorted by that timestamp, so "latest N" and
//! "between two instants" are binary searches rather than scans. Payloads are
//! any `serde` value; the store never looks inside them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chronolog::prelude::*;
//!
//! // Open (or create) a store
//! let db = Database::open("./data/history.json")?;
//!
//! // Append any serializable payload
//! db.add(&json!({"prompt": "hello", "tokens": 12}))?;
//!
//! // Read it back as whatever type fits
//! let recent: Vec<serde_json::Value> = db.get_latest(20)?;
//!
//! // Retention
//! db.delete_before(cutoff)?;
//!
//! // Graceful shutdown
//! db.close()?;
//! ```
//!
//! ## Durability
//!
//! Every mutation rewrites the whole backing file when auto-persist is on
//! (the default). With auto-persist off, changes are durable only after
//! [`Database::save`] or [`Database::close`].

#![warn(missing_docs)]

mod database;
mod options;
mod types;

pub mod prelude;

// Re-export main entry points
pub use database::{Database, DatabaseBuilder};
pub use options::DatabaseOptions;

// Re-export error handling
pub use chronolog_core::{Error, Result};

// Re-export types
pub use types::*;
