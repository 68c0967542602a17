//! Convenient imports for Chronolog.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```ignore
//! use chronolog::prelude::*;
//!
//! let db = Database::open("./history.json")?;
//! db.add(&json!({"event": "login"}))?;
//! ```

// Main entry point
pub use crate::database::{Database, DatabaseBuilder};
pub use crate::options::DatabaseOptions;

// Error handling
pub use crate::{Error, Result};

// Core types
pub use crate::types::{Record, Timestamp, Value};

// Re-export serde_json for convenience
pub use serde_json::json;
