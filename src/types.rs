//! Public types for the Chronolog API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Records and time
pub use chronolog_core::Record;
pub use chronolog_core::Timestamp;

// Clocks
pub use chronolog_core::{Clock, ManualClock, SystemClock};

// Persistence backends
pub use chronolog_durability::{Ephemeral, JsonFile, Persistence};

// Untyped payload form used by updates
pub use serde_json::Value;
