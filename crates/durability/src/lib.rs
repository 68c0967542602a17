//! Durability layer for Chronolog
//!
//! This crate implements whole-collection persistence:
//! - Persistence: backend contract (load everything, persist everything)
//! - JsonFile: one JSON file, atomic temp-file + rename writes
//! - Ephemeral: in-memory backend, no disk I/O

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ephemeral;
pub mod json_file;
pub mod persistence;

pub use ephemeral::Ephemeral;
pub use json_file::JsonFile;
pub use persistence::Persistence;
