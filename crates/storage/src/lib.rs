//! Storage layer for Chronolog
//!
//! This crate implements the in-memory ordering discipline:
//! - RecordLog: records sorted by timestamp, stable among ties
//! - Binary-search boundaries for inserts, ranges and cutoffs

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod log;

pub use log::RecordLog;
