//! Core types for Chronolog
//!
//! This crate defines the vocabulary shared by every layer of the store:
//! - [`Record`]: one stored entry (timestamp + opaque payload bytes)
//! - [`Timestamp`]: store-assigned creation instant
//! - [`clock`]: where timestamps come from
//! - [`codec`]: payload encode/decode boundary
//! - [`Error`]: the workspace-wide error type

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod codec;
pub mod error;
mod finite;
pub mod record;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use record::Record;
pub use types::Timestamp;
