//! Payload codec
//!
//! The store never looks inside a payload. This module is the only place that
//! turns caller values into the opaque byte form and back. The byte form is
//! compact JSON, which lets the backing file embed payloads verbatim.
//! Payloads holding NaN or infinite floats have no JSON form and are rejected
//! with an encode error.
//!
//! Reads are fail-fast: [`decode_all`] stops at the first record that does not
//! fit the requested type and returns its error for the whole call.

use crate::error::{Error, Result};
use crate::finite;
use crate::record::Record;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Serialize a payload to its stored byte form
pub fn encode<T: Serialize + ?Sized>(payload: &T) -> Result<Vec<u8>> {
    finite::check(payload).map_err(Error::encode)?;
    serde_json::to_vec(payload).map_err(Error::encode)
}

/// Deserialize stored bytes into `T`
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(Error::decode)
}

/// Deserialize stored bytes into the untyped intermediate form
pub fn to_value(bytes: &[u8]) -> Result<Value> {
    decode(bytes)
}

/// Decode one record's payload into `T`
///
/// Decode errors name the record's timestamp.
pub fn decode_record<T: DeserializeOwned>(record: &Record) -> Result<T> {
    decode(record.raw_data()).map_err(|e| match e {
        Error::Decode { reason } => Error::Decode {
            reason: format!("record at {}: {}", record.timestamp(), reason),
        },
        other => other,
    })
}

/// Decode every record into `T`, preserving order
pub fn decode_all<T: DeserializeOwned>(records: &[Record]) -> Result<Vec<T>> {
    records.iter().map(decode_record).collect()
}
