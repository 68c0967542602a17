//! A single stored entry: timestamp plus opaque payload bytes

use crate::codec;
use crate::error::Result;
use crate::types::Timestamp;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// One stored entry
///
/// Records are immutable. Updating a payload produces a new record that keeps
/// the original timestamp (see [`Record::with_raw_data`]).
///
/// Predicates passed to conditional operations receive `&Record`, so they can
/// filter on [`timestamp`](Record::timestamp) or peek at
/// [`raw_data`](Record::raw_data) without paying for a full decode.
///
/// # Example
///
/// ```
/// use chronolog_core::{Record, Timestamp};
///
/// let record = Record::encode(Timestamp::from_unix_nanos(7), &vec![1, 2, 3]).unwrap();
/// assert_eq!(record.raw_data(), b"[1,2,3]");
/// assert_eq!(record.decode::<Vec<u8>>().unwrap(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    timestamp: Timestamp,
    raw_data: Vec<u8>,
}

impl Record {
    /// Create a record from already-encoded payload bytes
    pub fn new(timestamp: Timestamp, raw_data: Vec<u8>) -> Self {
        Self {
            timestamp,
            raw_data,
        }
    }

    /// Encode `payload` and stamp it with `timestamp`
    pub fn encode<T: Serialize + ?Sized>(timestamp: Timestamp, payload: &T) -> Result<Self> {
        Ok(Self::new(timestamp, codec::encode(payload)?))
    }

    /// Creation instant assigned by the store
    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Encoded payload bytes
    #[inline]
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    /// Decode the payload into `T`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        codec::decode(&self.raw_data)
    }

    /// Decode the payload into an untyped JSON value
    pub fn value(&self) -> Result<Value> {
        codec::to_value(&self.raw_data)
    }

    /// Same timestamp, new payload
    pub fn with_raw_data(&self, raw_data: Vec<u8>) -> Self {
        Self::new(self.timestamp, raw_data)
    }

    /// Split into timestamp and payload bytes
    pub fn into_parts(self) -> (Timestamp, Vec<u8>) {
        (self.timestamp, self.raw_data)
    }
}
