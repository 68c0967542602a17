//! Core types for the record store
//!
//! This module defines the fundamental types used throughout the system:
//! - [`Timestamp`]: Store-assigned creation instant of a record

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Creation instant assigned to a record by the store
///
/// Timestamps are totally ordered and carry nanosecond precision. They are
/// persisted as RFC 3339 strings with every significant sub-second digit, so
/// a timestamp written to disk reads back bit-for-bit equal.
///
/// # Examples
///
/// ```
/// use chronolog_core::Timestamp;
///
/// let a = Timestamp::from_unix_nanos(10);
/// let b = Timestamp::from_unix_nanos(20);
/// assert!(a < b);
/// assert_eq!(a.to_string(), "1970-01-01T00:00:00.000000010Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current wall-clock instant
    ///
    /// This is the raw system time. Stores take their timestamps from a
    /// [`Clock`](crate::clock::Clock), which additionally keeps them from
    /// going backwards.
    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    /// Create a timestamp from nanoseconds since the Unix epoch
    pub fn from_unix_nanos(nanos: i64) -> Self {
        Timestamp(Utc.timestamp_nanos(nanos))
    }

    /// Nanoseconds since the Unix epoch
    ///
    /// Returns `None` for instants outside the range representable in an
    /// `i64` (roughly years 1677 to 2262).
    pub fn unix_nanos(&self) -> Option<i64> {
        self.0.timestamp_nanos_opt()
    }

    /// Milliseconds since the Unix epoch
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Parse an RFC 3339 timestamp, normalizing the offset to UTC
    pub fn parse_rfc3339(s: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Timestamp(dt.with_timezone(&Utc)))
            .map_err(|e| Error::decode(format!("invalid timestamp {:?}: {}", s, e)))
    }

    /// Format as RFC 3339 in UTC with as many fractional digits as needed
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Timestamp::parse_rfc3339(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse_rfc3339(&text).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}
