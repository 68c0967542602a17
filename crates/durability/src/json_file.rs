//! Single JSON file backend
//!
//! ## File Format
//!
//! The file is one JSON array, in store order:
//!
//! ```json
//! [
//!   {"timestamp": "2024-05-01T09:30:00.123456789Z", "data": {"symbol": "BTC", "qty": 2}},
//!   {"timestamp": "2024-05-01T09:30:01Z", "data": [1, 2, 3]}
//! ]
//! ```
//!
//! `data` is the payload's JSON embedded as-is, never re-encoded as a string.
//! Timestamps are RFC 3339 with every significant sub-second digit.
//!
//! ## Loading
//!
//! - Missing file: empty collection
//! - Empty (or whitespace-only) file: empty collection
//! - Anything else that is not the format above: decode error
//!
//! ## Writing
//!
//! The whole collection is written to a sibling `.tmp` file, synced, then
//! renamed over the target, so a crash mid-write leaves the previous file
//! intact.

use crate::persistence::Persistence;
use chronolog_core::{Error, Record, Result, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk form of a record, borrowed for writing
#[derive(Serialize)]
struct StoredRecordRef<'a> {
    timestamp: Timestamp,
    data: &'a RawValue,
}

/// On-disk form of a record, owned for reading
#[derive(Deserialize)]
struct StoredRecord {
    timestamp: Timestamp,
    data: Box<RawValue>,
}

impl StoredRecord {
    fn into_record(self) -> Record {
        Record::new(self.timestamp, self.data.get().as_bytes().to_vec())
    }
}

/// Backend that keeps the whole collection in one JSON file
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Bind to `path`, creating its parent directory if needed
    ///
    /// The file itself is not created until the first persist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path: PathBuf = path.as_ref().components().collect();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        Ok(Self { path })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write `buf` to `tmp_path`, sync it, then rename it over the target
    fn write_atomic(&self, tmp_path: &Path, buf: &[u8]) -> io::Result<()> {
        let mut file = File::create(tmp_path)?;
        file.write_all(buf)?;
        file.sync_all()?;
        drop(file);
        fs::rename(tmp_path, &self.path)
    }

    fn encode(records: &[Record]) -> Result<Vec<u8>> {
        let mut stored = Vec::with_capacity(records.len());
        for record in records {
            let data: &RawValue = serde_json::from_slice(record.raw_data()).map_err(|e| {
                Error::encode(format!("record at {}: {}", record.timestamp(), e))
            })?;
            stored.push(StoredRecordRef {
                timestamp: record.timestamp(),
                data,
            });
        }
        serde_json::to_vec(&stored).map_err(Error::encode)
    }
}

impl Persistence for JsonFile {
    fn load(&self) -> Result<Vec<Record>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no backing file, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!(path = %self.path.display(), "backing file is empty");
            return Ok(Vec::new());
        }

        let stored: Vec<StoredRecord> = serde_json::from_slice(&bytes)
            .map_err(|e| Error::decode(format!("{}: {}", self.path.display(), e)))?;

        debug!(
            path = %self.path.display(),
            records = stored.len(),
            bytes = bytes.len(),
            "loaded backing file"
        );
        Ok(stored.into_iter().map(StoredRecord::into_record).collect())
    }

    fn persist(&self, records: &[Record]) -> Result<()> {
        let buf = Self::encode(records)?;
        let tmp_path = self.temp_path();

        if let Err(e) = self.write_atomic(&tmp_path, &buf) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!(
            path = %self.path.display(),
            records = records.len(),
            bytes = buf.len(),
            "persisted records"
        );
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
