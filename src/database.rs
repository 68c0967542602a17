//! Main database entry point for Chronolog.
//!
//! This module provides the `Database` struct, the record store itself.
//!
//! ## Locking
//!
//! The record collection lives behind a single `RwLock`:
//! - Reads (`get_*`, `count`, `exists`, `first`) share the lock
//! - Mutations (`add`, `delete_*`, `update_by_condition`, `save`, `close`)
//!   take it exclusively, and persist inside the exclusive section
//!
//! ## Persist failures
//!
//! When auto-persist is on and the backend fails after an in-memory change,
//! the change is kept, the store is marked dirty and the I/O error is
//! returned. The next successful `save` (or auto-persisting mutation) writes
//! it out.
//!
//! ## Timestamp capture
//!
//! `add` reads the clock before taking the exclusive lock. Under heavy
//! contention two writers can therefore enter the lock in the opposite order
//! to their timestamps; each record still lands at its timestamp's sorted
//! position.

use crate::options::DatabaseOptions;
use chronolog_core::{codec, Clock, Error, Record, Result, SystemClock, Timestamp};
use chronolog_durability::{Ephemeral, JsonFile, Persistence};
use chronolog_storage::RecordLog;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct State {
    log: RecordLog,
    /// In-memory changes not yet persisted
    dirty: bool,
}

/// The Chronolog record store.
///
/// Create one with [`Database::open`] or [`Database::builder`]. A `Database`
/// is `Send + Sync`; share it between threads with `Arc<Database>`.
///
/// # Example
///
/// ```ignore
/// use chronolog::prelude::*;
///
/// let db = Database::open("./data/trades.json")?;
///
/// db.add(&json!({"symbol": "BTC", "side": "buy", "qty": 2}))?;
///
/// let recent: Vec<serde_json::Value> = db.get_latest(10)?;
/// let buys = db.count(|r| r.value().map(|v| v["side"] == "buy").unwrap_or(false));
///
/// db.close()?;
/// ```
#[derive(Debug)]
pub struct Database {
    state: RwLock<State>,
    persistence: Arc<dyn Persistence>,
    clock: Arc<dyn Clock>,
    auto_persist: bool,
}

impl Database {
    /// Open the store backed by the JSON file at `path`.
    ///
    /// Uses default options: auto-persist on, existing file loaded. The
    /// parent directory is created if missing; a missing file is an empty
    /// store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Open the store at `path` with explicit options.
    pub fn open_with(path: impl AsRef<Path>, options: DatabaseOptions) -> Result<Self> {
        Self::builder().path(path).options(options).open()
    }

    /// Create a store with no disk I/O.
    ///
    /// All data is lost when the store is dropped.
    pub fn ephemeral() -> Result<Self> {
        Self::builder()
            .persistence(Arc::new(Ephemeral::new()))
            .open()
    }

    /// Create a builder for store configuration.
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Append a payload, stamped with the current instant.
    ///
    /// The record is inserted after every existing record with an equal or
    /// earlier timestamp. With auto-persist on, the whole collection is
    /// written out before returning.
    pub fn add<T: Serialize + ?Sized>(&self, payload: &T) -> Result<()> {
        let raw = codec::encode(payload)?;
        let record = Record::new(self.clock.now(), raw);

        let mut state = self.state.write();
        state.log.insert(record);
        self.finish(&mut state, true)
    }

    /// Remove every record matching `pred`.
    ///
    /// Persists when auto-persist is on, even if nothing matched. Returns the
    /// number of records removed.
    pub fn delete_by_condition<P>(&self, pred: P) -> Result<usize>
    where
        P: FnMut(&Record) -> bool,
    {
        let mut state = self.state.write();
        let removed = state.log.remove_matching(pred);
        self.finish(&mut state, removed > 0)?;
        Ok(removed)
    }

    /// Rewrite the payload of every record matching `pred`.
    ///
    /// Each match is decoded to a JSON [`Value`], passed through `transform`,
    /// and re-encoded; its timestamp is kept. All new payloads are computed
    /// before any is applied, so a decode or encode failure leaves the store
    /// untouched. Persists once, only if something matched. Returns the number
    /// of records updated.
    pub fn update_by_condition<P, F>(&self, mut pred: P, mut transform: F) -> Result<usize>
    where
        P: FnMut(&Record) -> bool,
        F: FnMut(Value) -> Value,
    {
        let mut state = self.state.write();

        let mut staged = Vec::new();
        for (index, record) in state.log.iter().enumerate() {
            if !pred(record) {
                continue;
            }
            let current: Value = codec::decode_record(record)?;
            staged.push((index, codec::encode(&transform(current))?));
        }

        if staged.is_empty() {
            return Ok(0);
        }

        let updated = staged.len();
        for (index, raw) in staged {
            state.log.replace_payload(index, raw);
        }
        self.finish(&mut state, true)?;
        Ok(updated)
    }

    /// Remove every record stamped before `cutoff`.
    ///
    /// A record stamped exactly `cutoff` is kept. Returns the number removed.
    pub fn delete_before(&self, cutoff: Timestamp) -> Result<usize> {
        let mut state = self.state.write();
        let removed = state.log.truncate_before(cutoff);
        self.finish(&mut state, removed > 0)?;
        Ok(removed)
    }

    /// Remove every record. Returns the number removed.
    pub fn delete_all(&self) -> Result<usize> {
        let mut state = self.state.write();
        let removed = state.log.clear();
        self.finish(&mut state, removed > 0)?;
        Ok(removed)
    }

    /// Persist the whole collection, regardless of the auto-persist setting.
    pub fn save(&self) -> Result<()> {
        let mut state = self.state.write();
        self.persist_locked(&mut state)
    }

    /// Persist and release the store.
    ///
    /// After calling `close()`, the store should not be mutated.
    pub fn close(&self) -> Result<()> {
        self.save()?;
        debug!(path = ?self.path(), "closed record store");
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// The newest `min(n, len)` payloads, oldest first.
    pub fn get_latest<T: DeserializeOwned>(&self, n: usize) -> Result<Vec<T>> {
        let state = self.state.read();
        codec::decode_all(state.log.latest(n))
    }

    /// Payloads stamped within `[start, end]`, both ends inclusive.
    ///
    /// Empty when `start > end`.
    pub fn get_by_time_range<T: DeserializeOwned>(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<T>> {
        let state = self.state.read();
        codec::decode_all(state.log.range(start, end))
    }

    /// Payloads of every record matching `pred`, in store order.
    ///
    /// `pred` sees the undecoded record, so it can filter on the timestamp or
    /// raw bytes without decoding.
    pub fn get_by_condition<T, P>(&self, mut pred: P) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        P: FnMut(&Record) -> bool,
    {
        let state = self.state.read();
        state
            .log
            .iter()
            .filter(|r| pred(*r))
            .map(codec::decode_record)
            .collect()
    }

    /// Payload of the earliest record matching `pred`, if any.
    pub fn first<T, P>(&self, mut pred: P) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: FnMut(&Record) -> bool,
    {
        let state = self.state.read();
        state
            .log
            .iter()
            .find(|r| pred(*r))
            .map(codec::decode_record)
            .transpose()
    }

    /// Number of records matching `pred`.
    pub fn count<P>(&self, mut pred: P) -> usize
    where
        P: FnMut(&Record) -> bool,
    {
        let state = self.state.read();
        state.log.iter().filter(|r| pred(*r)).count()
    }

    /// Check if any record matches `pred`.
    pub fn exists<P>(&self, mut pred: P) -> bool
    where
        P: FnMut(&Record) -> bool,
    {
        let state = self.state.read();
        state.log.iter().any(|r| pred(r))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.state.read().log.len()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.state.read().log.is_empty()
    }

    /// Timestamp of the oldest record.
    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.state.read().log.first_timestamp()
    }

    /// Timestamp of the newest record.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.state.read().log.last_timestamp()
    }

    /// Backing file path, or `None` for an ephemeral store.
    pub fn path(&self) -> Option<&Path> {
        self.persistence.location()
    }

    /// Check if mutations persist immediately.
    pub fn is_auto_persist(&self) -> bool {
        self.auto_persist
    }

    /// Check if there are in-memory changes that have not been persisted.
    pub fn is_dirty(&self) -> bool {
        self.state.read().dirty
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Record a mutation and apply the auto-persist policy.
    fn finish(&self, state: &mut State, changed: bool) -> Result<()> {
        state.dirty |= changed;
        if self.auto_persist {
            self.persist_locked(state)
        } else {
            Ok(())
        }
    }

    /// Caller must hold the write lock.
    fn persist_locked(&self, state: &mut State) -> Result<()> {
        self.persistence.persist(state.log.as_slice())?;
        state.dirty = false;
        Ok(())
    }
}

/// Builder for store configuration.
///
/// # Example
///
/// ```ignore
/// // Buffer writes in memory, persist explicitly
/// let db = Database::builder()
///     .path("./data/prompts.json")
///     .auto_persist(false)
///     .open()?;
///
/// // Fresh store even if a stale file exists
/// let db = Database::builder()
///     .path("./data/prompts.json")
///     .initial_load(false)
///     .open()?;
/// ```
pub struct DatabaseBuilder {
    path: Option<PathBuf>,
    persistence: Option<Arc<dyn Persistence>>,
    clock: Option<Arc<dyn Clock>>,
    options: DatabaseOptions,
}

impl DatabaseBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            path: None,
            persistence: None,
            clock: None,
            options: DatabaseOptions::default(),
        }
    }

    /// Back the store with the JSON file at `path`.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Back the store with a custom persistence backend.
    ///
    /// Takes precedence over [`path`](Self::path).
    pub fn persistence(mut self, persistence: Arc<dyn Persistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Stamp records with `clock` instead of the system clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace all options at once.
    pub fn options(mut self, options: DatabaseOptions) -> Self {
        self.options = options;
        self
    }

    /// Persist after every mutation (default `true`).
    ///
    /// When off, mutations stay in memory until [`Database::save`] or
    /// [`Database::close`].
    pub fn auto_persist(mut self, enabled: bool) -> Self {
        self.options.auto_persist = enabled;
        self
    }

    /// Load existing records on open (default `true`).
    ///
    /// When off, the store starts empty and the next persist overwrites
    /// whatever the backend held.
    pub fn initial_load(mut self, enabled: bool) -> Self {
        self.options.initial_load = enabled;
        self
    }

    /// Open the store.
    pub fn open(self) -> Result<Database> {
        let persistence: Arc<dyn Persistence> = match (self.persistence, self.path) {
            (Some(persistence), _) => persistence,
            (None, Some(path)) => Arc::new(JsonFile::open(path)?),
            (None, None) => return Err(Error::config("no path or persistence backend configured")),
        };

        let records = if self.options.initial_load {
            persistence.load()?
        } else {
            Vec::new()
        };
        let log = RecordLog::from_records(records);

        info!(
            path = ?persistence.location(),
            records = log.len(),
            auto_persist = self.options.auto_persist,
            initial_load = self.options.initial_load,
            "opened record store"
        );

        Ok(Database {
            state: RwLock::new(State { log, dirty: false }),
            persistence,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock::new())),
            auto_persist: self.options.auto_persist,
        })
    }
}

impl Default for DatabaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
