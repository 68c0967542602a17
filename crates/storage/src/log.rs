//! Time-ordered record collection
//!
//! `RecordLog` keeps records sorted non-decreasing by timestamp. Records that
//! share a timestamp stay in insertion order: a new record is placed after
//! every existing record whose timestamp is less than or equal to its own.
//!
//! # Boundary lookups
//!
//! Every boundary is found by binary search (`partition_point`), never by a
//! scan:
//!
//! | Boundary | First index where |
//! |----------|-------------------|
//! | insertion point | `ts > new` |
//! | range start (inclusive) | `ts >= start` |
//! | range end (exclusive) | `ts > end` |
//! | delete-before cutoff | `ts >= cutoff` |
//!
//! `RecordLog` holds no lock. The owning store serializes access to it.

use chronolog_core::{Record, Timestamp};

/// Records sorted by timestamp with stable ties
///
/// # Example
///
/// ```
/// use chronolog_core::{Record, Timestamp};
/// use chronolog_storage::RecordLog;
///
/// let mut log = RecordLog::new();
/// log.insert(Record::new(Timestamp::from_unix_nanos(30), b"3".to_vec()));
/// log.insert(Record::new(Timestamp::from_unix_nanos(10), b"1".to_vec()));
/// log.insert(Record::new(Timestamp::from_unix_nanos(20), b"2".to_vec()));
///
/// let window = log.range(Timestamp::from_unix_nanos(10), Timestamp::from_unix_nanos(20));
/// assert_eq!(window.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordLog {
    records: Vec<Record>,
}

impl RecordLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from records in arbitrary order
    ///
    /// Uses a stable sort, so records with equal timestamps keep the order
    /// they were given in.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by_key(Record::timestamp);
        Self { records }
    }

    /// Number of records
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the log holds no records
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in timestamp order
    #[inline]
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Iterate records in timestamp order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Timestamp of the oldest record
    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.records.first().map(Record::timestamp)
    }

    /// Timestamp of the newest record
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.records.last().map(Record::timestamp)
    }

    // ========================================================================
    // Binary-search boundaries
    // ========================================================================

    /// First index whose timestamp is `>= ts`
    #[inline]
    pub fn lower_bound(&self, ts: Timestamp) -> usize {
        self.records.partition_point(|r| r.timestamp() < ts)
    }

    /// First index whose timestamp is `> ts`
    ///
    /// This is also where a new record stamped `ts` is inserted, which keeps
    /// it behind any existing ties.
    #[inline]
    pub fn upper_bound(&self, ts: Timestamp) -> usize {
        self.records.partition_point(|r| r.timestamp() <= ts)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// The newest `min(n, len)` records, oldest first
    pub fn latest(&self, n: usize) -> &[Record] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Records with `start <= timestamp <= end`
    ///
    /// Empty when `start > end`.
    pub fn range(&self, start: Timestamp, end: Timestamp) -> &[Record] {
        let lo = self.lower_bound(start);
        let hi = self.upper_bound(end);
        if lo >= hi {
            return &[];
        }
        &self.records[lo..hi]
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Insert a record at its sorted position and return that index
    pub fn insert(&mut self, record: Record) -> usize {
        let idx = self.upper_bound(record.timestamp());
        self.records.insert(idx, record);
        idx
    }

    /// Remove every record matching `pred`, keeping survivors in order
    ///
    /// Returns the number of records removed.
    pub fn remove_matching<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&Record) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|r| !pred(r));
        before - self.records.len()
    }

    /// Drop every record older than `cutoff`
    ///
    /// A record stamped exactly `cutoff` is kept. Returns the number removed.
    pub fn truncate_before(&mut self, cutoff: Timestamp) -> usize {
        let idx = self.lower_bound(cutoff);
        self.records.drain(..idx);
        idx
    }

    /// Remove all records and return how many there were
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    /// Swap the payload of the record at `index`, keeping its timestamp
    ///
    /// Returns `false` if `index` is out of bounds.
    pub fn replace_payload(&mut self, index: usize, raw_data: Vec<u8>) -> bool {
        match self.records.get_mut(index) {
            Some(slot) => {
                *slot = slot.with_raw_data(raw_data);
                true
            }
            None => false,
        }
    }
}
