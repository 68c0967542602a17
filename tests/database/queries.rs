//! Query Tests
//!
//! Tests for get_latest, get_by_time_range, get_by_condition, first, count
//! and exists.

use crate::common::*;

fn id_of(record: &Record) -> i64 {
    record.decode::<TestRecord>().map(|r| r.id).unwrap_or(-1)
}

// ============================================================================
// get_latest
// ============================================================================

#[test]
fn latest_returns_newest_oldest_first() {
    let test_db = db_10_20_30();

    let latest: Vec<TestRecord> = test_db.db.get_latest(2).unwrap();
    assert_eq!(ids(&latest), vec![2, 3]);
}

#[test]
fn latest_clamps_to_len() {
    let test_db = db_10_20_30();

    let latest: Vec<TestRecord> = test_db.db.get_latest(100).unwrap();
    assert_eq!(ids(&latest), vec![1, 2, 3]);
}

#[test]
fn latest_zero_is_empty() {
    let test_db = db_10_20_30();

    let latest: Vec<TestRecord> = test_db.db.get_latest(0).unwrap();
    assert!(latest.is_empty());
}

#[test]
fn add_then_latest_round_trips_payload() {
    let test_db = TestDb::new();
    let original = TestRecord {
        id: 42,
        name: "unicode ✓ \"quoted\"".to_string(),
        value: -0.25,
    };
    test_db.add_at(5, &original);

    let latest: Vec<TestRecord> = test_db.db.get_latest(1).unwrap();
    assert_eq!(latest, vec![original]);
}

#[test]
fn latest_into_wrong_shape_is_decode_error() {
    let test_db = db_10_20_30();

    let err = test_db.db.get_latest::<Vec<u32>>(1).unwrap_err();
    assert!(err.is_decode());
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn out_of_order_clock_still_yields_sorted_store() {
    let test_db = TestDb::new();
    test_db.add_at(30, &TestRecord::new(3));
    test_db.add_at(10, &TestRecord::new(1));
    test_db.add_at(20, &TestRecord::new(2));

    let all: Vec<TestRecord> = test_db.db.get_latest(10).unwrap();
    assert_eq!(ids(&all), vec![1, 2, 3]);
    assert_eq!(test_db.db.first_timestamp(), Some(ts(10)));
    assert_eq!(test_db.db.last_timestamp(), Some(ts(30)));
}

#[test]
fn equal_timestamps_keep_insertion_order() {
    let test_db = TestDb::new();
    for id in 0..5 {
        test_db.add_at(100, &TestRecord::new(id));
    }
    test_db.add_at(50, &TestRecord::new(-1));

    let all: Vec<TestRecord> = test_db.db.get_latest(10).unwrap();
    assert_eq!(ids(&all), vec![-1, 0, 1, 2, 3, 4]);
}

// ============================================================================
// get_by_time_range
// ============================================================================

#[test]
fn range_is_inclusive_at_both_ends() {
    let test_db = db_10_20_30();
    let db = &test_db.db;

    let r: Vec<TestRecord> = db.get_by_time_range(ts(10), ts(20)).unwrap();
    assert_eq!(ids(&r), vec![1, 2]);

    let r: Vec<TestRecord> = db.get_by_time_range(ts(15), ts(30)).unwrap();
    assert_eq!(ids(&r), vec![2, 3]);

    let r: Vec<TestRecord> = db.get_by_time_range(ts(31), ts(40)).unwrap();
    assert!(r.is_empty());

    let r: Vec<TestRecord> = db.get_by_time_range(ts(20), ts(20)).unwrap();
    assert_eq!(ids(&r), vec![2]);
}

#[test]
fn range_with_start_after_end_is_empty() {
    let test_db = db_10_20_30();

    let r: Vec<TestRecord> = test_db.db.get_by_time_range(ts(30), ts(10)).unwrap();
    assert!(r.is_empty());
}

#[test]
fn range_includes_every_tied_record() {
    let test_db = TestDb::new();
    test_db.add_at(10, &TestRecord::new(1));
    test_db.add_at(20, &TestRecord::new(2));
    test_db.add_at(20, &TestRecord::new(3));
    test_db.add_at(30, &TestRecord::new(4));

    let r: Vec<TestRecord> = test_db.db.get_by_time_range(ts(20), ts(20)).unwrap();
    assert_eq!(ids(&r), vec![2, 3]);
}

#[test]
fn range_on_empty_store_is_empty() {
    let db = Database::ephemeral().unwrap();

    let r: Vec<Value> = db.get_by_time_range(ts(0), ts(i64::MAX)).unwrap();
    assert!(r.is_empty());
}

// ============================================================================
// get_by_condition / first
// ============================================================================

#[test]
fn condition_filters_in_store_order() {
    let test_db = TestDb::new();
    for id in 0..10 {
        test_db.add_at(id * 10, &TestRecord::new(id));
    }

    let even: Vec<TestRecord> = test_db
        .db
        .get_by_condition(|r| id_of(r) % 2 == 0)
        .unwrap();
    assert_eq!(ids(&even), vec![0, 2, 4, 6, 8]);
}

#[test]
fn condition_can_filter_on_timestamp_without_decoding() {
    let test_db = db_10_20_30();

    let late: Vec<TestRecord> = test_db
        .db
        .get_by_condition(|r| r.timestamp() > ts(15))
        .unwrap();
    assert_eq!(ids(&late), vec![2, 3]);
}

#[test]
fn condition_matching_nothing_is_empty() {
    let test_db = db_10_20_30();

    let none: Vec<TestRecord> = test_db.db.get_by_condition(|_| false).unwrap();
    assert!(none.is_empty());
}

#[test]
fn first_returns_earliest_match() {
    let test_db = db_10_20_30();

    let found: Option<TestRecord> = test_db.db.first(|r| id_of(r) >= 2).unwrap();
    assert_eq!(found, Some(TestRecord::new(2)));
}

#[test]
fn first_without_match_is_none() {
    let test_db = db_10_20_30();

    let found: Option<TestRecord> = test_db.db.first(|r| id_of(r) > 99).unwrap();
    assert_eq!(found, None);
}

#[test]
fn first_with_untyped_values() {
    let db = Database::ephemeral().unwrap();
    db.add(&json!({"kind": "login", "user": "ana"})).unwrap();
    db.add(&json!({"kind": "logout", "user": "ana"})).unwrap();

    let found: Option<Value> = db
        .first(|r| r.value().map(|v| v["kind"] == "logout").unwrap_or(false))
        .unwrap();
    assert_eq!(found, Some(json!({"kind": "logout", "user": "ana"})));
}

// ============================================================================
// count / exists
// ============================================================================

#[test]
fn count_and_exists() {
    let test_db = db_10_20_30();
    let db = &test_db.db;

    assert_eq!(db.count(|_| true), 3);
    assert_eq!(db.count(|r| id_of(r) > 1), 2);
    assert_eq!(db.count(|_| false), 0);

    assert!(db.exists(|r| id_of(r) == 3));
    assert!(!db.exists(|r| id_of(r) == 4));
}

#[test]
fn exists_on_empty_store_is_false() {
    let db = Database::ephemeral().unwrap();

    assert!(!db.exists(|_| true));
    assert_eq!(db.count(|_| true), 0);
}

#[test]
fn exists_stops_at_first_match() {
    let test_db = db_10_20_30();
    let mut visited = 0;

    assert!(test_db.db.exists(|_| {
        visited += 1;
        true
    }));
    assert_eq!(visited, 1);
}
