//! Mutation Tests
//!
//! Tests for add, delete_by_condition, update_by_condition, delete_before
//! and delete_all.

use crate::common::*;

fn id_of(record: &Record) -> i64 {
    record.decode::<TestRecord>().map(|r| r.id).unwrap_or(-1)
}

// ============================================================================
// add
// ============================================================================

#[test]
fn add_non_finite_float_is_encode_error() {
    let test_db = TestDb::new();

    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = test_db.db.add(&bad).unwrap_err();
        assert!(err.is_encode(), "expected encode error, got {:?}", err);
    }

    assert!(test_db.db.is_empty());
    assert!(!test_db.db.is_dirty());
    assert!(!test_db.path.exists());
}

#[test]
fn add_nested_non_finite_float_leaves_store_readable() {
    let test_db = TestDb::new();
    test_db.add_at(10, &TestRecord::new(1));

    let bad = TestRecord {
        id: 2,
        name: "nan".to_string(),
        value: f64::NAN,
    };
    assert!(test_db.db.add(&bad).unwrap_err().is_encode());

    let all: Vec<TestRecord> = test_db.db.get_latest(10).unwrap();
    assert_eq!(ids(&all), vec![1]);

    let reopened: Vec<TestRecord> = test_db.open_fresh().get_latest(10).unwrap();
    assert_eq!(ids(&reopened), vec![1]);
}

// ============================================================================
// delete_by_condition
// ============================================================================

#[test]
fn delete_by_condition_removes_matches_only() {
    let test_db = db_10_20_30();

    let removed = test_db.db.delete_by_condition(|r| id_of(r) == 2).unwrap();
    assert_eq!(removed, 1);

    let rest: Vec<TestRecord> = test_db.db.get_latest(10).unwrap();
    assert_eq!(ids(&rest), vec![1, 3]);
}

#[test]
fn delete_by_condition_without_matches_keeps_everything() {
    let test_db = db_10_20_30();

    assert_eq!(test_db.db.delete_by_condition(|_| false).unwrap(), 0);
    assert_eq!(test_db.db.len(), 3);
}

#[test]
fn delete_by_condition_is_persisted() {
    let test_db = db_10_20_30();
    test_db.db.delete_by_condition(|r| id_of(r) != 3).unwrap();

    let reopened: Vec<TestRecord> = test_db.open_fresh().get_latest(10).unwrap();
    assert_eq!(ids(&reopened), vec![3]);
}

// ============================================================================
// update_by_condition
// ============================================================================

#[test]
fn update_rewrites_payload_and_keeps_timestamp() {
    let test_db = db_10_20_30();

    let updated = test_db
        .db
        .update_by_condition(
            |r| id_of(r) == 2,
            |mut v| {
                v["name"] = json!("renamed");
                v
            },
        )
        .unwrap();
    assert_eq!(updated, 1);

    let at_20: Vec<TestRecord> = test_db.db.get_by_time_range(ts(20), ts(20)).unwrap();
    assert_eq!(at_20.len(), 1);
    assert_eq!(at_20[0].id, 2);
    assert_eq!(at_20[0].name, "renamed");
    assert_eq!(test_db.db.len(), 3);
}

#[test]
fn update_leaves_unmatched_records_byte_identical() {
    let test_db = TestDb::new();
    test_db.add_at(10, &TestRecord::new(1));
    test_db.add_at(20, &TestRecord::new(2));

    let before: Vec<Vec<u8>> = {
        let mut raws = Vec::new();
        test_db.db.count(|r| {
            raws.push(r.raw_data().to_vec());
            false
        });
        raws
    };

    test_db
        .db
        .update_by_condition(|r| id_of(r) == 2, |_| json!({"replaced": true}))
        .unwrap();

    let mut after = Vec::new();
    test_db.db.count(|r| {
        after.push(r.raw_data().to_vec());
        false
    });
    assert_eq!(after[0], before[0]);
    assert_ne!(after[1], before[1]);
}

#[test]
fn update_can_change_payload_shape() {
    let db = Database::ephemeral().unwrap();
    db.add(&json!({"status": "pending"})).unwrap();

    db.update_by_condition(|_| true, |_| json!("done")).unwrap();

    let all: Vec<String> = db.get_latest(1).unwrap();
    assert_eq!(all, vec!["done"]);
}

#[test]
fn update_stores_exactly_what_transform_returns() {
    let db = Database::ephemeral().unwrap();
    db.add(&json!({"value": 1.0})).unwrap();

    // A Value cannot hold NaN; json! maps it to null before the store sees it
    let mut returned = Value::Null;
    db.update_by_condition(
        |_| true,
        |mut v| {
            v["value"] = json!(f64::NAN);
            returned = v.clone();
            v
        },
    )
    .unwrap();

    let stored: Vec<Value> = db.get_latest(1).unwrap();
    assert_eq!(stored, vec![returned]);
    assert_eq!(stored[0], json!({"value": null}));
}

#[test]
fn update_without_matches_returns_zero() {
    let test_db = db_10_20_30();

    let updated = test_db
        .db
        .update_by_condition(|_| false, |_| json!(null))
        .unwrap();
    assert_eq!(updated, 0);

    let all: Vec<TestRecord> = test_db.db.get_latest(10).unwrap();
    assert_eq!(ids(&all), vec![1, 2, 3]);
}

#[test]
fn update_is_persisted() {
    let test_db = db_10_20_30();
    test_db
        .db
        .update_by_condition(
            |_| true,
            |mut v| {
                v["value"] = json!(0.0);
                v
            },
        )
        .unwrap();

    let reopened: Vec<TestRecord> = test_db.open_fresh().get_latest(10).unwrap();
    assert!(reopened.iter().all(|r| r.value == 0.0));
    assert_eq!(ids(&reopened), vec![1, 2, 3]);
}

// ============================================================================
// delete_before
// ============================================================================

#[test]
fn delete_before_keeps_record_at_cutoff() {
    let test_db = db_10_20_30();

    assert_eq!(test_db.db.delete_before(ts(20)).unwrap(), 1);

    let rest: Vec<TestRecord> = test_db.db.get_latest(10).unwrap();
    assert_eq!(ids(&rest), vec![2, 3]);
}

#[test]
fn delete_before_earliest_is_noop() {
    let test_db = db_10_20_30();

    assert_eq!(test_db.db.delete_before(ts(10)).unwrap(), 0);
    assert_eq!(test_db.db.len(), 3);
}

#[test]
fn delete_before_past_latest_empties_store() {
    let test_db = db_10_20_30();

    assert_eq!(test_db.db.delete_before(ts(31)).unwrap(), 3);
    assert!(test_db.db.is_empty());
    assert!(test_db.open_fresh().is_empty());
}

#[test]
fn delete_before_removes_all_ties_below_cutoff() {
    let test_db = TestDb::new();
    test_db.add_at(5, &TestRecord::new(1));
    test_db.add_at(5, &TestRecord::new(2));
    test_db.add_at(6, &TestRecord::new(3));

    assert_eq!(test_db.db.delete_before(ts(6)).unwrap(), 2);
    assert_eq!(test_db.db.first_timestamp(), Some(ts(6)));
}

// ============================================================================
// delete_all
// ============================================================================

#[test]
fn delete_all_empties_store_and_file() {
    let test_db = db_10_20_30();

    assert_eq!(test_db.db.delete_all().unwrap(), 3);
    assert!(test_db.db.is_empty());

    let latest: Vec<TestRecord> = test_db.db.get_latest(10).unwrap();
    assert!(latest.is_empty());
    assert!(test_db.open_fresh().is_empty());
}

#[test]
fn store_accepts_adds_after_delete_all() {
    let test_db = db_10_20_30();
    test_db.db.delete_all().unwrap();

    test_db.add_at(1, &TestRecord::new(9));

    let all: Vec<TestRecord> = test_db.db.get_latest(10).unwrap();
    assert_eq!(ids(&all), vec![9]);
}
