//! Tests for Table
//!
//! These tests verify:
//! - Creation and the id invariant
//! - Set/get with exact truncation at the field boundary
//! - Occupancy rules (set is not an upsert, get needs a set row)
//! - Delete idempotence
//! - List ordering and restartability

use addressdb::{Config, DbError, Table};

// =============================================================================
// Helper Functions
// =============================================================================

fn scenario_table() -> Table {
    let mut table = Table::create(32, 4).unwrap();
    table.set(0, "Alice", "a@x.com").unwrap();
    table.set(2, "Bob", "b@x.com").unwrap();
    table
}

// =============================================================================
// Creation Tests
// =============================================================================

#[test]
fn test_create_then_list_is_empty() {
    for (width, rows) in [(1, 1), (8, 3), (512, 100)] {
        let table = Table::create(width, rows).unwrap();
        assert_eq!(table.list().count(), 0);
        assert_eq!(table.field_width(), width);
        assert_eq!(table.row_count(), rows);
    }
}

#[test]
fn test_create_rejects_zero_parameters() {
    assert!(matches!(
        Table::create(0, 4),
        Err(DbError::InvalidParameters(_))
    ));
    assert!(matches!(
        Table::create(32, 0),
        Err(DbError::InvalidParameters(_))
    ));
}

#[test]
fn test_from_config_uses_defaults() {
    let table = Table::from_config(&Config::default()).unwrap();
    assert_eq!(table.field_width(), 512);
    assert_eq!(table.row_count(), 100);
}

#[test]
fn test_ids_match_row_index() {
    let mut table = Table::create(8, 5).unwrap();
    for id in 0..5 {
        table.set(id, "n", "e").unwrap();
    }

    let ids: Vec<u32> = table.list().map(|r| r.id()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

// =============================================================================
// Set/Get Tests
// =============================================================================

#[test]
fn test_set_get() {
    let table = scenario_table();
    let record = table.get(0).unwrap();

    assert_eq!(record.id(), 0);
    assert!(record.is_present());
    assert_eq!(record.name(), "Alice");
    assert_eq!(record.email(), "a@x.com");
}

#[test]
fn test_set_truncates_at_field_width_minus_one() {
    let mut table = Table::create(6, 2).unwrap();
    table.set(0, "abcde", "12345").unwrap();
    table.set(1, "abcdef", "1234567890").unwrap();

    let exact = table.get(0).unwrap();
    assert_eq!(exact.name_bytes(), b"abcde");
    assert_eq!(exact.email_bytes(), b"12345");

    let over = table.get(1).unwrap();
    assert_eq!(over.name_bytes(), b"abcde");
    assert_eq!(over.email_bytes(), b"12345");
}

#[test]
fn test_set_on_present_row_fails_and_keeps_record() {
    let mut table = scenario_table();

    let err = table.set(0, "Mallory", "m@x.com").unwrap_err();
    assert!(matches!(err, DbError::AlreadySet { id: 0 }));

    let record = table.get(0).unwrap();
    assert_eq!(record.name(), "Alice");
    assert_eq!(record.email(), "a@x.com");
}

#[test]
fn test_get_unset_row_fails() {
    let table = scenario_table();
    assert!(matches!(table.get(1), Err(DbError::NotSet { id: 1 })));
}

#[test]
fn test_out_of_range_ids_fail() {
    let mut table = Table::create(16, 4).unwrap();

    assert!(matches!(
        table.get(4),
        Err(DbError::IndexOutOfRange { id: 4, row_count: 4 })
    ));
    assert!(matches!(
        table.set(4, "x", "y"),
        Err(DbError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        table.delete(u32::MAX),
        Err(DbError::IndexOutOfRange { .. })
    ));
    assert_eq!(table.list().count(), 0);
}

#[test]
fn test_row_index_rejects_negative_and_large_ids() {
    let table = Table::create(16, 4).unwrap();

    assert_eq!(table.row_index(3).unwrap(), 3);
    assert!(matches!(
        table.row_index(-1),
        Err(DbError::IndexOutOfRange { id: -1, row_count: 4 })
    ));
    assert!(matches!(
        table.row_index(4),
        Err(DbError::IndexOutOfRange { id: 4, .. })
    ));
    assert!(table.row_index(i64::from(u32::MAX) + 1).is_err());
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_then_get_fails() {
    let mut table = scenario_table();
    table.delete(2).unwrap();

    assert!(matches!(table.get(2), Err(DbError::NotSet { id: 2 })));
}

#[test]
fn test_delete_is_idempotent() {
    let mut once = scenario_table();
    once.delete(0).unwrap();

    let mut twice = scenario_table();
    twice.delete(0).unwrap();
    twice.delete(0).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_delete_unset_row_succeeds() {
    let mut table = Table::create(8, 2).unwrap();
    table.delete(1).unwrap();
    assert_eq!(table, Table::create(8, 2).unwrap());
}

#[test]
fn test_delete_allows_set_again() {
    let mut table = scenario_table();
    table.delete(0).unwrap();
    table.set(0, "Carol", "c@x.com").unwrap();

    assert_eq!(table.get(0).unwrap().name(), "Carol");
}

// =============================================================================
// List Tests
// =============================================================================

#[test]
fn test_list_scenario() {
    let table = scenario_table();
    let records: Vec<_> = table.list().collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), 0);
    assert_eq!(records[0].name(), "Alice");
    assert_eq!(records[0].email(), "a@x.com");
    assert_eq!(records[1].id(), 2);
    assert_eq!(records[1].name(), "Bob");
    assert_eq!(records[1].email(), "b@x.com");
}

#[test]
fn test_list_is_restartable() {
    let table = scenario_table();

    let iter = table.list();
    let first: Vec<u32> = iter.clone().map(|r| r.id()).collect();
    let second: Vec<u32> = iter.map(|r| r.id()).collect();
    let third: Vec<u32> = table.list().map(|r| r.id()).collect();

    assert_eq!(first, vec![0, 2]);
    assert_eq!(first, second);
    assert_eq!(first, third);
}
