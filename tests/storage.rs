//! Integration tests for CSV load/save of the roster and ledger files.

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use tournament_registration::{
    load_ledger, load_roster, load_roster_with_capacity, save_ledger, save_roster, PlayerId,
    Roster, RosterError, WildcardLedger, FIRST_PLAYER_ID,
};

fn at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(10, minute, 0)
        .unwrap()
}

#[test]
fn roster_round_trip_keeps_ids_fields_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.csv");

    let mut r = Roster::new();
    let a = r.enqueue_at("Alice", 3, "North Uni", false, at(1)).unwrap();
    let b = r.enqueue_at("Bob", 7, "South Uni", true, at(2)).unwrap();
    r.check_in(a).unwrap();
    save_roster(&path, &r).unwrap();

    let loaded = load_roster(&path);
    assert_eq!(loaded.list_all(), r.list_all());
    assert_eq!(loaded.next_id(), b + 1);
    assert!(loaded.get(a).unwrap().checked_in);
    assert!(loaded.get(b).unwrap().is_wildcard());
    assert_eq!(loaded.get(a).unwrap().registered_at(), "2025-06-01 10:01:00");
}

#[test]
fn roster_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.csv");

    let mut r = Roster::new();
    r.enqueue_at("Alice", 3, "North Uni", false, at(1)).unwrap();
    save_roster(&path, &r).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "1000,Alice,3,North Uni,0,2025-06-01 10:01:00,0,1\n");
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let roster = load_roster(dir.path().join("nope.csv"));
    let ledger = load_ledger(dir.path().join("nope.csv"));
    assert!(roster.is_empty());
    assert_eq!(roster.next_id(), FIRST_PLAYER_ID);
    assert!(ledger.is_empty());
}

#[test]
fn malformed_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.csv");
    fs::write(
        &path,
        "1000,Alice,3,Uni,0,2025-06-01 10:01:00,0,1\n\
         abc,Bad,3,Uni,0,2025-06-01 10:02:00,0,1\n\
         1002,Short,3\n\
         1003,BadRank,x,Uni,0,2025-06-01 10:03:00,0,1\n\
         1004,Dave,5,Uni,1,2025-06-01 10:04:00,0,0\r\n",
    )
    .unwrap();

    let r = load_roster(&path);
    let ids: Vec<_> = r.list_all().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![1000, 1004]);
    assert!(r.get(1004).unwrap().checked_in);
    assert_eq!(r.next_id(), 1005);
}

#[test]
fn bad_timestamp_survives_load_and_sorts_last() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.csv");
    fs::write(
        &path,
        "1000,Broken,1,Uni,0,yesterday-ish,0,1\n\
         1001,Fine,1,Uni,0,2025-06-01 10:01:00,0,0\n",
    )
    .unwrap();

    let r = load_roster_with_capacity(&path, 1);
    assert_eq!(r.list_all()[0].id(), 1001);
    assert!(r.get(1001).unwrap().in_tournament());
    assert!(!r.get(1000).unwrap().in_tournament());
    assert_eq!(r.get(1000).unwrap().registered_at(), "yesterday-ish");
}

#[test]
fn load_recomputes_active_flags_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.csv");
    fs::write(
        &path,
        "1005,Late,1,Uni,0,2025-06-01 10:05:00,0,1\n\
         1001,Early,1,Uni,0,2025-06-01 10:01:00,0,0\n\
         1009,Wild,1,Uni,0,2025-06-01 10:09:00,1,0\n",
    )
    .unwrap();

    let r = load_roster_with_capacity(&path, 2);
    let ids: Vec<_> = r.list_all().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![1009, 1001, 1005]);
    assert!(!r.get(1005).unwrap().in_tournament());
    assert_eq!(r.next_id(), 1010);
}

#[test]
fn ledger_round_trip_and_reordering_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wildcard.csv");
    fs::write(
        &path,
        "ZED,Zed,9,Uni,0\n\
         OLD,Old,1,Uni,1\n\
         bad line\n\
         AMY,Amy,4,Uni,0\n",
    )
    .unwrap();

    let mut ledger = load_ledger(&path);
    let codes: Vec<_> = ledger.list().iter().map(|c| c.code.clone()).collect();
    assert_eq!(codes, vec!["OLD", "AMY", "ZED"]);
    assert!(ledger.list()[0].used);

    // A used coupon stays listed but cannot be redeemed.
    assert!(ledger.redeem("OLD").is_err());
    ledger.redeem("AMY").unwrap();
    save_ledger(&path, &ledger).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "OLD,Old,1,Uni,1\nZED,Zed,9,Uni,0\n");
}

#[test]
fn empty_ledger_saves_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wildcard.csv");
    fs::write(&path, "OLD,Old,1,Uni,0\n").unwrap();

    save_ledger(&path, &WildcardLedger::new()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn save_to_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("player.csv");
    assert!(save_roster(&path, &Roster::new()).is_err());
}

#[test]
fn repeated_id_keeps_only_the_first_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.csv");
    fs::write(
        &path,
        "1000,First,1,Uni,0,2025-06-01 10:01:00,0,1\n\
         1000,Copy,2,Uni,0,2025-06-01 10:02:00,0,1\n\
         1001,Other,3,Uni,0,2025-06-01 10:03:00,0,1\n",
    )
    .unwrap();

    let mut r = load_roster(&path);
    assert_eq!(r.len(), 2);
    assert_eq!(r.get(1000).unwrap().name, "First");

    r.withdraw(1000).unwrap();
    assert!(!r.exists(1000));
    assert_eq!(r.len(), 1);
}

#[test]
fn max_id_line_is_skipped_and_registration_continues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.csv");
    fs::write(
        &path,
        "4294967295,A,1,Uni,0,2025-06-01 10:01:00,0,1\n\
         1003,B,1,Uni,0,2025-06-01 10:02:00,0,1\n",
    )
    .unwrap();

    let mut r = load_roster(&path);
    assert!(!r.exists(PlayerId::MAX));
    assert_eq!(r.next_id(), 1004);
    assert_eq!(r.enqueue("C", 1, "Uni", false), Ok(1004));
}

#[test]
fn registration_stops_when_ids_run_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.csv");
    fs::write(&path, "4294967294,Last,1,Uni,0,2025-06-01 10:01:00,0,1\n").unwrap();

    let mut r = load_roster(&path);
    assert_eq!(r.next_id(), PlayerId::MAX);
    assert_eq!(r.enqueue("Late", 1, "Uni", false), Err(RosterError::IdsExhausted));
    assert_eq!(r.len(), 1);
    assert_eq!(r.next_id(), PlayerId::MAX);
}
