// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Directive-resolution tests: granularity decisions, selector
//! expansion, lump addressing, and the interaction between the
//! standalone well flag and per-connection statuses.

use resdeck_engine::chrono::NaiveDate;
use resdeck_engine::datamodel::{
    CompdatRecord, ComplumpRecord, ConnState, ScheduleKeyword, Snapshot, WelopenRecord,
    WelopenStatus, WellFlag,
};
use resdeck_engine::{ErrorCode, ScheduleSession, resolve_schedule};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn compdat(well: &str, i: i32, j: i32, k1: i32, k2: i32) -> CompdatRecord {
    CompdatRecord {
        well: well.to_string(),
        i,
        j,
        k1,
        k2,
        state: ConnState::Open,
    }
}

fn complump(well: &str, i: i32, j: i32, k1: i32, k2: i32, n: i32) -> ComplumpRecord {
    ComplumpRecord {
        well: well.to_string(),
        i,
        j,
        k1,
        k2,
        n,
    }
}

fn welopen(well: &str, status: WelopenStatus) -> WelopenRecord {
    WelopenRecord {
        well: well.to_string(),
        status,
        i: None,
        j: None,
        k: None,
        c1: None,
        c2: None,
    }
}

fn welopen_at(well: &str, status: WelopenStatus, i: i32, j: i32, k: i32) -> WelopenRecord {
    WelopenRecord {
        well: well.to_string(),
        status,
        i: Some(i),
        j: Some(j),
        k: Some(k),
        c1: None,
        c2: None,
    }
}

fn welopen_lumps(well: &str, status: WelopenStatus, c1: i32, c2: i32) -> WelopenRecord {
    WelopenRecord {
        well: well.to_string(),
        status,
        i: None,
        j: None,
        k: None,
        c1: Some(c1),
        c2: Some(c2),
    }
}

fn conn_state(snapshot: &Snapshot, well: &str, i: i32, j: i32, k: i32) -> ConnState {
    snapshot
        .connections
        .iter()
        .find(|c| c.well == well && c.i == i && c.j == j && c.k == k)
        .unwrap_or_else(|| panic!("no connection {well} {i} {j} {k}"))
        .state
}

fn well_flag(snapshot: &Snapshot, well: &str) -> WellFlag {
    snapshot
        .wells
        .iter()
        .find(|w| w.well == well)
        .unwrap_or_else(|| panic!("no well {well}"))
        .flag
}

#[test]
fn test_well_level_shut_then_stop() {
    // a well-level SHUT followed a day later by a well-level STOP:
    // the connection stays OPEN throughout, only the well flag moves
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 1)]),
        ScheduleKeyword::Welopen(vec![welopen("OP1", WelopenStatus::Shut)]),
        ScheduleKeyword::Dates(vec![date(2001, 5, 2)]),
        ScheduleKeyword::Welopen(vec![welopen("OP1", WelopenStatus::Stop)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    assert_eq!(resolution.snapshots.len(), 2);

    let first = &resolution.snapshots[0];
    assert_eq!(conn_state(first, "OP1", 1, 1, 1), ConnState::Open);
    assert_eq!(well_flag(first, "OP1"), WellFlag::Shut);

    let second = &resolution.snapshots[1];
    assert_eq!(conn_state(second, "OP1", 1, 1, 1), ConnState::Open);
    assert_eq!(well_flag(second, "OP1"), WellFlag::Stop);
}

#[test]
fn test_zero_and_negative_selectors_mean_well_level() {
    // explicit zeros or negatives in every selector column are the
    // same as leaving them out entirely
    for sentinel in [0, -1] {
        let keywords = [
            ScheduleKeyword::Dates(vec![date(2000, 1, 1)]),
            ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 1)]),
            ScheduleKeyword::Welopen(vec![welopen_at(
                "OP1",
                WelopenStatus::Shut,
                sentinel,
                sentinel,
                sentinel,
            )]),
        ];
        let resolution = resolve_schedule(&keywords, None).unwrap();
        let snapshot = &resolution.snapshots[0];
        assert_eq!(well_flag(snapshot, "OP1"), WellFlag::Shut);
        assert_eq!(conn_state(snapshot, "OP1", 1, 1, 1), ConnState::Open);
    }
}

#[test]
fn test_connection_shut_survives_well_level_open() {
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 2)]),
        ScheduleKeyword::Welopen(vec![welopen_at("OP1", WelopenStatus::Shut, 1, 1, 1)]),
        ScheduleKeyword::Dates(vec![date(2001, 5, 2)]),
        ScheduleKeyword::Welopen(vec![welopen("OP1", WelopenStatus::Open)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();

    let last = resolution.snapshots.last().unwrap();
    assert_eq!(well_flag(last, "OP1"), WellFlag::Open);
    // the connection-level shut from the day before survives
    assert_eq!(conn_state(last, "OP1", 1, 1, 1), ConnState::Shut);
    assert_eq!(conn_state(last, "OP1", 1, 1, 2), ConnState::Open);
}

#[test]
fn test_exact_coordinate_triple_only_hits_that_connection() {
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 3)]),
        ScheduleKeyword::Welopen(vec![welopen_at("OP1", WelopenStatus::Shut, 1, 1, 2)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let snapshot = &resolution.snapshots[0];
    assert_eq!(conn_state(snapshot, "OP1", 1, 1, 1), ConnState::Open);
    assert_eq!(conn_state(snapshot, "OP1", 1, 1, 2), ConnState::Shut);
    assert_eq!(conn_state(snapshot, "OP1", 1, 1, 3), ConnState::Open);
}

#[test]
fn test_defaulted_k_axis_matches_all_layers() {
    // K=0 is a wildcard axis; I and J concrete. A third well's
    // connections are untouched.
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![
            compdat("OP1", 1, 1, 1, 2),
            compdat("OP3", 7, 7, 1, 2),
        ]),
        ScheduleKeyword::Welopen(vec![welopen_at("OP1", WelopenStatus::Shut, 1, 1, 0)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let snapshot = &resolution.snapshots[0];
    assert_eq!(conn_state(snapshot, "OP1", 1, 1, 1), ConnState::Shut);
    assert_eq!(conn_state(snapshot, "OP1", 1, 1, 2), ConnState::Shut);
    assert_eq!(conn_state(snapshot, "OP3", 7, 7, 1), ConnState::Open);
    assert_eq!(conn_state(snapshot, "OP3", 7, 7, 2), ConnState::Open);
}

#[test]
fn test_stop_on_connection_subset_means_shut() {
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 1)]),
        ScheduleKeyword::Welopen(vec![welopen_at("OP1", WelopenStatus::Stop, 1, 1, 1)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let snapshot = &resolution.snapshots[0];
    assert_eq!(conn_state(snapshot, "OP1", 1, 1, 1), ConnState::Shut);
    // the directive addressed connections, the well flag stays put
    assert_eq!(well_flag(snapshot, "OP1"), WellFlag::Open);
}

#[test]
fn test_popn_reopens_a_connection() {
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 1)]),
        ScheduleKeyword::Welopen(vec![welopen_at("OP1", WelopenStatus::Shut, 1, 1, 1)]),
        ScheduleKeyword::Dates(vec![date(2001, 5, 2)]),
        ScheduleKeyword::Welopen(vec![welopen_at("OP1", WelopenStatus::Popn, 1, 1, 1)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let last = resolution.snapshots.last().unwrap();
    assert_eq!(conn_state(last, "OP1", 1, 1, 1), ConnState::Open);
}

#[test]
fn test_idempotent_directive() {
    let base = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 2)]),
        ScheduleKeyword::Welopen(vec![welopen_at("OP1", WelopenStatus::Shut, 1, 1, 1)]),
    ];
    let doubled = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 2)]),
        ScheduleKeyword::Welopen(vec![welopen_at("OP1", WelopenStatus::Shut, 1, 1, 1)]),
        ScheduleKeyword::Welopen(vec![welopen_at("OP1", WelopenStatus::Shut, 1, 1, 1)]),
    ];
    let once = resolve_schedule(&base, None).unwrap();
    let twice = resolve_schedule(&doubled, None).unwrap();
    assert_eq!(once.snapshots, twice.snapshots);
}

#[test]
fn test_wildcard_target_expands_against_known_wells() {
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2000, 1, 1)]),
        ScheduleKeyword::Compdat(vec![
            compdat("B_1H", 1, 1, 1, 1),
            compdat("B_2H", 2, 2, 2, 2),
            compdat("WI1", 3, 3, 3, 3),
        ]),
        ScheduleKeyword::Welopen(vec![welopen("B*H", WelopenStatus::Shut)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let snapshot = &resolution.snapshots[0];
    assert_eq!(well_flag(snapshot, "B_1H"), WellFlag::Shut);
    assert_eq!(well_flag(snapshot, "B_2H"), WellFlag::Shut);
    assert_eq!(well_flag(snapshot, "WI1"), WellFlag::Open);
}

#[test]
fn test_wildcard_does_not_match_wells_defined_later() {
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2000, 1, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 1)]),
        ScheduleKeyword::Welopen(vec![welopen("OP*", WelopenStatus::Shut)]),
        ScheduleKeyword::Dates(vec![date(2000, 2, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP3", 4, 4, 4, 4)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let last = resolution.snapshots.last().unwrap();
    assert_eq!(well_flag(last, "OP1"), WellFlag::Shut);
    // OP3 came into existence after the wildcard directive ran
    assert_eq!(well_flag(last, "OP3"), WellFlag::Open);
}

#[test]
fn test_lump_round_trip() {
    // declare a lump covering two of three connections, then shut by
    // lump number: exactly those two change
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 74, 135, 7, 9)]),
        ScheduleKeyword::Complump(vec![
            complump("OP1", 74, 135, 7, 7, 1),
            complump("OP1", 74, 135, 8, 8, 1),
            complump("OP1", 74, 135, 9, 9, 2),
        ]),
        ScheduleKeyword::Welopen(vec![welopen_lumps("OP1", WelopenStatus::Shut, 1, 1)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let snapshot = &resolution.snapshots[0];
    assert_eq!(conn_state(snapshot, "OP1", 74, 135, 7), ConnState::Shut);
    assert_eq!(conn_state(snapshot, "OP1", 74, 135, 8), ConnState::Shut);
    assert_eq!(conn_state(snapshot, "OP1", 74, 135, 9), ConnState::Open);

    // and the registry is available as an auxiliary output
    assert_eq!(resolution.lumps.len(), 2);
    assert!(resolution.lumps.get("OP1", 1).is_some());
}

#[test]
fn test_lump_interval_addresses_several_lumps() {
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 74, 135, 7, 10)]),
        ScheduleKeyword::Complump(vec![
            complump("OP1", 74, 135, 7, 8, 1),
            complump("OP1", 74, 135, 9, 9, 2),
            complump("OP1", 74, 135, 10, 10, 3),
        ]),
        ScheduleKeyword::Welopen(vec![welopen_lumps("OP1", WelopenStatus::Shut, 1, 2)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let snapshot = &resolution.snapshots[0];
    assert_eq!(conn_state(snapshot, "OP1", 74, 135, 7), ConnState::Shut);
    assert_eq!(conn_state(snapshot, "OP1", 74, 135, 8), ConnState::Shut);
    assert_eq!(conn_state(snapshot, "OP1", 74, 135, 9), ConnState::Shut);
    assert_eq!(conn_state(snapshot, "OP1", 74, 135, 10), ConnState::Open);
}

#[test]
fn test_undeclared_lump_fails_and_leaves_table_unchanged() {
    let mut session = ScheduleSession::new(None);
    session
        .process(&ScheduleKeyword::Dates(vec![date(2001, 5, 1)]))
        .unwrap();
    session
        .process(&ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 1)]))
        .unwrap();

    let before = session.table().clone();
    let err = session
        .process(&ScheduleKeyword::Welopen(vec![welopen_lumps(
            "OP1",
            WelopenStatus::Shut,
            4,
            5,
        )]))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownLump);
    assert_eq!(session.table(), &before);
}

#[test]
fn test_zero_sentinel_lump_axis_expands_at_resolution_time() {
    // the lump is declared with I defaulted to "all"; connections at
    // two different I values both fall into it
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![
            compdat("OP1", 74, 135, 7, 7),
            compdat("OP1", 75, 135, 7, 7),
        ]),
        ScheduleKeyword::Complump(vec![complump("OP1", 0, 135, 7, 7, 1)]),
        ScheduleKeyword::Welopen(vec![welopen_lumps("OP1", WelopenStatus::Shut, 1, 1)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let snapshot = &resolution.snapshots[0];
    assert_eq!(conn_state(snapshot, "OP1", 74, 135, 7), ConnState::Shut);
    assert_eq!(conn_state(snapshot, "OP1", 75, 135, 7), ConnState::Shut);
}

#[test]
fn test_two_wells_same_cell_resolve_independently() {
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2000, 1, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 1), compdat("OP2", 1, 1, 1, 1)]),
        ScheduleKeyword::Welopen(vec![
            welopen("OP1", WelopenStatus::Shut),
            welopen("OP2", WelopenStatus::Open),
        ]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let snapshot = &resolution.snapshots[0];
    assert_eq!(well_flag(snapshot, "OP1"), WellFlag::Shut);
    assert_eq!(well_flag(snapshot, "OP2"), WellFlag::Open);
}

#[test]
fn test_directive_for_unknown_well_fails() {
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2000, 1, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 1)]),
        ScheduleKeyword::Welopen(vec![welopen("OP2", WelopenStatus::Shut)]),
    ];
    let err = resolve_schedule(&keywords, None).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownWell);
}

#[test]
fn test_later_compdat_reopens_superseded_connection() {
    // a fresh connection definition for the same cell supersedes the
    // earlier shut row
    let keywords = [
        ScheduleKeyword::Dates(vec![date(2001, 5, 1)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 1)]),
        ScheduleKeyword::Welopen(vec![welopen_at("OP1", WelopenStatus::Shut, 1, 1, 1)]),
        ScheduleKeyword::Dates(vec![date(2001, 5, 2)]),
        ScheduleKeyword::Compdat(vec![compdat("OP1", 1, 1, 1, 1)]),
    ];
    let resolution = resolve_schedule(&keywords, None).unwrap();
    let last = resolution.snapshots.last().unwrap();
    assert_eq!(last.date, Some(date(2001, 5, 2)));
    assert_eq!(conn_state(last, "OP1", 1, 1, 1), ConnState::Open);
}
