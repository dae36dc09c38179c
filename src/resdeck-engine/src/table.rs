// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The live connection table: per well, an ordered map from coordinate
//! triple to the connection's current state, plus the well's standalone
//! flag. Point lookups and axis-scoped scans replace repeated full-table
//! passes, and the BTreeMap ordering makes every emitted row sequence
//! deterministic.

use std::collections::BTreeMap;

use crate::datamodel::{Connection, WellFlag, WellStatusRow};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellState {
    pub flag: WellFlag,
    pub connections: BTreeMap<(i32, i32, i32), Connection>,
}

impl WellState {
    fn new() -> WellState {
        WellState {
            flag: WellFlag::Open,
            connections: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionTable {
    wells: BTreeMap<String, WellState>,
}

impl ConnectionTable {
    pub fn new() -> ConnectionTable {
        Default::default()
    }

    /// Inserts a connection, superseding any earlier row for the same
    /// well and coordinates. A re-perforation without a lump assignment
    /// keeps the cell's existing lump number.
    pub fn upsert(&mut self, mut conn: Connection) {
        let well = self
            .wells
            .entry(conn.well.clone())
            .or_insert_with(WellState::new);
        if conn.lump.is_none()
            && let Some(prev) = well.connections.get(&conn.coord())
        {
            conn.lump = prev.lump;
        }
        well.connections.insert(conn.coord(), conn);
    }

    pub fn well(&self, name: &str) -> Option<&WellState> {
        self.wells.get(name)
    }

    pub fn well_mut(&mut self, name: &str) -> Option<&mut WellState> {
        self.wells.get_mut(name)
    }

    /// Sets the standalone flag of an existing well; false when the
    /// well is unknown.
    pub fn set_flag(&mut self, name: &str, flag: WellFlag) -> bool {
        match self.wells.get_mut(name) {
            Some(well) => {
                well.flag = flag;
                true
            }
            None => false,
        }
    }

    /// Names of all wells with at least one connection, sorted.
    pub fn well_names(&self) -> Vec<String> {
        self.wells.keys().cloned().collect()
    }

    pub fn wells(&self) -> impl Iterator<Item = (&String, &WellState)> {
        self.wells.iter()
    }

    pub fn n_connections(&self) -> usize {
        self.wells.values().map(|w| w.connections.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// All connection rows, sorted by (well, i, j, k).
    pub fn connection_rows(&self) -> Vec<Connection> {
        self.wells
            .values()
            .flat_map(|w| w.connections.values().cloned())
            .collect()
    }

    /// One status row per well, sorted by well name.
    pub fn well_rows(&self) -> Vec<WellStatusRow> {
        self.wells
            .iter()
            .map(|(name, state)| WellStatusRow {
                well: name.clone(),
                flag: state.flag,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::ConnState;

    fn conn(well: &str, i: i32, j: i32, k: i32, state: ConnState) -> Connection {
        Connection {
            well: well.to_string(),
            i,
            j,
            k,
            state,
            lump: None,
            date: None,
            event_idx: 0,
        }
    }

    #[test]
    fn test_upsert_supersedes() {
        let mut table = ConnectionTable::new();
        table.upsert(conn("OP1", 1, 1, 1, ConnState::Open));
        table.upsert(conn("OP1", 1, 1, 2, ConnState::Open));
        assert_eq!(table.n_connections(), 2);

        table.upsert(conn("OP1", 1, 1, 1, ConnState::Shut));
        assert_eq!(table.n_connections(), 2);
        let state = table.well("OP1").unwrap();
        assert_eq!(state.connections[&(1, 1, 1)].state, ConnState::Shut);
        assert_eq!(state.connections[&(1, 1, 2)].state, ConnState::Open);
    }

    #[test]
    fn test_upsert_keeps_lump_assignment() {
        let mut table = ConnectionTable::new();
        let mut lumped = conn("OP1", 1, 1, 1, ConnState::Open);
        lumped.lump = Some(2);
        table.upsert(lumped);

        table.upsert(conn("OP1", 1, 1, 1, ConnState::Shut));
        assert_eq!(
            table.well("OP1").unwrap().connections[&(1, 1, 1)].lump,
            Some(2)
        );
    }

    #[test]
    fn test_distinct_wells_may_share_a_cell() {
        let mut table = ConnectionTable::new();
        table.upsert(conn("OP1", 1, 1, 1, ConnState::Open));
        table.upsert(conn("OP2", 1, 1, 1, ConnState::Open));
        assert_eq!(table.n_connections(), 2);
        assert_eq!(table.well_names(), vec!["OP1", "OP2"]);
    }

    #[test]
    fn test_rows_are_sorted() {
        let mut table = ConnectionTable::new();
        table.upsert(conn("OP2", 9, 9, 9, ConnState::Open));
        table.upsert(conn("OP1", 2, 1, 1, ConnState::Open));
        table.upsert(conn("OP1", 1, 5, 5, ConnState::Open));

        let rows = table.connection_rows();
        let coords: Vec<(&str, i32)> = rows.iter().map(|c| (c.well.as_str(), c.i)).collect();
        assert_eq!(coords, vec![("OP1", 1), ("OP1", 2), ("OP2", 9)]);
    }

    #[test]
    fn test_set_flag() {
        let mut table = ConnectionTable::new();
        assert!(!table.set_flag("OP1", WellFlag::Shut));

        table.upsert(conn("OP1", 1, 1, 1, ConnState::Open));
        assert!(table.set_flag("OP1", WellFlag::Stop));
        assert_eq!(table.well("OP1").unwrap().flag, WellFlag::Stop);
    }
}
