// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The resolution session: a single synchronous fold over the keyword
//! stream.
//!
//! The session owns the clock, the connection table, and both
//! registries; nothing else mutates them. Snapshot emission is a small
//! state machine: the session is dirty once any connection, list, or
//! lump mutated since the last emitted snapshot, and the next
//! date-advancing keyword first flushes the current state tagged with
//! the date it was valid for, then lets the clock move. The end of the
//! stream flushes once more, so a schedule with no date markers at all
//! still yields exactly one snapshot.
//!
//! Errors are fail-fast: an inconsistent record aborts the fold, since
//! continuing would produce a plausible-looking but wrong table. The
//! session's partial state stays valid and inspectable. Callers that
//! want best-effort behavior can drive [`ScheduleSession::process`]
//! keyword by keyword and decide per error.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::common::Result;
use crate::datamodel::{
    CompdatRecord, ComplumpRecord, Connection, ScheduleKeyword, Snapshot, WelspecsRecord,
    WlistAction, WlistRecord,
};
use crate::lump::{CoordRange, LumpRegistry};
use crate::sched_err;
use crate::table::ConnectionTable;
use crate::unroll::unroll;
use crate::welopen::apply_welopen;
use crate::wlist::WellListRegistry;

/// Everything the fold produces: the snapshot sequence plus the final
/// registries and connection table, for downstream exporters to render
/// as they see fit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleResolution {
    pub snapshots: Vec<Snapshot>,
    pub well_lists: WellListRegistry,
    pub lumps: LumpRegistry,
    pub connections: ConnectionTable,
}

#[derive(Clone, Debug, Default)]
pub struct ScheduleSession {
    clock: Clock,
    /// Latest declared well-head I/J per well, for back-filling
    /// defaulted connection coordinates.
    head_coords: BTreeMap<String, (i32, i32)>,
    table: ConnectionTable,
    well_lists: WellListRegistry,
    lumps: LumpRegistry,
    snapshots: Vec<Snapshot>,
    dirty: bool,
    event_idx: usize,
}

impl ScheduleSession {
    /// A fresh session. `start_date` seeds the clock for events that
    /// occur before any date marker; without it such events are
    /// undated.
    pub fn new(start_date: Option<NaiveDate>) -> ScheduleSession {
        ScheduleSession {
            clock: Clock::new(start_date),
            ..Default::default()
        }
    }

    pub fn current_date(&self) -> Option<NaiveDate> {
        self.clock.current()
    }

    pub fn table(&self) -> &ConnectionTable {
        &self.table
    }

    pub fn well_lists(&self) -> &WellListRegistry {
        &self.well_lists
    }

    pub fn lumps(&self) -> &LumpRegistry {
        &self.lumps
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Consumes one keyword occurrence.
    pub fn process(&mut self, keyword: &ScheduleKeyword) -> Result<()> {
        let idx = self.event_idx;
        self.event_idx += 1;

        match keyword {
            ScheduleKeyword::Start(date) => {
                self.flush_if_dirty();
                self.clock.advance_to(*date)?;
            }
            ScheduleKeyword::Dates(dates) => {
                for date in dates {
                    self.flush_if_dirty();
                    self.clock.advance_to(*date)?;
                }
            }
            ScheduleKeyword::Tstep(steps) => {
                self.flush_if_dirty();
                let days: i64 = steps.iter().sum();
                self.clock.advance_by_days(days)?;
            }
            ScheduleKeyword::Welspecs(recs) => self.process_welspecs(recs),
            ScheduleKeyword::Compdat(recs) => self.process_compdat(recs, idx)?,
            ScheduleKeyword::Complump(recs) => self.process_complump(recs)?,
            ScheduleKeyword::Wlist(recs) => self.process_wlist(recs)?,
            ScheduleKeyword::Welopen(recs) => {
                for rec in recs {
                    let changed = apply_welopen(
                        rec,
                        self.clock.current(),
                        idx,
                        &mut self.table,
                        &self.well_lists,
                        &self.lumps,
                    )?;
                    self.dirty |= changed;
                }
            }
        }
        Ok(())
    }

    /// Flushes the last pending snapshot and hands out the results.
    pub fn finish(mut self) -> ScheduleResolution {
        self.flush_if_dirty();
        ScheduleResolution {
            snapshots: self.snapshots,
            well_lists: self.well_lists,
            lumps: self.lumps,
            connections: self.table,
        }
    }

    fn flush_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        self.snapshots.push(Snapshot {
            date: self.clock.current(),
            wells: self.table.well_rows(),
            connections: self.table.connection_rows(),
        });
        self.dirty = false;
    }

    fn process_welspecs(&mut self, recs: &[WelspecsRecord]) {
        // only the latest declaration per well is retained
        for rec in recs {
            self.head_coords
                .insert(rec.well.clone(), (rec.head_i, rec.head_j));
        }
    }

    fn process_compdat(&mut self, recs: &[CompdatRecord], idx: usize) -> Result<()> {
        for rec in recs {
            let mut rec = rec.clone();
            if rec.i == 0 {
                let Some((head_i, _)) = self.head_coords.get(&rec.well) else {
                    return sched_err!(
                        Configuration,
                        format!(
                            "a well-head declaration must be provided when I is defaulted: {}",
                            rec.well
                        )
                    );
                };
                rec.i = *head_i;
            }
            if rec.j == 0 {
                let Some((_, head_j)) = self.head_coords.get(&rec.well) else {
                    return sched_err!(
                        Configuration,
                        format!(
                            "a well-head declaration must be provided when J is defaulted: {}",
                            rec.well
                        )
                    );
                };
                rec.j = *head_j;
            }
            for unrolled in unroll(rec)? {
                self.table.upsert(Connection {
                    well: unrolled.well.clone(),
                    i: unrolled.i,
                    j: unrolled.j,
                    k: unrolled.k1,
                    state: unrolled.state,
                    lump: None,
                    date: self.clock.current(),
                    event_idx: idx,
                });
            }
            self.dirty = true;
        }
        Ok(())
    }

    fn process_complump(&mut self, recs: &[ComplumpRecord]) -> Result<()> {
        if recs.is_empty() {
            return Ok(());
        }
        let date = self.clock.current();

        // one keyword may compose a lump out of several records; gather
        // ranges per (well, number) in record order before declaring
        let mut grouped: Vec<((String, i32), Vec<CoordRange>)> = Vec::new();
        for rec in recs {
            let range = CoordRange {
                i: (rec.i, rec.i),
                j: (rec.j, rec.j),
                k: (rec.k1, rec.k2),
            };
            let key = (rec.well.clone(), rec.n);
            match grouped.iter_mut().find(|(k, _)| *k == key) {
                Some((_, ranges)) => ranges.push(range),
                None => grouped.push((key, vec![range])),
            }
        }

        for ((well, n), ranges) in grouped {
            self.lumps.declare(&well, n, ranges.clone(), date)?;
            // stamp the lump number onto the connections it covers
            if let Some(state) = self.table.well_mut(&well) {
                for conn in state.connections.values_mut() {
                    if ranges.iter().any(|r| r.contains(conn.i, conn.j, conn.k)) {
                        conn.lump = Some(n);
                    }
                }
            }
        }
        self.dirty = true;
        Ok(())
    }

    fn process_wlist(&mut self, recs: &[WlistRecord]) -> Result<()> {
        if recs.is_empty() {
            return Ok(());
        }
        let date = self.clock.current();
        for rec in recs {
            let universe = self.table.well_names();
            let members = self
                .well_lists
                .resolve_members(&rec.wells, &universe, date)?;
            let name = rec.list_name();
            match rec.action {
                WlistAction::New => self.well_lists.define(name, members, date),
                WlistAction::Add => self.well_lists.add(name, members, date)?,
                WlistAction::Del => self.well_lists.remove(name, members, date)?,
                WlistAction::Mov => self.well_lists.move_members(name, members, date),
            }
        }
        self.dirty = true;
        Ok(())
    }
}

/// Folds an entire keyword stream and returns the resolution. This is
/// the main entry point for callers with a fully materialized schedule.
pub fn resolve_schedule(
    keywords: &[ScheduleKeyword],
    start_date: Option<NaiveDate>,
) -> Result<ScheduleResolution> {
    let mut session = ScheduleSession::new(start_date);
    for keyword in keywords {
        session.process(keyword)?;
    }
    Ok(session.finish())
}
