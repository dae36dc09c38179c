// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Resolution of open/shut directives against the live connection
//! table.
//!
//! A directive names a target (well, wildcard template, or `*list`
//! reference), a desired status, and optionally either a coordinate
//! selector or a lump-number pair. Resolution decides, per target well,
//! whether the directive moves the well's standalone flag or rewrites a
//! subset of connection rows:
//!
//! - every selector axis defaulted: the directive acts on the well as a
//!   whole. Only the well flag moves; connection statuses survive. A
//!   connection shut yesterday stays shut through a well-level OPEN
//!   today.
//! - any axis live: the directive acts on connections. Closed-class
//!   spellings shut the matched rows, opened-class spellings open them,
//!   and the well flag is left alone.
//!
//! Matching is computed in full before anything is mutated, so a
//! directive that fails leaves the table exactly as it was.

use chrono::NaiveDate;
use log::warn;

use crate::common::Result;
use crate::datamodel::{WelopenRecord, WellFlag};
use crate::lump::LumpRegistry;
use crate::sched_err;
use crate::table::ConnectionTable;
use crate::wlist::WellListRegistry;
use resdeck_core::pattern;

enum Target<'a> {
    Well(&'a str),
    Template(&'a str),
    List(&'a str),
}

/// Decides what kind of target specifier a directive carries. A leading
/// asterisk marks a list reference; `\*` escapes it back into a
/// template character.
fn classify_target(raw: &str) -> Target<'_> {
    if let Some(rest) = raw.strip_prefix('\\') {
        Target::Template(rest)
    } else if let Some(list) = raw.strip_prefix('*') {
        Target::List(list)
    } else if pattern::has_wildcard(raw) {
        Target::Template(raw)
    } else {
        Target::Well(raw)
    }
}

enum Selector {
    WholeWell,
    Coords {
        i: Option<i32>,
        j: Option<i32>,
        k: Option<i32>,
    },
    Lumps {
        lo: i32,
        hi: i32,
    },
}

fn constrained(v: Option<i32>) -> bool {
    v.is_some_and(|x| x > 0)
}

/// Validates a directive's selector columns and picks the granularity.
fn selector(rec: &WelopenRecord) -> Result<Selector> {
    let has_coords = constrained(rec.i) || constrained(rec.j) || constrained(rec.k);

    match (rec.c1, rec.c2) {
        (None, None) => {}
        (Some(_), None) | (None, Some(_)) => {
            return sched_err!(
                Configuration,
                format!("both or none of the lump numbers must be defined: {rec:?}")
            );
        }
        (Some(c1), Some(c2)) => {
            if c1 < 0 || c2 < 0 {
                return sched_err!(
                    Range,
                    format!("negative values for lump numbers are not allowed: {rec:?}")
                );
            }
            if c1 == 0 || c2 == 0 {
                return sched_err!(
                    Configuration,
                    format!("zeros for lump numbers are not supported: {rec:?}")
                );
            }
            if c2 < c1 {
                return sched_err!(
                    Configuration,
                    format!("upper lump number must be greater than or equal to the lower: {rec:?}")
                );
            }
            if has_coords {
                return sched_err!(
                    Configuration,
                    format!("a coordinate selector and a lump selector are mutually exclusive: {rec:?}")
                );
            }
            return Ok(Selector::Lumps { lo: c1, hi: c2 });
        }
    }

    if has_coords {
        Ok(Selector::Coords {
            i: rec.i,
            j: rec.j,
            k: rec.k,
        })
    } else {
        Ok(Selector::WholeWell)
    }
}

enum WellPlan {
    SetFlag(WellFlag),
    SetConnections(Vec<(i32, i32, i32)>),
}

/// The connection coordinates of `well` matched by a coordinate
/// selector: a live axis must match exactly, a defaulted axis matches
/// every value present.
fn match_coords(
    table: &ConnectionTable,
    well: &str,
    i: Option<i32>,
    j: Option<i32>,
    k: Option<i32>,
) -> Vec<(i32, i32, i32)> {
    let Some(state) = table.well(well) else {
        return Vec::new();
    };
    state
        .connections
        .keys()
        .filter(|(ci, cj, ck)| {
            (!constrained(i) || i == Some(*ci))
                && (!constrained(j) || j == Some(*cj))
                && (!constrained(k) || k == Some(*ck))
        })
        .copied()
        .collect()
}

/// The connection coordinates of `well` covered by any lump numbered in
/// `lo..=hi` as of `date`. Zero-sentinel axes in the declared ranges
/// expand here, against the coordinates that actually exist.
fn match_lumps(
    table: &ConnectionTable,
    lumps: &LumpRegistry,
    well: &str,
    lo: i32,
    hi: i32,
    date: Option<NaiveDate>,
) -> Result<Vec<(i32, i32, i32)>> {
    let declared = lumps.lumps_in_interval(well, lo, hi, date);
    if declared.is_empty() {
        return sched_err!(
            UnknownLump,
            format!("no lump in {lo}..{hi} is declared for well {well}")
        );
    }
    let Some(state) = table.well(well) else {
        return Ok(Vec::new());
    };
    Ok(state
        .connections
        .keys()
        .filter(|(i, j, k)| {
            declared
                .iter()
                .any(|lump| lump.ranges.iter().any(|r| r.contains(*i, *j, *k)))
        })
        .copied()
        .collect())
}

/// Applies one directive. Returns whether any state changed; a failed
/// directive changes nothing.
pub fn apply_welopen(
    rec: &WelopenRecord,
    date: Option<NaiveDate>,
    event_idx: usize,
    table: &mut ConnectionTable,
    well_lists: &WellListRegistry,
    lumps: &LumpRegistry,
) -> Result<bool> {
    let selector = selector(rec)?;

    let target_wells: Vec<String> = match classify_target(&rec.well) {
        Target::Well(name) => {
            if table.well(name).is_none() {
                return sched_err!(
                    UnknownWell,
                    format!("well {name} has no connections defined")
                );
            }
            vec![name.to_string()]
        }
        Target::Template(template) => {
            let matched = pattern::wells_matching_template(template, &table.well_names());
            if matched.is_empty() {
                warn!("well template {template} in directive matches no known well");
            }
            matched
        }
        Target::List(list) => {
            let members = well_lists.members_as_of(list, date)?.to_vec();
            for member in &members {
                if table.well(member).is_none() {
                    return sched_err!(
                        UnknownWell,
                        format!("well {member} in list {list} has no connections defined")
                    );
                }
            }
            members
        }
    };

    // plan everything up front so failures leave the table untouched
    let mut plans: Vec<(String, WellPlan)> = Vec::with_capacity(target_wells.len());
    for well in &target_wells {
        let plan = match &selector {
            Selector::WholeWell => WellPlan::SetFlag(rec.status.well_flag()),
            Selector::Coords { i, j, k } => {
                let matched = match_coords(table, well, *i, *j, *k);
                if matched.is_empty() {
                    return sched_err!(
                        Configuration,
                        format!("directive is not acting on any existing connection: {rec:?}")
                    );
                }
                WellPlan::SetConnections(matched)
            }
            Selector::Lumps { lo, hi } => {
                let matched = match_lumps(table, lumps, well, *lo, *hi, date)?;
                if matched.is_empty() {
                    return sched_err!(
                        Configuration,
                        format!("directive is not acting on any existing connection: {rec:?}")
                    );
                }
                WellPlan::SetConnections(matched)
            }
        };
        plans.push((well.clone(), plan));
    }

    let changed = !plans.is_empty();
    for (well, plan) in plans {
        match plan {
            WellPlan::SetFlag(flag) => {
                table.set_flag(&well, flag);
            }
            WellPlan::SetConnections(coords) => {
                let new_state = rec.status.conn_state();
                if let Some(well_state) = table.well_mut(&well) {
                    for coord in coords {
                        if let Some(conn) = well_state.connections.get_mut(&coord) {
                            conn.state = new_state;
                            conn.date = date;
                            conn.event_idx = event_idx;
                        }
                    }
                }
            }
        }
    }
    Ok(changed)
}
