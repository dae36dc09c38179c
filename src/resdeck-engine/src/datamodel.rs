// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Typed records for the schedule keyword stream, and the row types the
//! engine produces.
//!
//! Parsing the deck's textual grammar is an external concern; the engine
//! consumes one [`ScheduleKeyword`] per keyword occurrence, in stream
//! order, with records already decoded into the field sets below. The
//! column-style serde names (`WELL`, `I`, `J`, `K`, `OP/SH`, `DATE`)
//! match the tabular vocabulary downstream exporters expect.

use std::fmt;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

/// OPEN/SHUT state of a single connection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnState {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "SHUT")]
    Shut,
}

impl ConnState {
    /// Decodes the state column of a connection-definition record.
    ///
    /// `AUTO` connections open as soon as the simulator allows; for the
    /// status table they count as open. Anything unrecognized falls back
    /// to `SHUT` with a warning, mirroring the lenient handling of
    /// open/shut directives.
    pub fn from_deck_str(s: &str) -> ConnState {
        match s {
            "OPEN" | "AUTO" => ConnState::Open,
            "SHUT" => ConnState::Shut,
            other => {
                warn!("connection state {other} is not recognized, using SHUT instead");
                ConnState::Shut
            }
        }
    }
}

impl fmt::Display for ConnState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConnState::Open => write!(f, "OPEN"),
            ConnState::Shut => write!(f, "SHUT"),
        }
    }
}

/// The standalone open/closed flag of a well, independent of the state
/// of its connections. A stopped well is closed above the wellhead but
/// its connections keep their individual statuses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WellFlag {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "SHUT")]
    Shut,
    #[serde(rename = "STOP")]
    Stop,
}

impl fmt::Display for WellFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WellFlag::Open => write!(f, "OPEN"),
            WellFlag::Shut => write!(f, "SHUT"),
            WellFlag::Stop => write!(f, "STOP"),
        }
    }
}

/// Status spellings accepted by open/shut directives.
///
/// Two classes exist: closed spellings (`SHUT`, `STOP`) and opened
/// spellings (`OPEN`, `POPN`, `AUTO`). At connection granularity the
/// class decides the resulting [`ConnState`]; at well granularity the
/// closed spellings force the well flag while the opened ones clear it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WelopenStatus {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "SHUT")]
    Shut,
    #[serde(rename = "STOP")]
    Stop,
    #[serde(rename = "AUTO")]
    Auto,
    #[serde(rename = "POPN")]
    Popn,
}

impl WelopenStatus {
    /// Decodes a directive's status column, substituting `SHUT` with a
    /// warning for spellings outside the accepted set.
    pub fn from_deck_str(s: &str) -> WelopenStatus {
        match s {
            "OPEN" => WelopenStatus::Open,
            "SHUT" => WelopenStatus::Shut,
            "STOP" => WelopenStatus::Stop,
            "AUTO" => WelopenStatus::Auto,
            "POPN" => WelopenStatus::Popn,
            other => {
                warn!("directive status {other} is not a valid state, using SHUT instead");
                WelopenStatus::Shut
            }
        }
    }

    pub fn is_closed_class(&self) -> bool {
        matches!(self, WelopenStatus::Shut | WelopenStatus::Stop)
    }

    /// The connection state this spelling resolves to when the directive
    /// addresses a subset of connections. `STOP` means `SHUT` here.
    pub fn conn_state(&self) -> ConnState {
        if self.is_closed_class() {
            ConnState::Shut
        } else {
            ConnState::Open
        }
    }

    /// The well flag this spelling resolves to when the directive
    /// addresses the well as a whole.
    pub fn well_flag(&self) -> WellFlag {
        match self {
            WelopenStatus::Shut => WellFlag::Shut,
            WelopenStatus::Stop => WellFlag::Stop,
            WelopenStatus::Open | WelopenStatus::Popn | WelopenStatus::Auto => WellFlag::Open,
        }
    }
}

/// Well-head declaration; only the head coordinates are of interest,
/// they back-fill defaulted I/J columns in connection definitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelspecsRecord {
    pub well: String,
    pub head_i: i32,
    pub head_j: i32,
}

/// One connection-definition record. `k1..=k2` is a closed layer range,
/// unrolled by the engine into one atomic connection per layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompdatRecord {
    pub well: String,
    pub i: i32,
    pub j: i32,
    pub k1: i32,
    pub k2: i32,
    pub state: ConnState,
}

/// One connection-lump record: assigns lump number `n` to the
/// connections of `well` covered by the coordinate values, where zero
/// means "all values of that axis".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplumpRecord {
    pub well: String,
    pub i: i32,
    pub j: i32,
    pub k1: i32,
    pub k2: i32,
    pub n: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WlistAction {
    #[serde(rename = "NEW")]
    New,
    #[serde(rename = "ADD")]
    Add,
    #[serde(rename = "DEL")]
    Del,
    #[serde(rename = "MOV")]
    Mov,
}

/// One well-list mutation record. Operands in `wells` may be concrete
/// well names, wildcard templates, or `*name` references to other lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WlistRecord {
    pub name: String,
    pub action: WlistAction,
    pub wells: Vec<String>,
}

impl WlistRecord {
    /// The list name as stored in the registry: the leading asterisk
    /// required by the deck syntax is not part of the name.
    pub fn list_name(&self) -> &str {
        self.name.strip_prefix('*').unwrap_or(&self.name)
    }
}

/// One open/shut directive.
///
/// `well` is a target specifier: a concrete well name, a wildcard
/// template, or a `*name` list reference (`\*` escapes a leading literal
/// asterisk into a template). The coordinate selector `i`/`j`/`k` and
/// the lump-number pair `c1`/`c2` are mutually exclusive; on every axis,
/// absent, zero and negative values all mean "unconstrained".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelopenRecord {
    pub well: String,
    pub status: WelopenStatus,
    pub i: Option<i32>,
    pub j: Option<i32>,
    pub k: Option<i32>,
    pub c1: Option<i32>,
    pub c2: Option<i32>,
}

/// One schedule keyword occurrence, carrying its decoded records.
///
/// The discriminants are the keyword families the engine consumes; the
/// match over them in the session is exhaustive, so a new family is a
/// compile-time-checked extension.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleKeyword {
    /// Simulation start date.
    Start(NaiveDate),
    /// Absolute date markers; each record advances the clock.
    Dates(Vec<NaiveDate>),
    /// Relative time advance, as whole days per step.
    Tstep(Vec<i64>),
    Welspecs(Vec<WelspecsRecord>),
    Compdat(Vec<CompdatRecord>),
    Complump(Vec<ComplumpRecord>),
    Wlist(Vec<WlistRecord>),
    Welopen(Vec<WelopenRecord>),
}

impl ScheduleKeyword {
    pub fn name(&self) -> &'static str {
        match self {
            ScheduleKeyword::Start(_) => "START",
            ScheduleKeyword::Dates(_) => "DATES",
            ScheduleKeyword::Tstep(_) => "TSTEP",
            ScheduleKeyword::Welspecs(_) => "WELSPECS",
            ScheduleKeyword::Compdat(_) => "COMPDAT",
            ScheduleKeyword::Complump(_) => "COMPLUMP",
            ScheduleKeyword::Wlist(_) => "WLIST",
            ScheduleKeyword::Welopen(_) => "WELOPEN",
        }
    }
}

/// One atomic, resolved connection row: a single perforation in a single
/// cell, with the status in effect as of `date`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "WELL")]
    pub well: String,
    #[serde(rename = "I")]
    pub i: i32,
    #[serde(rename = "J")]
    pub j: i32,
    #[serde(rename = "K")]
    pub k: i32,
    #[serde(rename = "OP/SH")]
    pub state: ConnState,
    #[serde(rename = "LUMP")]
    pub lump: Option<i32>,
    #[serde(rename = "DATE")]
    pub date: Option<NaiveDate>,
    /// Position of the originating keyword in the stream; breaks ties
    /// between changes landing on the same date.
    #[serde(skip)]
    pub event_idx: usize,
}

impl Connection {
    pub fn coord(&self) -> (i32, i32, i32) {
        (self.i, self.j, self.k)
    }
}

/// Per-well row of a snapshot: the standalone well flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellStatusRow {
    #[serde(rename = "WELL")]
    pub well: String,
    #[serde(rename = "STATUS")]
    pub flag: WellFlag,
}

/// The complete connection-status table as of one effective date: one
/// row per known connection plus one row per known well, sorted by
/// (well, i, j, k). A full restatement of state, not a diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "DATE")]
    pub date: Option<NaiveDate>,
    pub wells: Vec<WellStatusRow>,
    pub connections: Vec<Connection>,
}
