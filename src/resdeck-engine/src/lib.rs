// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Temporal schedule resolution for reservoir-simulation decks.
//!
//! The engine folds a date-ordered stream of decoded schedule keywords
//! (time advances, connection definitions, well-list mutations, lump
//! declarations, open/shut directives) into a sequence of snapshots:
//! at every instant something changed, one fully restated table of
//! which connections are open and which are shut, plus the standalone
//! per-well flags. The well-list and lump registries come out alongside
//! for downstream exporters.

#![forbid(unsafe_code)]

pub use chrono;

pub mod common;
pub mod datamodel;

mod clock;
mod lump;
mod schedule;
mod table;
mod unroll;
mod welopen;
mod wlist;

pub use self::clock::Clock;
pub use self::common::{Error, ErrorCode, ErrorKind, Result};
pub use self::lump::{CoordRange, Lump, LumpRegistry};
pub use self::schedule::{ScheduleResolution, ScheduleSession, resolve_schedule};
pub use self::table::{ConnectionTable, WellState};
pub use self::unroll::{LayerRange, Unroll, unroll};
pub use self::wlist::{ListMutation, WellList, WellListRegistry};
