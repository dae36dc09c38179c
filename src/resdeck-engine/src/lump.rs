// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The connection-lump registry.
//!
//! A lump is a well-scoped, positive-integer-numbered grouping of
//! connections, declared as one or more coordinate ranges. A zero on an
//! axis is the "all values of that axis" sentinel and is kept as-is:
//! the full coordinate universe is only known from the live connection
//! table, so sentinel expansion happens at resolution time, not here.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{Result, on_or_before};
use crate::registry_err;

/// An inclusive coordinate box. On each axis, `(0, 0)` means every
/// value of that axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordRange {
    pub i: (i32, i32),
    pub j: (i32, i32),
    pub k: (i32, i32),
}

impl CoordRange {
    fn validate_axis(axis: &str, (lo, hi): (i32, i32)) -> Result<()> {
        if lo < 0 || hi < 0 {
            return registry_err!(
                Range,
                format!("negative {axis} values are not allowed: {lo}..{hi}")
            );
        }
        if (lo == 0) != (hi == 0) {
            return registry_err!(
                Range,
                format!("half-defaulted {axis} range is not allowed: {lo}..{hi}")
            );
        }
        if lo > hi {
            return registry_err!(
                Range,
                format!("{axis} range end {hi} is less than start {lo}")
            );
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        CoordRange::validate_axis("I", self.i)?;
        CoordRange::validate_axis("J", self.j)?;
        CoordRange::validate_axis("K", self.k)?;
        Ok(())
    }

    /// Whether the cell `(i, j, k)` falls inside this range, honoring
    /// the zero sentinel.
    pub fn contains(&self, i: i32, j: i32, k: i32) -> bool {
        fn axis_matches((lo, hi): (i32, i32), v: i32) -> bool {
            (lo == 0 && hi == 0) || (lo <= v && v <= hi)
        }
        axis_matches(self.i, i) && axis_matches(self.j, j) && axis_matches(self.k, k)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lump {
    pub well: String,
    pub number: i32,
    pub ranges: Vec<CoordRange>,
    /// The date the lump was declared; it is addressable from this date
    /// on.
    pub date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LumpRegistry {
    lumps: BTreeMap<(String, i32), Lump>,
}

impl LumpRegistry {
    pub fn new() -> LumpRegistry {
        Default::default()
    }

    /// Stores the coordinate ranges for `(well, number)`. Declaring the
    /// same key again overwrites the earlier declaration.
    pub fn declare(
        &mut self,
        well: &str,
        number: i32,
        ranges: Vec<CoordRange>,
        date: Option<NaiveDate>,
    ) -> Result<()> {
        if number < 1 {
            return registry_err!(
                Configuration,
                format!("lump numbers must be positive: got {number} for well {well}")
            );
        }
        for range in &ranges {
            range.validate()?;
        }
        self.lumps.insert(
            (well.to_string(), number),
            Lump {
                well: well.to_string(),
                number,
                ranges,
                date,
            },
        );
        Ok(())
    }

    /// The ranges composing `(well, number)`, as declared at or before
    /// `date`.
    pub fn ranges_for(&self, well: &str, number: i32, date: Option<NaiveDate>) -> Result<&[CoordRange]> {
        match self.lumps.get(&(well.to_string(), number)) {
            Some(lump) if on_or_before(lump.date, date) => Ok(&lump.ranges),
            _ => registry_err!(
                UnknownLump,
                format!("lump {number} is not declared for well {well}")
            ),
        }
    }

    /// All lumps of `well` whose number lies in `lo..=hi` and that were
    /// declared at or before `date`.
    pub fn lumps_in_interval(
        &self,
        well: &str,
        lo: i32,
        hi: i32,
        date: Option<NaiveDate>,
    ) -> Vec<&Lump> {
        self.lumps
            .range((well.to_string(), lo)..=(well.to_string(), hi))
            .map(|(_, lump)| lump)
            .filter(|lump| on_or_before(lump.date, date))
            .collect()
    }

    pub fn get(&self, well: &str, number: i32) -> Option<&Lump> {
        self.lumps.get(&(well.to_string(), number))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lump> {
        self.lumps.values()
    }

    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }
}
