// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Unrolls records that cover a closed integer range into one record
//! per discrete value.
//!
//! A connection definition may span several layers at once (`k1..=k2`).
//! Downstream resolution wants atomic rows, so ranges are expanded
//! eagerly in the fold but lazily per record: the iterator yields one
//! copy per layer, ascending, with both range fields pinned to that
//! layer. A record with `k1 == k2` yields exactly itself.

use crate::common::Result;
use crate::datamodel::CompdatRecord;
use crate::deck_err;

/// A record carrying a closed integer range that can be pinned to a
/// single value of that range.
pub trait LayerRange: Clone {
    fn range_start(&self) -> i32;
    fn range_end(&self) -> i32;
    /// A copy of the record with both range fields set to `value`.
    fn at(&self, value: i32) -> Self;
}

impl LayerRange for CompdatRecord {
    fn range_start(&self) -> i32 {
        self.k1
    }

    fn range_end(&self) -> i32 {
        self.k2
    }

    fn at(&self, value: i32) -> CompdatRecord {
        let mut rec = self.clone();
        rec.k1 = value;
        rec.k2 = value;
        rec
    }
}

/// Lazy ascending expansion of `record` over its range.
pub fn unroll<R: LayerRange>(record: R) -> Result<Unroll<R>> {
    let start = record.range_start();
    let end = record.range_end();
    if start > end {
        return deck_err!(
            Range,
            format!("range end {end} is less than range start {start}")
        );
    }
    Ok(Unroll {
        record,
        next: start,
        end,
    })
}

#[derive(Debug)]
pub struct Unroll<R> {
    record: R,
    next: i32,
    end: i32,
}

impl<R: LayerRange> Iterator for Unroll<R> {
    type Item = R;

    fn next(&mut self) -> Option<R> {
        if self.next > self.end {
            return None;
        }
        let item = self.record.at(self.next);
        self.next += 1;
        Some(item)
    }
}
