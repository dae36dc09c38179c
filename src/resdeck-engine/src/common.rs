// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use chrono::NaiveDate;

// Re-export all common types from resdeck-core
pub use resdeck_core::common::*;

/// "at or before", where an undated event sorts before every dated one.
///
/// Records picked up before any date marker carry no date; they are
/// considered in effect from the beginning of the schedule.
pub fn on_or_before(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    match (a, b) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(a), Some(b)) => a <= b,
    }
}

// Macros for error creation - these need to stay in resdeck-engine
// as they use crate-local paths

#[macro_export]
macro_rules! deck_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Deck, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Deck, ErrorCode::$code, None))
    }};
}

#[macro_export]
macro_rules! registry_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Registry, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Registry, ErrorCode::$code, None))
    }};
}

#[macro_export]
macro_rules! sched_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Schedule, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Schedule, ErrorCode::$code, None))
    }};
}
