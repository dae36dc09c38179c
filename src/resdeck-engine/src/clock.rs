// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The simulation clock: tracks "current date" as the keyword stream is
//! consumed. Absolute date markers move the clock forward; relative
//! time advances accumulate whole days on top of an established date.

use chrono::{Days, NaiveDate};
use log::info;

use crate::common::Result;
use crate::{deck_err, sched_err};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    current: Option<NaiveDate>,
}

impl Clock {
    /// A clock optionally seeded with a default start date, used for
    /// events occurring before any date marker in the stream.
    pub fn new(start_date: Option<NaiveDate>) -> Clock {
        Clock {
            current: start_date,
        }
    }

    /// The current date, or `None` when no date has been established.
    pub fn current(&self) -> Option<NaiveDate> {
        self.current
    }

    /// Moves the clock to an absolute date. Dates must be non-decreasing
    /// over the stream.
    pub fn advance_to(&mut self, date: NaiveDate) -> Result<()> {
        if let Some(current) = self.current
            && date < current
        {
            return deck_err!(
                Ordering,
                format!("date {date} is earlier than current date {current}")
            );
        }
        info!("parsing at date {date}");
        self.current = Some(date);
        Ok(())
    }

    /// Adds a relative time advance of `days` whole days.
    pub fn advance_by_days(&mut self, days: i64) -> Result<NaiveDate> {
        let Some(current) = self.current else {
            return sched_err!(
                Configuration,
                "can't advance by days when no start date is established".to_string()
            );
        };
        if days < 0 {
            return deck_err!(Range, format!("negative time advance: {days} days"));
        }
        let advanced = match current.checked_add_days(Days::new(days as u64)) {
            Some(date) => date,
            None => {
                return deck_err!(
                    Range,
                    format!("date overflow advancing {days} days from {current}")
                );
            }
        };
        info!("advancing {days} days to {advanced}");
        self.current = Some(advanced);
        Ok(advanced)
    }
}
