// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError, // will never be produced
    Generic,
    Ordering,      // dates in the schedule stream went backwards
    Configuration, // malformed or self-contradictory record/selector
    Range,         // inverted or negative numeric range
    UnknownWell,
    UnknownList,
    UnknownLump,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            Generic => "generic",
            Ordering => "ordering",
            Configuration => "configuration",
            Range => "range",
            UnknownWell => "unknown_well",
            UnknownList => "unknown_list",
            UnknownLump => "unknown_lump",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Deck,
    Registry,
    Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Deck => "DeckError",
            ErrorKind::Registry => "RegistryError",
            ErrorKind::Schedule => "ScheduleError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

#[test]
fn test_error_display() {
    let err = Error::new(
        ErrorKind::Schedule,
        ErrorCode::UnknownWell,
        Some("OP1".to_string()),
    );
    assert_eq!(format!("{err}"), "ScheduleError{unknown_well: OP1}");

    let err = Error::new(ErrorKind::Deck, ErrorCode::Ordering, None);
    assert_eq!(format!("{err}"), "DeckError{ordering}");
}
