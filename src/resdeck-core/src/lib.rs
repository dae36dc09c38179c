// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod common;
pub mod pattern;

// Re-export key types from common
pub use common::{Error, ErrorCode, ErrorKind, Result};

// Re-export the well-name matcher
pub use pattern::{glob_match, has_wildcard, wells_matching_template};
