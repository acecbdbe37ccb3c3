// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! rundiff-compare: Differential comparison of parsed test runs
//!
//! Given two corpora produced by `rundiff-log` (a reference run and a new
//! run), this crate enumerates every discrepancy between them as a typed
//! [`Mismatch`] and renders an aggregate verdict: identical or different.
//! Execution-time regressions are reported but never flip the verdict.
//!
//! # Example
//!
//! ```no_run
//! use rundiff_compare::{CompareOptions, compare_corpora};
//! use rundiff_log::parse_unified_log_file;
//!
//! let reference = parse_unified_log_file("make_check_ref.log").unwrap();
//! let new = parse_unified_log_file("make_check_new.log").unwrap();
//! let outcome = compare_corpora(&reference.corpus, &new.corpus, &CompareOptions::default());
//! for diff in &outcome.diffs {
//!     println!("{}: {}", diff.file, diff.mismatch.kind());
//! }
//! ```

#![warn(missing_docs)]

pub mod compare;
pub mod diff;

pub use compare::{CompareOptions, CompareOutcome, compare_corpora};
pub use diff::{DiffRecord, LogDiff, Mismatch, SideInfo};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::compare::{CompareOptions, CompareOutcome, compare_corpora};
    pub use crate::diff::{DiffRecord, Mismatch};
}
