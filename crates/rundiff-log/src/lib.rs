// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! rundiff-log: Unified test-run log parsing for rundiff
//!
//! This library crate parses the unified log produced by collecting a test
//! suite's individual run logs into a structured per-run corpus: one
//! [`TestRecord`] per test invocation, with parameterized test iterations
//! collapsed into equivalence groups.
//!
//! # Example
//!
//! ```no_run
//! use rundiff_log::parse_unified_log_file;
//!
//! let parsed = parse_unified_log_file("make_check_ref.log").unwrap();
//! for error in &parsed.errors {
//!     eprintln!("{error}");
//! }
//! println!("{} test files", parsed.corpus.len());
//! ```

#![warn(missing_docs)]

pub mod classify;
pub mod error;
pub mod group;
pub mod model;
pub mod normalize;
pub mod parser;

pub use error::LogError;
pub use group::group_equivalent_iters;
pub use model::{
    Corpus, IterGroup, ParsedLog, RunMetadata, StructuralError, TIME_UNKNOWN_MS, TestRecord,
    TestShape, TestStatus,
};
pub use normalize::{normalize_body, normalized_record_body, records_equivalent};
pub use parser::{parse_unified_log, parse_unified_log_file};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::LogError;
    pub use crate::model::{Corpus, ParsedLog, RunMetadata, TestRecord, TestShape, TestStatus};
    pub use crate::parser::{parse_unified_log, parse_unified_log_file};
}
