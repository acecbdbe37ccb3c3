// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Data model for a parsed test run
//!
//! A parsed unified log becomes a [`Corpus`]: a mapping of test file name to
//! test name to [`TestShape`]. A test either ran once ([`TestShape::Single`])
//! or as a set of numbered iterations of a parameterized test, collapsed into
//! equivalence groups ([`TestShape::Grouped`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata block at the top of a unified log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Date the run was collected
    pub date: String,
    /// Folder the individual logs were collected from
    pub folder: String,
    /// Free-text description of the run (branch, version, ...)
    pub description: String,
}

/// Classified outcome of a single test invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    /// Test passed
    Pass,
    /// Test reported an explicit failure
    Fail,
    /// Test was disabled
    Disabled,
    /// Log shows zero tests ran
    Empty,
    /// Assertion failure in the test body
    Assertion,
    /// Test crashed with a segmentation fault
    SegFault,
    /// Test aborted (signal 6)
    SigAbort,
    /// Output matched none of the known patterns
    Other,
}

impl TestStatus {
    /// Upper-case name used in reports
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Disabled => "DISABLED",
            TestStatus::Empty => "EMPTY",
            TestStatus::Assertion => "ASSERTION",
            TestStatus::SegFault => "SEG_FAULT",
            TestStatus::SigAbort => "SIG_ABORT",
            TestStatus::Other => "OTHER",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elapsed time sentinel for "no timing information in the log"
pub const TIME_UNKNOWN_MS: i64 = -1;

/// One test invocation parsed out of the unified log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Name of the individual log file the output came from
    pub log_file: String,
    /// Test file (binary) the test belongs to
    pub file: String,
    /// Test name, without any iteration suffix
    pub name: String,
    /// Iteration index for parameterized tests, `None` for plain tests
    pub iter: Option<u32>,
    /// Whether the test was disabled
    pub disabled: bool,
    /// Classified result
    pub status: TestStatus,
    /// Elapsed time in milliseconds, [`TIME_UNKNOWN_MS`] if absent
    pub time_ms: i64,
    /// 1-based line of the test header inside the unified log
    pub line: usize,
    /// Raw captured output, comment lines removed
    pub body: String,
    /// `GetParam()` value if the log recorded one
    pub params: Option<String>,
}

/// A group of iterations of one test whose normalized output is identical
///
/// Iterations are keyed by their index; the first member is the group's
/// representative for comparison purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterGroup {
    /// Member iterations, ordered by index
    pub tests: BTreeMap<u32, TestRecord>,
}

impl IterGroup {
    /// Representative record (first member)
    ///
    /// # Panics
    ///
    /// Panics if the group is empty; the grouper never produces empty groups.
    #[must_use]
    pub fn first(&self) -> &TestRecord {
        self.tests
            .values()
            .next()
            .expect("iteration group is never empty")
    }

    /// Member iteration indexes, ascending
    #[must_use]
    pub fn iter_indexes(&self) -> Vec<u32> {
        self.tests.keys().copied().collect()
    }

    /// Smallest elapsed time among members
    #[must_use]
    pub fn min_time_ms(&self) -> i64 {
        self.tests
            .values()
            .map(|t| t.time_ms)
            .min()
            .unwrap_or(TIME_UNKNOWN_MS)
    }

    /// Largest elapsed time among members
    #[must_use]
    pub fn max_time_ms(&self) -> i64 {
        self.tests
            .values()
            .map(|t| t.time_ms)
            .max()
            .unwrap_or(TIME_UNKNOWN_MS)
    }
}

/// Shape of one test within a run
///
/// Exactly one shape holds per (file, test). The comparator checks the shape
/// once at its entry instead of inspecting records downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestShape {
    /// Test ran once, without iterations
    Single(TestRecord),
    /// Parameterized test: iterations collapsed into equivalence groups
    Grouped(Vec<IterGroup>),
}

impl TestShape {
    /// Representative record for reporting (first record of the first group)
    #[must_use]
    pub fn first_record(&self) -> &TestRecord {
        match self {
            TestShape::Single(record) => record,
            TestShape::Grouped(groups) => groups[0].first(),
        }
    }

    /// All iteration indexes across groups, ascending; empty for `Single`
    #[must_use]
    pub fn all_iter_indexes(&self) -> Vec<u32> {
        match self {
            TestShape::Single(_) => Vec::new(),
            TestShape::Grouped(groups) => {
                let mut indexes: Vec<u32> =
                    groups.iter().flat_map(IterGroup::iter_indexes).collect();
                indexes.sort_unstable();
                indexes
            }
        }
    }
}

/// Tests of one run: file name -> test name -> shape
pub type Corpus = BTreeMap<String, BTreeMap<String, TestShape>>;

/// A structural problem found while parsing; the affected block was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralError {
    /// What went wrong
    pub message: String,
    /// Line range of the affected block in the unified log, if known
    pub lines: Option<(usize, usize)>,
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lines {
            Some((first, last)) => write!(f, "lines [{first} - {last}]: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Result of parsing one unified log
///
/// Structural errors are carried as values rather than aborting the parse;
/// the caller decides what they mean for the process exit status.
#[derive(Debug, Clone)]
pub struct ParsedLog {
    /// Run metadata from the top of the log
    pub metadata: RunMetadata,
    /// All parsed tests
    pub corpus: Corpus,
    /// Blocks that could not be parsed
    pub errors: Vec<StructuralError>,
}
