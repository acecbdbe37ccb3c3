// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Diff record taxonomy
//!
//! Every discrepancy the comparator finds is one [`DiffRecord`] carrying a
//! [`Mismatch`] variant. Each variant holds only the fields that are
//! meaningful for its category; the report writer flattens them into fixed
//! CSV columns.

use rundiff_log::{TestRecord, TestStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Location and result summary of one side of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideInfo {
    /// Classified result on this side
    pub result: TestStatus,
    /// Individual log file the output came from
    pub log_file: String,
    /// 1-based header line in this side's unified log
    pub line: usize,
}

impl SideInfo {
    /// Summarize one record
    #[must_use]
    pub fn of(record: &TestRecord) -> Self {
        Self {
            result: record.status,
            log_file: record.log_file.clone(),
            line: record.line,
        }
    }
}

/// Line-level detail for a log mismatch, when full-diff detail is requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDiff {
    /// Inserted/deleted lines between the normalized bodies
    pub changed_lines: String,
    /// Raw reference-side body
    pub ref_body: String,
    /// Raw new-side body
    pub new_body: String,
}

/// One member of the closed taxonomy of reasons two runs differ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mismatch {
    /// Whole test file present in the reference run only
    FileMissingInNew,
    /// Test present in the reference run only (file present in both)
    TestMissingInNew,
    /// Whole test file present in the new run only
    FileMissingInRef,
    /// Test present in the new run only (file present in both)
    TestMissingInRef {
        /// New-side summary
        new: SideInfo,
        /// The new side's full iteration list; empty for a plain test
        iterations: Vec<u32>,
    },
    /// The two runs classified the test differently
    MismatchingResults {
        /// Reference-side summary
        reference: SideInfo,
        /// New-side summary
        new: SideInfo,
        /// Iterations this comparison covered; empty for a plain test
        iterations: Vec<u32>,
    },
    /// Same non-passing result but the normalized logs differ
    MismatchingLogs {
        /// Reference-side summary
        reference: SideInfo,
        /// New-side summary
        new: SideInfo,
        /// Iterations this comparison covered; empty for a plain test
        iterations: Vec<u32>,
        /// Line-level diff, present when full-diff detail was requested
        detail: Option<LogDiff>,
    },
    /// Both sides passed but the new run was slower than the threshold allows
    NewTestTookTooLong {
        /// Reference-side summary
        reference: SideInfo,
        /// New-side summary
        new: SideInfo,
        /// Reference elapsed time (ms)
        ref_time_ms: i64,
        /// New elapsed time (ms)
        new_time_ms: i64,
    },
    /// Plain test in the reference, parameterized in the new run
    NoItersInRefWithItersInNew,
    /// Parameterized in the reference, plain test in the new run
    WithItersInRefNoItersInNew,
    /// Iterations present in the reference but absent from the new run
    ItersMissingInNew {
        /// Reference-side summary (first iteration)
        reference: SideInfo,
        /// New-side summary (first iteration)
        new: SideInfo,
        /// The missing iteration indexes
        iterations: Vec<u32>,
    },
    /// Iterations present in the new run but absent from the reference
    ItersMissingInRef {
        /// Reference-side summary (first iteration)
        reference: SideInfo,
        /// New-side summary (first iteration)
        new: SideInfo,
        /// The missing iteration indexes
        iterations: Vec<u32>,
    },
    /// Matching iteration recorded different `GetParam()` values
    MismatchingIterParameters {
        /// Reference-side summary
        reference: SideInfo,
        /// New-side summary
        new: SideInfo,
        /// The affected iteration
        iteration: u32,
        /// Reference-side parameter string
        ref_params: Option<String>,
        /// New-side parameter string
        new_params: Option<String>,
    },
}

impl Mismatch {
    /// Category name as reported in the CSV
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Mismatch::FileMissingInNew => "FILE_MISSING_IN_NEW",
            Mismatch::TestMissingInNew => "TEST_MISSING_IN_NEW",
            Mismatch::FileMissingInRef => "FILE_MISSING_IN_REF",
            Mismatch::TestMissingInRef { .. } => "TEST_MISSING_IN_REF",
            Mismatch::MismatchingResults { .. } => "MISMATCHING_RESULTS",
            Mismatch::MismatchingLogs { .. } => "MISMATCHING_LOGS",
            Mismatch::NewTestTookTooLong { .. } => "NEW_TEST_TOOK_TOO_LONG",
            Mismatch::NoItersInRefWithItersInNew => "TEST_NO_ITERS_IN_REF_WITH_ITERS_IN_NEW",
            Mismatch::WithItersInRefNoItersInNew => "TEST_WITH_ITERS_IN_REF_NO_ITERS_IN_NEW",
            Mismatch::ItersMissingInNew { .. } => "ITERS_MISSING_IN_NEW",
            Mismatch::ItersMissingInRef { .. } => "ITERS_MISSING_IN_REF",
            Mismatch::MismatchingIterParameters { .. } => "MISMATCHING_ITER_PARAMETERS",
        }
    }

    /// Whether this category means the runs are not identical
    ///
    /// Execution time is expected to vary between runs, so a time regression
    /// alone never marks the runs as different.
    #[must_use]
    pub fn marks_runs_different(&self) -> bool {
        !matches!(self, Mismatch::NewTestTookTooLong { .. })
    }

    /// Reference-side summary, where the category carries one
    #[must_use]
    pub fn ref_side(&self) -> Option<&SideInfo> {
        match self {
            Mismatch::MismatchingResults { reference, .. }
            | Mismatch::MismatchingLogs { reference, .. }
            | Mismatch::NewTestTookTooLong { reference, .. }
            | Mismatch::ItersMissingInNew { reference, .. }
            | Mismatch::ItersMissingInRef { reference, .. }
            | Mismatch::MismatchingIterParameters { reference, .. } => Some(reference),
            _ => None,
        }
    }

    /// New-side summary, where the category carries one
    #[must_use]
    pub fn new_side(&self) -> Option<&SideInfo> {
        match self {
            Mismatch::TestMissingInRef { new, .. }
            | Mismatch::MismatchingResults { new, .. }
            | Mismatch::MismatchingLogs { new, .. }
            | Mismatch::NewTestTookTooLong { new, .. }
            | Mismatch::ItersMissingInNew { new, .. }
            | Mismatch::ItersMissingInRef { new, .. }
            | Mismatch::MismatchingIterParameters { new, .. } => Some(new),
            _ => None,
        }
    }

    /// Iterations involved, where the category carries any
    #[must_use]
    pub fn iterations(&self) -> Option<&[u32]> {
        match self {
            Mismatch::TestMissingInRef { iterations, .. }
            | Mismatch::MismatchingResults { iterations, .. }
            | Mismatch::MismatchingLogs { iterations, .. }
            | Mismatch::ItersMissingInNew { iterations, .. }
            | Mismatch::ItersMissingInRef { iterations, .. } => Some(iterations),
            Mismatch::MismatchingIterParameters { iteration, .. } => {
                Some(std::slice::from_ref(iteration))
            }
            _ => None,
        }
    }

    /// The three free-form notes columns of the report
    #[must_use]
    pub fn notes(&self) -> [String; 3] {
        match self {
            Mismatch::MismatchingLogs { detail, .. } => match detail {
                Some(diff) => [
                    diff.changed_lines.clone(),
                    diff.ref_body.clone(),
                    diff.new_body.clone(),
                ],
                None => [
                    "Check Logs of both tests to find the differences".to_string(),
                    String::new(),
                    String::new(),
                ],
            },
            Mismatch::NewTestTookTooLong {
                ref_time_ms,
                new_time_ms,
                ..
            } => [
                format!("ref time (ms) = {ref_time_ms}"),
                format!(
                    "new time (ms) = {new_time_ms} ({})",
                    percentage_diff_str(*ref_time_ms, *new_time_ms)
                ),
                String::new(),
            ],
            Mismatch::MismatchingIterParameters {
                ref_params,
                new_params,
                ..
            } => [
                format!("Ref-Iter-Params = {}", ref_params.as_deref().unwrap_or("")),
                format!("New-Iter-Params = {}", new_params.as_deref().unwrap_or("")),
                String::new(),
            ],
            _ => [String::new(), String::new(), String::new()],
        }
    }
}

/// One row of the comparison report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    /// Test file the diff belongs to
    pub file: String,
    /// Test name; `None` for file-level diffs
    pub test: Option<String>,
    /// What differed
    pub mismatch: Mismatch,
}

impl DiffRecord {
    /// Total order used for the final report: (file, test)
    #[must_use]
    pub fn sort_key(&self) -> (&str, Option<&str>) {
        (&self.file, self.test.as_deref())
    }

    /// Iterations column as displayed in the report
    ///
    /// A contiguous range of more than two iterations is rendered as
    /// `min - max`; anything else is comma-joined.
    #[must_use]
    pub fn iterations_display(&self) -> String {
        let Some(iterations) = self.mismatch.iterations() else {
            return String::new();
        };
        format_iterations(iterations)
    }
}

impl PartialOrd for DiffRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DiffRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

fn format_iterations(iterations: &[u32]) -> String {
    if iterations.is_empty() {
        return String::new();
    }

    let mut sorted = iterations.to_vec();
    sorted.sort_unstable();
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    let contiguous = sorted.len() as u64 == u64::from(max - min) + 1;
    if sorted.len() > 2 && contiguous {
        format!("{min} - {max}")
    } else {
        let parts: Vec<String> = iterations.iter().map(u32::to_string).collect();
        parts.join(",")
    }
}

/// Percentage increase of `new` over `ref`, rounded, as display text
#[must_use]
pub fn percentage_diff_str(reference: i64, new: i64) -> String {
    if reference <= 0 {
        return "n/a".to_string();
    }
    let percentage = 100.0 * (new - reference) as f64 / reference as f64;
    format!("{}%", percentage.round() as i64)
}
