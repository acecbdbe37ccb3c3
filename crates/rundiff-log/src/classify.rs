// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Result classification from raw captured output
//!
//! Classification is ordered, first-match-wins. The order matters: a
//! crashing test usually also prints a `[  FAILED  ]` line, and the crash
//! diagnosis is the more valuable signal.

use crate::model::{TIME_UNKNOWN_MS, TestStatus};
use regex::Regex;
use std::sync::LazyLock;

/// Marker line a segmentation fault leaves in the output
pub const SEG_FAULT_MARKER: &str = "Received signal 11 (Segmentation fault)";
/// Marker line an abort (signal 6) leaves in the output
pub const SIG_ABORT_MARKER: &str = "Received signal 6 (Aborted)";

static DISABLED_SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"YOU HAVE [0-9]+ DISABLED TEST").expect("valid regex"));

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*\].*\(([0-9]+) ms( total)?\)").expect("valid regex"));

// The trailing `[ $]` keeps the greedy group from swallowing a timing
// suffix such as " (5 ms)" printed after the parameter tuple.
static PARAMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*\].*GetParam\(\) = (\(.*\))[ $]").expect("valid regex"));

/// Classify one test's raw output into a [`TestStatus`]
///
/// `test_name` is the declared name from the block header; it is needed for
/// the `[       OK ]` pattern, which must name this exact test.
#[must_use]
pub fn classify(test_name: &str, body: &str) -> TestStatus {
    if body.contains("Segmentation fault") {
        TestStatus::SegFault
    } else if body.contains("Assertion") {
        TestStatus::Assertion
    } else if body.contains(SIG_ABORT_MARKER) {
        TestStatus::SigAbort
    } else if body.contains("[  FAILED  ]") {
        TestStatus::Fail
    } else if DISABLED_SUMMARY_RE.is_match(body) {
        TestStatus::Disabled
    } else if body.contains("[==========] 0 tests from 0 test cases ran") {
        TestStatus::Empty
    } else if body.contains("[  PASSED  ] 1 test") {
        TestStatus::Pass
    } else if body.contains(&format!("[       OK ] {test_name}")) {
        TestStatus::Pass
    } else {
        TestStatus::Other
    }
}

/// Extract the elapsed time from the first `(<n> ms[ total])` occurrence
///
/// Returns [`TIME_UNKNOWN_MS`] if the output carries no timing line or the
/// number does not fit an `i64`.
#[must_use]
pub fn extract_time_ms(body: &str) -> i64 {
    for line in body.lines() {
        if let Some(captures) = TIME_RE.captures(line) {
            return captures[1].parse().unwrap_or(TIME_UNKNOWN_MS);
        }
    }
    TIME_UNKNOWN_MS
}

/// Extract the first `GetParam() = (...)` occurrence, if any
#[must_use]
pub fn extract_params(body: &str) -> Option<String> {
    for line in body.lines() {
        if let Some(captures) = PARAMS_RE.captures(line) {
            return Some(captures[1].to_string());
        }
    }
    None
}
