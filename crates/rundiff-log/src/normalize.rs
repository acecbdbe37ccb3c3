// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Log normalization for equality decisions
//!
//! Captured output varies between runs in ways that carry no behavioral
//! meaning: timing values, iteration indexes, parameter payloads, and the
//! stack trace printed after a crash marker. Normalization rewrites those
//! away before two bodies are compared. The rewritten text is never stored;
//! records always keep their raw bodies.

use crate::classify::{SEG_FAULT_MARKER, SIG_ABORT_MARKER};
use crate::model::{TestRecord, TestStatus};
use regex::Regex;
use std::sync::LazyLock;

static PARAMS_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"GetParam\(\) =(.*)").expect("valid regex"));

static TIME_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+ ms").expect("valid regex"));

/// Normalize one test's raw output for comparison
///
/// `iter` is the record's iteration index; the `<test>/<iter>` rewrite only
/// applies to iterated tests.
#[must_use]
pub fn normalize_body(
    test_name: &str,
    status: TestStatus,
    iter: Option<u32>,
    body: &str,
) -> String {
    let mut text = body.replace(".DISABLED_", ".");

    if let Some(index) = iter {
        text = text.replace(
            &format!("{test_name}/{index}"),
            &format!("{test_name}/*"),
        );
    }

    text = PARAMS_LINE_RE
        .replace_all(&text, "GetParam() = *")
        .into_owned();

    // Stack traces after a crash marker vary between runs and must not
    // cause spurious differences.
    match status {
        TestStatus::SegFault => truncate_after_marker(&mut text, SEG_FAULT_MARKER),
        TestStatus::SigAbort => truncate_after_marker(&mut text, SIG_ABORT_MARKER),
        _ => {}
    }

    TIME_VALUE_RE.replace_all(&text, "ms").into_owned()
}

fn truncate_after_marker(text: &mut String, marker: &str) {
    if let Some(index) = text.find(marker) {
        text.truncate(index + marker.len());
    }
}

/// Normalized body of a record, using its own name, status and iteration
#[must_use]
pub fn normalized_record_body(record: &TestRecord) -> String {
    normalize_body(&record.name, record.status, record.iter, &record.body)
}

/// Whether two records are behaviorally equivalent
///
/// Equivalence means the same classified status and equal normalized bodies.
#[must_use]
pub fn records_equivalent(a: &TestRecord, b: &TestRecord) -> bool {
    a.status == b.status && normalized_record_body(a) == normalized_record_body(b)
}
