// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Differential comparison of two parsed runs
//!
//! The comparator walks the reference corpus first, reporting anything
//! missing or different on the new side, then sweeps the new corpus for
//! files and tests the reference never had. It never aborts on a semantic
//! difference; every discrepancy is enumerated and the caller reads the
//! aggregate verdict off the returned [`CompareOutcome`].

use crate::diff::{DiffRecord, LogDiff, Mismatch, SideInfo};
use rundiff_log::{Corpus, IterGroup, TestRecord, TestShape, TestStatus, normalized_record_body};
use similar::{ChangeTag, TextDiff};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Tunables for the comparison pass
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Whether to check passing tests for time regressions at all
    pub check_too_long: bool,
    /// Minimum elapsed time (ms) on either side before the regression rule
    /// applies
    pub min_ref_time_ms: i64,
    /// Percentage increase over the reference time that counts as too long
    pub max_time_increase_percent: i64,
    /// Attach line-level diffs to MISMATCHING_LOGS records
    pub full_diff: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            check_too_long: true,
            min_ref_time_ms: 100,
            max_time_increase_percent: 30,
            full_diff: false,
        }
    }
}

/// Result of comparing two corpora
#[derive(Debug, Clone)]
pub struct CompareOutcome {
    /// All discrepancies, ordered by (file, test)
    pub diffs: Vec<DiffRecord>,
    /// True when no diff marks the runs as different
    ///
    /// Time regressions may be present in `diffs` with the verdict still
    /// "identical".
    pub runs_identical: bool,
}

/// Compare a reference corpus against a new corpus
#[must_use]
pub fn compare_corpora(
    reference: &Corpus,
    new: &Corpus,
    options: &CompareOptions,
) -> CompareOutcome {
    let mut cx = Comparator {
        options,
        diffs: Vec::new(),
        runs_identical: true,
    };

    // Reference-driven pass: files/tests missing in new, and pairwise
    // comparison of everything present on both sides.
    for (file, ref_tests) in reference {
        match new.get(file) {
            None => cx.push(file, None, Mismatch::FileMissingInNew),
            Some(new_tests) => {
                for (test, ref_shape) in ref_tests {
                    match new_tests.get(test) {
                        None => cx.push(file, Some(test), Mismatch::TestMissingInNew),
                        Some(new_shape) => cx.compare_shapes(file, test, ref_shape, new_shape),
                    }
                }
            }
        }
    }

    // New-side pass: whatever only the new run has.
    for (file, new_tests) in new {
        match reference.get(file) {
            None => cx.push(file, None, Mismatch::FileMissingInRef),
            Some(ref_tests) => {
                for (test, new_shape) in new_tests {
                    if !ref_tests.contains_key(test) {
                        cx.push(
                            file,
                            Some(test),
                            Mismatch::TestMissingInRef {
                                new: SideInfo::of(new_shape.first_record()),
                                iterations: new_shape.all_iter_indexes(),
                            },
                        );
                    }
                }
            }
        }
    }

    cx.diffs.sort();
    debug!(
        diffs = cx.diffs.len(),
        identical = cx.runs_identical,
        "comparison finished"
    );

    CompareOutcome {
        diffs: cx.diffs,
        runs_identical: cx.runs_identical,
    }
}

struct Comparator<'a> {
    options: &'a CompareOptions,
    diffs: Vec<DiffRecord>,
    runs_identical: bool,
}

impl Comparator<'_> {
    fn push(&mut self, file: &str, test: Option<&str>, mismatch: Mismatch) {
        if mismatch.marks_runs_different() {
            self.runs_identical = false;
        }
        self.diffs.push(DiffRecord {
            file: file.to_string(),
            test: test.map(str::to_string),
            mismatch,
        });
    }

    /// Shape dispatch, checked once at the comparator's entry
    fn compare_shapes(
        &mut self,
        file: &str,
        test: &str,
        ref_shape: &TestShape,
        new_shape: &TestShape,
    ) {
        match (ref_shape, new_shape) {
            (TestShape::Single(ref_record), TestShape::Single(new_record)) => {
                self.compare_records(file, test, ref_record, new_record, Vec::new());
            }
            (TestShape::Single(_), TestShape::Grouped(_)) => {
                self.push(file, Some(test), Mismatch::NoItersInRefWithItersInNew);
            }
            (TestShape::Grouped(_), TestShape::Single(_)) => {
                self.push(file, Some(test), Mismatch::WithItersInRefNoItersInNew);
            }
            (TestShape::Grouped(ref_groups), TestShape::Grouped(new_groups)) => {
                self.compare_grouped(file, test, ref_groups, new_groups);
            }
        }
    }

    /// Pairwise comparison of two records (or two group representatives)
    fn compare_records(
        &mut self,
        file: &str,
        test: &str,
        ref_record: &TestRecord,
        new_record: &TestRecord,
        iterations: Vec<u32>,
    ) {
        if ref_record.status != new_record.status {
            self.push(
                file,
                Some(test),
                Mismatch::MismatchingResults {
                    reference: SideInfo::of(ref_record),
                    new: SideInfo::of(new_record),
                    iterations,
                },
            );
        } else if ref_record.status == TestStatus::Pass {
            self.check_too_long(file, test, ref_record, new_record);
        } else {
            // Same non-passing result; the logs may still disagree in a way
            // that needs investigation.
            let ref_normalized = normalized_record_body(ref_record);
            let new_normalized = normalized_record_body(new_record);
            if ref_normalized != new_normalized {
                let detail = self.options.full_diff.then(|| LogDiff {
                    changed_lines: changed_lines(&ref_normalized, &new_normalized),
                    ref_body: ref_record.body.clone(),
                    new_body: new_record.body.clone(),
                });
                self.push(
                    file,
                    Some(test),
                    Mismatch::MismatchingLogs {
                        reference: SideInfo::of(ref_record),
                        new: SideInfo::of(new_record),
                        iterations,
                        detail,
                    },
                );
            }
        }
    }

    /// Time-regression rule for tests that passed on both sides
    fn check_too_long(
        &mut self,
        file: &str,
        test: &str,
        ref_record: &TestRecord,
        new_record: &TestRecord,
    ) {
        if !self.options.check_too_long {
            return;
        }

        let ref_time = ref_record.time_ms;
        let new_time = new_record.time_ms;
        let minimum = self.options.min_ref_time_ms;
        let threshold = ref_time * (100 + self.options.max_time_increase_percent) / 100;

        if (ref_time >= minimum || new_time >= minimum) && new_time >= threshold {
            self.push(
                file,
                Some(test),
                Mismatch::NewTestTookTooLong {
                    reference: SideInfo::of(ref_record),
                    new: SideInfo::of(new_record),
                    ref_time_ms: ref_time,
                    new_time_ms: new_time,
                },
            );
        }
    }

    /// Reconciliation of two grouped (parameterized) tests
    fn compare_grouped(
        &mut self,
        file: &str,
        test: &str,
        ref_groups: &[IterGroup],
        new_groups: &[IterGroup],
    ) {
        let ref_map = iters_to_groups(ref_groups);
        let new_map = iters_to_groups(new_groups);

        let ref_keys: BTreeSet<u32> = ref_map.keys().copied().collect();
        let new_keys: BTreeSet<u32> = new_map.keys().copied().collect();

        if ref_keys != new_keys {
            // Mismatched iteration sets mean the runs are not comparable at
            // iteration granularity for this test.
            let reference = SideInfo::of(ref_groups[0].first());
            let new = SideInfo::of(new_groups[0].first());

            let missing_in_new: Vec<u32> = ref_keys.difference(&new_keys).copied().collect();
            if !missing_in_new.is_empty() {
                self.push(
                    file,
                    Some(test),
                    Mismatch::ItersMissingInNew {
                        reference: reference.clone(),
                        new: new.clone(),
                        iterations: missing_in_new,
                    },
                );
            }

            let missing_in_ref: Vec<u32> = new_keys.difference(&ref_keys).copied().collect();
            if !missing_in_ref.is_empty() {
                self.push(
                    file,
                    Some(test),
                    Mismatch::ItersMissingInRef {
                        reference,
                        new,
                        iterations: missing_in_ref,
                    },
                );
            }
            return;
        }

        // Matching iterations must agree on their recorded parameters.
        // A mismatch is reported per iteration but does not stop the
        // remaining checks.
        for index in &ref_keys {
            let ref_record = find_iteration(ref_groups, *index);
            let new_record = find_iteration(new_groups, *index);
            if let (Some(ref_params), Some(new_params)) = (&ref_record.params, &new_record.params) {
                if ref_params != new_params {
                    self.push(
                        file,
                        Some(test),
                        Mismatch::MismatchingIterParameters {
                            reference: SideInfo::of(ref_record),
                            new: SideInfo::of(new_record),
                            iteration: *index,
                            ref_params: Some(ref_params.clone()),
                            new_params: Some(new_params.clone()),
                        },
                    );
                }
            }
        }

        // Bucket iterations by their (ref group, new group) pair. All members
        // of a bucket are textually equivalent within each run, so comparing
        // one representative per bucket covers every member without the
        // quadratic work.
        let mut buckets: BTreeMap<(usize, usize), Vec<u32>> = BTreeMap::new();
        for (index, ref_group) in &ref_map {
            buckets
                .entry((*ref_group, new_map[index]))
                .or_default()
                .push(*index);
        }

        for iterations in buckets.into_values() {
            let representative = iterations[0];
            let ref_record = find_iteration(ref_groups, representative);
            let new_record = find_iteration(new_groups, representative);
            self.compare_records(file, test, ref_record, new_record, iterations);
        }
    }
}

/// Map each iteration index to the index of the group containing it
fn iters_to_groups(groups: &[IterGroup]) -> BTreeMap<u32, usize> {
    let mut map = BTreeMap::new();
    for (group_index, group) in groups.iter().enumerate() {
        for index in group.tests.keys() {
            map.insert(*index, group_index);
        }
    }
    map
}

fn find_iteration(groups: &[IterGroup], index: u32) -> &TestRecord {
    groups
        .iter()
        .find_map(|group| group.tests.get(&index))
        .expect("iteration index comes from these groups")
}

/// Inserted/deleted lines between two texts, ndiff style
fn changed_lines(reference: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(reference, new);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "- ",
            ChangeTag::Insert => "+ ",
            ChangeTag::Equal => continue,
        };
        out.push_str(sign);
        out.push_str(change.value());
        if !change.value().ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rundiff_log::group_equivalent_iters;
    use similar_asserts::assert_eq;
    use std::collections::BTreeMap as Map;

    fn record(file: &str, name: &str, iter: Option<u32>, status: TestStatus) -> TestRecord {
        TestRecord {
            log_file: format!("log-run-{file}-{name}"),
            file: file.to_string(),
            name: name.to_string(),
            iter,
            disabled: false,
            status,
            time_ms: 10,
            line: 1,
            body: format!("body of {name}"),
            params: None,
        }
    }

    fn corpus(shapes: Vec<(&str, &str, TestShape)>) -> Corpus {
        let mut out: Corpus = Map::new();
        for (file, test, shape) in shapes {
            out.entry(file.to_string())
                .or_default()
                .insert(test.to_string(), shape);
        }
        out
    }

    fn grouped(records: Vec<TestRecord>) -> TestShape {
        let iters: Map<u32, TestRecord> = records
            .into_iter()
            .map(|r| (r.iter.expect("iterated record"), r))
            .collect();
        TestShape::Grouped(group_equivalent_iters(iters))
    }

    fn kinds(outcome: &CompareOutcome) -> Vec<&'static str> {
        outcome.diffs.iter().map(|d| d.mismatch.kind()).collect()
    }

    #[test]
    fn test_identical_corpora_produce_no_diffs() {
        let reference = corpus(vec![
            (
                "F",
                "T",
                TestShape::Single(record("F", "T", None, TestStatus::Pass)),
            ),
            (
                "F",
                "U",
                grouped(vec![
                    record("F", "U", Some(0), TestStatus::Pass),
                    record("F", "U", Some(1), TestStatus::Pass),
                ]),
            ),
        ]);
        let outcome = compare_corpora(&reference, &reference.clone(), &CompareOptions::default());
        assert!(outcome.diffs.is_empty());
        assert!(outcome.runs_identical);
    }

    #[test]
    fn test_file_missing_in_new_suppresses_per_test_diffs() {
        let reference = corpus(vec![
            (
                "A",
                "T1",
                TestShape::Single(record("A", "T1", None, TestStatus::Pass)),
            ),
            (
                "A",
                "T2",
                TestShape::Single(record("A", "T2", None, TestStatus::Fail)),
            ),
        ]);
        let new = corpus(vec![]);
        let outcome = compare_corpora(&reference, &new, &CompareOptions::default());

        assert_eq!(kinds(&outcome), vec!["FILE_MISSING_IN_NEW"]);
        assert_eq!(outcome.diffs[0].file, "A");
        assert_eq!(outcome.diffs[0].test, None);
        assert!(!outcome.runs_identical);
    }

    #[test]
    fn test_test_missing_in_new() {
        let reference = corpus(vec![
            (
                "F",
                "T",
                TestShape::Single(record("F", "T", None, TestStatus::Pass)),
            ),
            (
                "F",
                "U",
                TestShape::Single(record("F", "U", None, TestStatus::Pass)),
            ),
        ]);
        let new = corpus(vec![(
            "F",
            "T",
            TestShape::Single(record("F", "T", None, TestStatus::Pass)),
        )]);
        let outcome = compare_corpora(&reference, &new, &CompareOptions::default());
        assert_eq!(kinds(&outcome), vec!["TEST_MISSING_IN_NEW"]);
        assert_eq!(outcome.diffs[0].test.as_deref(), Some("U"));
    }

    #[test]
    fn test_new_side_additions_reported() {
        let reference = corpus(vec![(
            "F",
            "T",
            TestShape::Single(record("F", "T", None, TestStatus::Pass)),
        )]);
        let new = corpus(vec![
            (
                "F",
                "T",
                TestShape::Single(record("F", "T", None, TestStatus::Pass)),
            ),
            (
                "F",
                "V",
                grouped(vec![
                    record("F", "V", Some(0), TestStatus::Pass),
                    record("F", "V", Some(1), TestStatus::Pass),
                ]),
            ),
            (
                "G",
                "W",
                TestShape::Single(record("G", "W", None, TestStatus::Pass)),
            ),
        ]);
        let outcome = compare_corpora(&reference, &new, &CompareOptions::default());

        assert_eq!(
            kinds(&outcome),
            vec!["TEST_MISSING_IN_REF", "FILE_MISSING_IN_REF"]
        );
        let added = &outcome.diffs[0];
        assert_eq!(added.test.as_deref(), Some("V"));
        assert_eq!(added.mismatch.iterations(), Some(&[0, 1][..]));
        assert!(!outcome.runs_identical);
    }

    #[test]
    fn test_mismatching_results() {
        let reference = corpus(vec![(
            "F",
            "T",
            TestShape::Single(record("F", "T", None, TestStatus::Pass)),
        )]);
        let new = corpus(vec![(
            "F",
            "T",
            TestShape::Single(record("F", "T", None, TestStatus::Fail)),
        )]);
        let outcome = compare_corpora(&reference, &new, &CompareOptions::default());
        assert_eq!(kinds(&outcome), vec!["MISMATCHING_RESULTS"]);
        assert!(!outcome.runs_identical);
    }

    #[test]
    fn test_time_regression_thresholds() {
        let mut ref_record = record("F", "T", None, TestStatus::Pass);
        ref_record.time_ms = 100;

        // 131 ms is at least 100 * 130 / 100 => reported.
        let mut slow = ref_record.clone();
        slow.time_ms = 131;
        let outcome = compare_corpora(
            &corpus(vec![("F", "T", TestShape::Single(ref_record.clone()))]),
            &corpus(vec![("F", "T", TestShape::Single(slow))]),
            &CompareOptions::default(),
        );
        assert_eq!(kinds(&outcome), vec!["NEW_TEST_TOOK_TOO_LONG"]);
        // Execution time alone never marks the runs as different.
        assert!(outcome.runs_identical);

        // 129 ms stays under the threshold.
        let mut fast_enough = ref_record.clone();
        fast_enough.time_ms = 129;
        let outcome = compare_corpora(
            &corpus(vec![("F", "T", TestShape::Single(ref_record))]),
            &corpus(vec![("F", "T", TestShape::Single(fast_enough))]),
            &CompareOptions::default(),
        );
        assert!(outcome.diffs.is_empty());
        assert!(outcome.runs_identical);
    }

    #[test]
    fn test_time_regression_needs_minimum_time() {
        let mut ref_record = record("F", "T", None, TestStatus::Pass);
        ref_record.time_ms = 10;
        let mut slow = ref_record.clone();
        slow.time_ms = 90; // 9x slower but both under the 100 ms minimum

        let outcome = compare_corpora(
            &corpus(vec![("F", "T", TestShape::Single(ref_record))]),
            &corpus(vec![("F", "T", TestShape::Single(slow))]),
            &CompareOptions::default(),
        );
        assert!(outcome.diffs.is_empty());
    }

    #[test]
    fn test_time_regression_globally_suppressed() {
        let mut ref_record = record("F", "T", None, TestStatus::Pass);
        ref_record.time_ms = 100;
        let mut slow = ref_record.clone();
        slow.time_ms = 500;

        let options = CompareOptions {
            check_too_long: false,
            ..Default::default()
        };
        let outcome = compare_corpora(
            &corpus(vec![("F", "T", TestShape::Single(ref_record))]),
            &corpus(vec![("F", "T", TestShape::Single(slow))]),
            &options,
        );
        assert!(outcome.diffs.is_empty());
    }

    #[test]
    fn test_same_failure_with_different_logs() {
        let mut ref_record = record("F", "T", None, TestStatus::Fail);
        ref_record.body = "expected 1 got 2 (10 ms)".to_string();
        let mut new_record = ref_record.clone();
        new_record.body = "expected 1 got 3 (99 ms)".to_string();

        let outcome = compare_corpora(
            &corpus(vec![("F", "T", TestShape::Single(ref_record.clone()))]),
            &corpus(vec![("F", "T", TestShape::Single(new_record.clone()))]),
            &CompareOptions::default(),
        );
        assert_eq!(kinds(&outcome), vec!["MISMATCHING_LOGS"]);
        assert!(!outcome.runs_identical);

        // Full-diff detail carries the changed lines and both raw bodies.
        let options = CompareOptions {
            full_diff: true,
            ..Default::default()
        };
        let outcome = compare_corpora(
            &corpus(vec![("F", "T", TestShape::Single(ref_record))]),
            &corpus(vec![("F", "T", TestShape::Single(new_record))]),
            &options,
        );
        match &outcome.diffs[0].mismatch {
            Mismatch::MismatchingLogs {
                detail: Some(detail),
                ..
            } => {
                assert!(detail.changed_lines.contains("- expected 1 got 2"));
                assert!(detail.changed_lines.contains("+ expected 1 got 3"));
                assert!(detail.ref_body.contains("(10 ms)"));
                assert!(detail.new_body.contains("(99 ms)"));
            }
            other => panic!("expected MismatchingLogs with detail, got {other:?}"),
        }
    }

    #[test]
    fn test_same_failure_equal_after_normalization() {
        let mut ref_record = record("F", "T", None, TestStatus::Fail);
        ref_record.body = "[  FAILED  ] T (10 ms)".to_string();
        let mut new_record = ref_record.clone();
        new_record.body = "[  FAILED  ] T (999 ms)".to_string();

        let outcome = compare_corpora(
            &corpus(vec![("F", "T", TestShape::Single(ref_record))]),
            &corpus(vec![("F", "T", TestShape::Single(new_record))]),
            &CompareOptions::default(),
        );
        assert!(outcome.diffs.is_empty());
    }

    #[test]
    fn test_shape_disagreement() {
        let single = TestShape::Single(record("F", "T", None, TestStatus::Pass));
        let with_iters = grouped(vec![
            record("F", "T", Some(0), TestStatus::Pass),
            record("F", "T", Some(1), TestStatus::Pass),
        ]);

        let outcome = compare_corpora(
            &corpus(vec![("F", "T", single.clone())]),
            &corpus(vec![("F", "T", with_iters.clone())]),
            &CompareOptions::default(),
        );
        assert_eq!(kinds(&outcome), vec!["TEST_NO_ITERS_IN_REF_WITH_ITERS_IN_NEW"]);

        let outcome = compare_corpora(
            &corpus(vec![("F", "T", with_iters)]),
            &corpus(vec![("F", "T", single)]),
            &CompareOptions::default(),
        );
        assert_eq!(kinds(&outcome), vec!["TEST_WITH_ITERS_IN_REF_NO_ITERS_IN_NEW"]);
    }

    #[test]
    fn test_mismatched_iteration_sets_stop_detail_checks() {
        let reference = corpus(vec![(
            "F",
            "T",
            grouped(vec![
                record("F", "T", Some(0), TestStatus::Pass),
                record("F", "T", Some(1), TestStatus::Pass),
                record("F", "T", Some(2), TestStatus::Fail),
            ]),
        )]);
        let new = corpus(vec![(
            "F",
            "T",
            grouped(vec![
                record("F", "T", Some(0), TestStatus::Fail),
                record("F", "T", Some(3), TestStatus::Pass),
            ]),
        )]);
        let outcome = compare_corpora(&reference, &new, &CompareOptions::default());

        // Both symmetric differences are reported and nothing else: the test
        // is not comparable at iteration granularity.
        assert_eq!(
            kinds(&outcome),
            vec!["ITERS_MISSING_IN_NEW", "ITERS_MISSING_IN_REF"]
        );
        assert_eq!(outcome.diffs[0].mismatch.iterations(), Some(&[1, 2][..]));
        assert_eq!(outcome.diffs[1].mismatch.iterations(), Some(&[3][..]));
        assert!(!outcome.runs_identical);
    }

    #[test]
    fn test_param_mismatch_does_not_stop_remaining_checks() {
        let with_params = |iter: u32, status: TestStatus, params: &str| {
            let mut r = record("F", "T", Some(iter), status);
            r.body = format!("[       OK ] T/{iter}, where GetParam() = {params} (5 ms)");
            r.params = Some(params.to_string());
            r
        };

        let reference = corpus(vec![(
            "F",
            "T",
            grouped(vec![
                with_params(0, TestStatus::Pass, "(1,2)"),
                with_params(1, TestStatus::Pass, "(9,9)"),
            ]),
        )]);
        let new = corpus(vec![(
            "F",
            "T",
            grouped(vec![
                with_params(0, TestStatus::Pass, "(1,3)"),
                with_params(1, TestStatus::Fail, "(9,9)"),
            ]),
        )]);
        let outcome = compare_corpora(&reference, &new, &CompareOptions::default());

        // Exactly one parameter mismatch for iteration 0, and iteration 1 is
        // still compared (its result changed).
        assert_eq!(
            kinds(&outcome),
            vec!["MISMATCHING_ITER_PARAMETERS", "MISMATCHING_RESULTS"]
        );
        assert_eq!(outcome.diffs[0].mismatch.iterations(), Some(&[0][..]));
        assert_eq!(outcome.diffs[1].mismatch.iterations(), Some(&[1][..]));
    }

    #[test]
    fn test_bucketed_groups_compared_once_per_bucket() {
        // Two iterations, one behavior per run: a single bucket covering
        // all iterations, compared through one representative.
        let failing = |iter: u32, text: &str| {
            let mut r = record("F", "T", Some(iter), TestStatus::Fail);
            r.body = text.to_string();
            r
        };

        let reference = corpus(vec![(
            "F",
            "T",
            grouped(vec![failing(0, "boom A"), failing(1, "boom A")]),
        )]);
        let new = corpus(vec![(
            "F",
            "T",
            grouped(vec![failing(0, "boom B"), failing(1, "boom B")]),
        )]);
        let outcome = compare_corpora(&reference, &new, &CompareOptions::default());

        assert_eq!(kinds(&outcome), vec!["MISMATCHING_LOGS"]);
        assert_eq!(outcome.diffs[0].mismatch.iterations(), Some(&[0, 1][..]));
    }

    #[test]
    fn test_diff_list_sorted_by_file_and_test() {
        let reference = corpus(vec![
            (
                "z_test",
                "A",
                TestShape::Single(record("z_test", "A", None, TestStatus::Pass)),
            ),
            (
                "a_test",
                "Z",
                TestShape::Single(record("a_test", "Z", None, TestStatus::Pass)),
            ),
        ]);
        let new = corpus(vec![]);
        let outcome = compare_corpora(&reference, &new, &CompareOptions::default());
        let files: Vec<&str> = outcome.diffs.iter().map(|d| d.file.as_str()).collect();
        assert_eq!(files, vec!["a_test", "z_test"]);
    }
}
