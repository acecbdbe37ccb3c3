// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Collection of individual test log files into a unified log
//!
//! A test harness drops one `log-*` file per test binary run. This module
//! gathers them into the single unified file the parser consumes: a metadata
//! block followed by one delimited block per test. Files holding several
//! tests are split at the `[ RUN      ]` boundaries; files whose content
//! doesn't follow the usual formatting are kept whole under test name
//! `UNKNOWN` so nothing silently disappears from the run.

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use regex::Regex;
use rundiff_log::parser::{
    DATE_FIELD, DESCRIPTION_FIELD, DISABLED_TITLE, FILE_TITLE, FOLDER_FIELD, LOG_FILE_NAME_TITLE,
    MD_DELIM_LINE, TEST_DELIM_LINE, TEST_TITLE,
};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

static NUM_TESTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[==========\] Running ([0-9]+) tests? from ").expect("valid regex")
});

static FILTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Note: Google Test filter =(.*)").expect("valid regex"));

static RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[ RUN      \] (.*)").expect("valid regex"));

static TEST_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*(OK|FAILED).*\] ").expect("valid regex"));

/// One collected test: where it came from and its captured output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedTest {
    /// Name of the individual log file the output came from
    pub log_file: String,
    /// Test file (binary) name
    pub file: String,
    /// Test name, possibly still carrying a `DISABLED_` prefix
    pub test: String,
    /// Captured log output
    pub body: String,
}

/// Result of collecting a logs folder
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// All collected tests, sorted by (file, test)
    pub tests: Vec<CollectedTest>,
    /// Per-file collection failures; collection continues past them
    pub errors: Vec<String>,
}

/// Collect every `log-*` file in `folder`
///
/// # Errors
///
/// Returns an error only when the folder itself cannot be read; failures on
/// individual files land in [`Collection::errors`].
pub fn collect_logs(folder: &Path) -> Result<Collection> {
    let entries =
        fs::read_dir(folder).with_context(|| format!("reading logs folder {}", folder.display()))?;

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading logs folder {}", folder.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with("log-") && entry.path().is_file() {
            names.push(name);
        }
    }
    names.sort_unstable();

    let mut collection = Collection::default();
    for name in names {
        let path = folder.join(&name);
        if let Err(err) = collect_single_log_file(&path, &name, &mut collection.tests) {
            warn!(file = %path.display(), "collection failed: {err}");
            collection
                .errors
                .push(format!("{}: {err}", path.display()));
        }
    }

    collection
        .tests
        .sort_by(|a, b| (&a.file, &a.test).cmp(&(&b.file, &b.test)));
    debug!(
        tests = collection.tests.len(),
        errors = collection.errors.len(),
        "collection finished"
    );
    Ok(collection)
}

fn collect_single_log_file(path: &Path, name: &str, tests: &mut Vec<CollectedTest>) -> Result<()> {
    // Harness logs may carry non-UTF-8 bytes; keep what's readable.
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let contents = String::from_utf8_lossy(&raw).into_owned();

    match test_count(&contents) {
        1 => match single_test_entry(name, &contents)? {
            Some(entry) => tests.push(entry),
            None => tests.push(fallback_entry(name, &contents)),
        },
        count if count > 1 => split_multi_test_log(name, &contents, tests),
        _ => {
            // Zero tests: either an empty run of a known test or a file with
            // non-standard contents.
            match single_test_entry(name, &contents)? {
                Some(entry) => tests.push(entry),
                None => tests.push(fallback_entry(name, &contents)),
            }
        }
    }
    Ok(())
}

fn test_count(contents: &str) -> u32 {
    NUM_TESTS_RE
        .captures(contents)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Build the entry for a log file holding a single test
///
/// The test name comes from the `Google Test filter` line; the test file
/// name is what's left of the log file name once the `log-run-` prefix and
/// the test-name suffix are removed.
fn single_test_entry(log_file: &str, contents: &str) -> Result<Option<CollectedTest>> {
    let Some(caps) = FILTER_RE.captures(contents) else {
        return Ok(None);
    };
    let test = caps[1].trim().to_string();
    if test.is_empty() {
        return Err(anyhow!("empty test name in Google Test filter line"));
    }

    let file = file_for_single_test(log_file, &test)
        .ok_or_else(|| anyhow!("log file name does not match log-run-<file>-<test>: {log_file}"))?;

    Ok(Some(CollectedTest {
        log_file: log_file.to_string(),
        file,
        test,
        body: contents.to_string(),
    }))
}

fn file_for_single_test(log_file: &str, test: &str) -> Option<String> {
    let stem = log_file.strip_prefix("log-run-")?;
    let suffix = format!("-{}", test.replace('/', "-"));
    stem.strip_suffix(suffix.as_str()).map(str::to_string)
}

/// Entry for a file whose contents don't follow the usual formatting
fn fallback_entry(log_file: &str, contents: &str) -> CollectedTest {
    CollectedTest {
        log_file: log_file.to_string(),
        file: file_from_log_name(log_file),
        test: "UNKNOWN".to_string(),
        body: contents.to_string(),
    }
}

fn file_from_log_name(log_file: &str) -> String {
    log_file
        .strip_prefix("log-")
        .unwrap_or(log_file)
        .to_string()
}

/// Split a multi-test log at the `[ RUN      ]` / `[...OK...]`/`[...FAILED...]`
/// boundaries, one entry per test
fn split_multi_test_log(log_file: &str, contents: &str, tests: &mut Vec<CollectedTest>) {
    let file = file_from_log_name(log_file);
    let mut test = String::new();
    let mut body = String::new();

    for line in contents.lines() {
        if let Some(caps) = RUN_RE.captures(line) {
            test = caps[1].trim().to_string();
            body.push_str(line);
            body.push('\n');
        } else if !test.is_empty() && TEST_END_RE.is_match(line) {
            body.push_str(line);
            body.push('\n');
            tests.push(CollectedTest {
                log_file: log_file.to_string(),
                file: file.clone(),
                test: std::mem::take(&mut test),
                body: std::mem::take(&mut body),
            });
        } else if !test.is_empty() {
            body.push_str(line);
            body.push('\n');
        }
    }

    // A test that started but never printed its end line (crashed mid-run)
    if !test.is_empty() {
        tests.push(CollectedTest {
            log_file: log_file.to_string(),
            file,
            test,
            body,
        });
    }
}

/// Write a collection as a unified log file
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub fn write_unified_log(
    out: &Path,
    folder_display: &str,
    description: &str,
    collection: &Collection,
) -> Result<()> {
    let mut text = String::new();
    text.push_str(&format!("{}\n", *MD_DELIM_LINE));
    text.push_str(&format!(
        "{DATE_FIELD} {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S%.6f")
    ));
    text.push_str(&format!("{FOLDER_FIELD} {folder_display}\n"));
    text.push_str(&format!("{DESCRIPTION_FIELD} {description}\n"));
    text.push_str(&format!("{}\n", *MD_DELIM_LINE));

    for entry in &collection.tests {
        text.push_str(&format!("\n{}\n", *TEST_DELIM_LINE));
        text.push_str(&format!("{LOG_FILE_NAME_TITLE} {}\n", entry.log_file));
        text.push_str(&format!("{FILE_TITLE} {}\n", entry.file));

        let disabled = entry.test.contains("DISABLED_");
        let test = entry.test.replace("DISABLED_", "");
        text.push_str(&format!("{TEST_TITLE} {test}\n"));
        text.push_str(&format!(
            "{DISABLED_TITLE} {}\n",
            if disabled { "YES" } else { "NO" }
        ));
        text.push('\n');
        text.push_str(&entry.body);
    }
    text.push_str(&format!("\n{}\n", *TEST_DELIM_LINE));

    fs::write(out, text).with_context(|| format!("writing unified log {}", out.display()))?;
    Ok(())
}

/// Collect a logs folder and write the unified log in one step
///
/// # Errors
///
/// Returns an error if the folder cannot be read or the output cannot be
/// written; per-file failures are carried in the returned collection.
pub fn collect_into_unified(folder: &Path, out: &Path, description: &str) -> Result<Collection> {
    let collection = collect_logs(folder)?;
    write_unified_log(out, &folder.display().to_string(), description, &collection)?;
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rundiff_log::{TestStatus, parse_unified_log};
    use similar_asserts::assert_eq;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

    /// Unique temp directory, removed on drop
    struct TempLogsDir {
        path: PathBuf,
    }

    impl TempLogsDir {
        fn new(name: &str) -> Self {
            let counter = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
            let path = std::env::temp_dir().join(format!(
                "rundiff-collect-{}-{}-{}",
                name,
                std::process::id(),
                counter
            ));
            fs::create_dir_all(&path).expect("create temp logs dir");
            Self { path }
        }

        fn create_file(&self, name: &str, content: &str) {
            fs::write(self.path.join(name), content).expect("write log file");
        }
    }

    impl Drop for TempLogsDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    const SINGLE_TEST_LOG: &str = "\
Note: Google Test filter = Open
[==========] Running 1 test from 1 test case.
[ RUN      ] Open
[       OK ] Open (5 ms)
[  PASSED  ] 1 test.
";

    const MULTI_TEST_LOG: &str = "\
[==========] Running 2 tests from 1 test case.
[ RUN      ] Basic.One
some output
[       OK ] Basic.One (3 ms)
[ RUN      ] Basic.DISABLED_Two
[  FAILED  ] Basic.DISABLED_Two (4 ms)
";

    #[test]
    fn test_collects_single_and_multi_test_files() {
        let dir = TempLogsDir::new("single-multi");
        dir.create_file("log-run-db_test-Open", SINGLE_TEST_LOG);
        dir.create_file("log-basic_test", MULTI_TEST_LOG);
        dir.create_file("notes.txt", "not a log file");

        let collection = collect_logs(&dir.path).unwrap();
        assert!(collection.errors.is_empty());

        let names: Vec<(&str, &str)> = collection
            .tests
            .iter()
            .map(|t| (t.file.as_str(), t.test.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("basic_test", "Basic.DISABLED_Two"),
                ("basic_test", "Basic.One"),
                ("db_test", "Open"),
            ]
        );
    }

    #[test]
    fn test_parameterized_single_test_file_name() {
        // The filter line carries the iterated name; slashes become dashes
        // in the log file name.
        let log = "\
Note: Google Test filter = Suite/Case.Test/3
[==========] Running 1 test from 1 test case.
[ RUN      ] Suite/Case.Test/3
[       OK ] Suite/Case.Test/3 (2 ms)
";
        let dir = TempLogsDir::new("params");
        dir.create_file("log-run-param_test-Suite-Case.Test-3", log);

        let collection = collect_logs(&dir.path).unwrap();
        assert!(collection.errors.is_empty());
        assert_eq!(collection.tests.len(), 1);
        assert_eq!(collection.tests[0].file, "param_test");
        assert_eq!(collection.tests[0].test, "Suite/Case.Test/3");
    }

    #[test]
    fn test_non_standard_file_kept_as_unknown() {
        let dir = TempLogsDir::new("unknown");
        dir.create_file("log-strange", "free-form text, no test markers\n");

        let collection = collect_logs(&dir.path).unwrap();
        assert!(collection.errors.is_empty());
        assert_eq!(collection.tests.len(), 1);
        assert_eq!(collection.tests[0].file, "strange");
        assert_eq!(collection.tests[0].test, "UNKNOWN");
    }

    #[test]
    fn test_mismatched_file_name_is_reported_and_skipped() {
        let dir = TempLogsDir::new("bad-name");
        dir.create_file("log-oddly-named", SINGLE_TEST_LOG);
        dir.create_file("log-run-db_test-Open", SINGLE_TEST_LOG);

        let collection = collect_logs(&dir.path).unwrap();
        assert_eq!(collection.errors.len(), 1);
        assert!(collection.errors[0].contains("log-oddly-named"));
        assert_eq!(collection.tests.len(), 1);
    }

    #[test]
    fn test_collect_write_parse_round_trip() {
        let dir = TempLogsDir::new("round-trip");
        dir.create_file("log-run-db_test-Open", SINGLE_TEST_LOG);
        dir.create_file("log-basic_test", MULTI_TEST_LOG);

        let out = dir.path.join("unified.log");
        let collection =
            collect_into_unified(&dir.path, &out, "round trip run").unwrap();
        assert!(collection.errors.is_empty());

        let text = fs::read_to_string(&out).unwrap();
        let parsed = parse_unified_log(&text).unwrap();
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.metadata.description, "round trip run");

        let db_test = &parsed.corpus["db_test"];
        assert_eq!(db_test["Open"].first_record().status, TestStatus::Pass);

        let basic = &parsed.corpus["basic_test"];
        assert_eq!(basic["Basic.One"].first_record().status, TestStatus::Pass);
        // The DISABLED_ prefix moved into the header's DISABLED flag.
        let two = basic["Basic.Two"].first_record();
        assert!(two.disabled);
        assert_eq!(two.status, TestStatus::Disabled);
    }
}
