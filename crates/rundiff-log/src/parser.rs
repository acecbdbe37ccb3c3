// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Structural parser for the unified log format
//!
//! The unified log is line-oriented: a metadata block between two
//! 100-character `=` delimiter lines, followed by test blocks separated by
//! `<----...---->` delimiter lines. Each test block starts with a fixed
//! 4-line header; everything up to the next delimiter is the test's raw
//! captured output.
//!
//! A malformed header aborts only its own block. The error is recorded on
//! the returned [`ParsedLog`] and parsing resumes at the next delimiter, so
//! one bad block never loses the rest of the file.

use crate::classify::{classify, extract_params, extract_time_ms};
use crate::group::group_equivalent_iters;
use crate::model::{
    Corpus, ParsedLog, RunMetadata, StructuralError, TestRecord, TestShape, TestStatus,
};
use crate::LogError;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Title of the log-file-name header line
pub const LOG_FILE_NAME_TITLE: &str = "LOG FILE NAME:";
/// Title of the test-file header line
pub const FILE_TITLE: &str = "FILE:";
/// Title of the test-name header line
pub const TEST_TITLE: &str = "TEST:";
/// Title of the disabled-flag header line
pub const DISABLED_TITLE: &str = "DISABLED:";

/// Metadata date field prefix
pub const DATE_FIELD: &str = "Date:";
/// Metadata folder field prefix
pub const FOLDER_FIELD: &str = "Folder:";
/// Metadata description field prefix
pub const DESCRIPTION_FIELD: &str = "Description:";

/// Delimiter line enclosing the metadata block
pub static MD_DELIM_LINE: LazyLock<String> = LazyLock::new(|| "=".repeat(100));

/// Delimiter line between test blocks
pub static TEST_DELIM_LINE: LazyLock<String> = LazyLock::new(|| format!("<{}>", "-".repeat(100)));

// Manual annotations allowed in collected logs for debugging; they must not
// affect comparison.
static COMMENT_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"############.*############").expect("valid regex"));

/// Fields of one test block header
#[derive(Debug, Clone, PartialEq, Eq)]
struct TestHeader {
    log_file: String,
    file: String,
    name: String,
    iter: Option<u32>,
    disabled: bool,
}

/// Line cursor over the unified log
struct Cursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// 1-based number of the line `peek` would return
    fn line_number(&self) -> usize {
        self.pos + 1
    }

    /// Advance to the next test delimiter line, leaving the cursor on it.
    /// Returns false if the end of the log was reached instead.
    fn seek_test_delim(&mut self) -> bool {
        while let Some(line) = self.peek() {
            if line.contains(TEST_DELIM_LINE.as_str()) {
                return true;
            }
            self.pos += 1;
        }
        false
    }
}

fn is_md_delim(line: &str) -> bool {
    line.trim_end().ends_with(MD_DELIM_LINE.as_str())
}

/// One named extraction step: consume a line and return the value after
/// the expected title.
fn take_field(cursor: &mut Cursor<'_>, title: &str) -> Result<String, String> {
    let line_number = cursor.line_number();
    let line = cursor
        .bump()
        .ok_or_else(|| format!("unexpected end of log, expected `{title}`"))?;
    line.strip_prefix(title)
        .map(|value| value.trim().to_string())
        .ok_or_else(|| format!("expected `{title}` at line {line_number}, found |{line}|"))
}

/// Split an optional `/<integer>` iteration suffix off a test name
fn split_iter_suffix(name_and_iter: &str) -> (String, Option<u32>) {
    if let Some((base, suffix)) = name_and_iter.rsplit_once('/') {
        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = suffix.parse::<u32>() {
                return (base.trim().to_string(), Some(index));
            }
        }
    }
    (name_and_iter.to_string(), None)
}

fn parse_test_header(cursor: &mut Cursor<'_>) -> Result<TestHeader, String> {
    let log_file = take_field(cursor, LOG_FILE_NAME_TITLE)?;
    let file = take_field(cursor, FILE_TITLE)?;
    let name_and_iter = take_field(cursor, TEST_TITLE)?;
    let (name, iter) = split_iter_suffix(&name_and_iter);
    let disabled = take_field(cursor, DISABLED_TITLE)? == "YES";

    Ok(TestHeader {
        log_file,
        file,
        name,
        iter,
        disabled,
    })
}

fn parse_metadata(cursor: &mut Cursor<'_>) -> Result<RunMetadata, LogError> {
    // Scan forward for the opening delimiter; anything before it is noise.
    loop {
        let line = cursor.bump().ok_or(LogError::MetadataMissing)?;
        if is_md_delim(line) {
            break;
        }
    }

    let date = take_mandatory_md_field(cursor, DATE_FIELD)?;
    let folder = take_mandatory_md_field(cursor, FOLDER_FIELD)?;

    let description = match cursor.peek() {
        Some(line) if line.starts_with(DESCRIPTION_FIELD) => {
            let value = line[DESCRIPTION_FIELD.len()..].trim().to_string();
            cursor.pos += 1;
            value
        }
        _ => String::new(),
    };

    let line_number = cursor.line_number();
    match cursor.bump() {
        Some(line) if is_md_delim(line) => Ok(RunMetadata {
            date,
            folder,
            description,
        }),
        _ => Err(LogError::MetadataUnterminated { line: line_number }),
    }
}

fn take_mandatory_md_field(
    cursor: &mut Cursor<'_>,
    field: &'static str,
) -> Result<String, LogError> {
    let line_number = cursor.line_number();
    let value = cursor
        .bump()
        .and_then(|line| line.strip_prefix(field))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(LogError::MetadataField {
            field,
            line: line_number,
        })?;
    Ok(value.to_string())
}

// Raw per-test map before iteration grouping: iteration index (None for
// plain tests) -> record.
type RawTests = BTreeMap<String, BTreeMap<String, BTreeMap<Option<u32>, TestRecord>>>;

/// Parse a unified log from text
///
/// # Errors
///
/// Fails only when the log as a whole is unusable (no or incomplete metadata
/// block). Per-block problems are recorded on the returned [`ParsedLog`].
pub fn parse_unified_log(text: &str) -> Result<ParsedLog, LogError> {
    let mut cursor = Cursor::new(text);
    let metadata = parse_metadata(&mut cursor)?;
    debug!(description = %metadata.description, "parsed unified log metadata");

    let mut raw: RawTests = BTreeMap::new();
    let mut errors: Vec<StructuralError> = Vec::new();

    if cursor.seek_test_delim() {
        loop {
            cursor.bump();
            if cursor.peek().is_none() {
                break;
            }

            let header_line = cursor.line_number();
            match parse_test_header(&mut cursor) {
                Ok(header) => {
                    let body_start = cursor.pos;
                    let found_delim = cursor.seek_test_delim();
                    let body = collect_body(&cursor.lines[body_start..cursor.pos]);
                    let last_line = cursor.pos;

                    let record = build_record(header, header_line, body);
                    insert_record(&mut raw, record, header_line, last_line, &mut errors);

                    if !found_delim {
                        break;
                    }
                }
                Err(message) => {
                    let found_delim = cursor.seek_test_delim();
                    push_error(
                        &mut errors,
                        StructuralError {
                            message,
                            lines: Some((header_line, cursor.pos)),
                        },
                    );
                    if !found_delim {
                        break;
                    }
                }
            }
        }
    }

    let corpus = unify_shapes(raw, &mut errors);

    Ok(ParsedLog {
        metadata,
        corpus,
        errors,
    })
}

/// Parse a unified log file from disk
///
/// # Errors
///
/// Returns `LogError::Io` if the file cannot be read; otherwise the same
/// errors as [`parse_unified_log`].
pub fn parse_unified_log_file(path: impl AsRef<Path>) -> Result<ParsedLog, LogError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_unified_log(&text)
}

fn collect_body(lines: &[&str]) -> String {
    let kept: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| !COMMENT_LINE_RE.is_match(line))
        .collect();
    kept.join("\n")
}

fn build_record(header: TestHeader, header_line: usize, body: String) -> TestRecord {
    let (status, time_ms, params) = if header.disabled {
        (TestStatus::Disabled, 0, None)
    } else {
        (
            classify(&header.name, &body),
            extract_time_ms(&body),
            extract_params(&body),
        )
    };

    TestRecord {
        log_file: header.log_file,
        file: header.file,
        name: header.name,
        iter: header.iter,
        disabled: header.disabled,
        status,
        time_ms,
        line: header_line,
        body,
        params,
    }
}

fn insert_record(
    raw: &mut RawTests,
    record: TestRecord,
    header_line: usize,
    last_line: usize,
    errors: &mut Vec<StructuralError>,
) {
    let per_test = raw
        .entry(record.file.clone())
        .or_default()
        .entry(record.name.clone())
        .or_default();

    if per_test.contains_key(&record.iter) {
        push_error(
            errors,
            StructuralError {
                message: format!(
                    "duplicate test block for {} / {} (iteration {:?})",
                    record.file, record.name, record.iter
                ),
                lines: Some((header_line, last_line)),
            },
        );
        return;
    }
    per_test.insert(record.iter, record);
}

fn push_error(errors: &mut Vec<StructuralError>, error: StructuralError) {
    warn!(%error, "structural error in unified log");
    errors.push(error);
}

/// Second pass: collapse the raw iteration maps into [`TestShape`]s
fn unify_shapes(raw: RawTests, errors: &mut Vec<StructuralError>) -> Corpus {
    let mut corpus: Corpus = BTreeMap::new();

    for (file, tests) in raw {
        let shaped = corpus.entry(file.clone()).or_default();

        for (name, mut iters) in tests {
            let plain = iters.remove(&None);

            let shape = match (plain, iters.is_empty()) {
                (Some(record), true) => TestShape::Single(record),
                (plain, false) => {
                    if plain.is_some() {
                        push_error(
                            errors,
                            StructuralError {
                                message: format!(
                                    "test {file} / {name} has both iterated and non-iterated \
                                     blocks; ignoring the non-iterated one"
                                ),
                                lines: None,
                            },
                        );
                    }
                    let iterated: BTreeMap<u32, TestRecord> = iters
                        .into_iter()
                        .map(|(key, record)| (key.expect("None removed above"), record))
                        .collect();
                    TestShape::Grouped(group_equivalent_iters(iterated))
                }
                (None, true) => continue,
            };

            shaped.insert(name, shape);
        }
    }

    corpus
}
