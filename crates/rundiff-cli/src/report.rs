// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CSV report writers
//!
//! Two reports exist: the diff report written by `compare`/`verify`, one row
//! per mismatch, and the parse report written by `parse`, one row per test
//! (or per group of equivalent iterations). Both end with a blank separator
//! line and a provenance footer naming the run description(s).

use anyhow::{Context, Result};
use rundiff_compare::DiffRecord;
use rundiff_log::{ParsedLog, RunMetadata, TestShape, TestStatus};
use std::fs;
use std::path::Path;
use tracing::info;

/// Column headers of the diff report
pub const DIFF_REPORT_HEADER: [&str; 11] = [
    "test file name",
    "test name",
    "Mismatch Type",
    "Ref Result",
    "New Result",
    "Iteration(s)",
    "Ref Line-Num",
    "New Line-Num",
    "Misc1",
    "Misc2",
    "Misc3",
];

/// Column headers of the parse report
pub const PARSE_REPORT_HEADER: [&str; 9] = [
    "TEST FILE NAME",
    "TEST NAME",
    "Iters",
    "Params",
    "RESULT",
    "Min Time (ms)",
    "Max Time (ms)",
    "Line",
    "FILE",
];

/// Write the comparison diff report
///
/// # Errors
///
/// Returns an error if the CSV cannot be serialized or written.
pub fn write_diff_report(
    path: &Path,
    diffs: &[DiffRecord],
    ref_metadata: &RunMetadata,
    new_metadata: &RunMetadata,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(DIFF_REPORT_HEADER)?;

    for diff in diffs {
        let mismatch = &diff.mismatch;
        let notes = mismatch.notes();
        let ref_result = side_result(mismatch.ref_side());
        let new_result = side_result(mismatch.new_side());
        let iterations = diff.iterations_display();
        let ref_line = side_line(mismatch.ref_side());
        let new_line = side_line(mismatch.new_side());
        writer.write_record([
            diff.file.as_str(),
            diff.test.as_deref().unwrap_or(""),
            mismatch.kind(),
            ref_result.as_str(),
            new_result.as_str(),
            iterations.as_str(),
            ref_line.as_str(),
            new_line.as_str(),
            notes[0].as_str(),
            notes[1].as_str(),
            notes[2].as_str(),
        ])?;
    }

    let footer = [
        format!("REF: {}", ref_metadata.description),
        format!("NEW: {}", new_metadata.description),
    ];
    finish_report(path, writer, &footer)?;

    info!(path = %path.display(), rows = diffs.len(), "diff report written");
    Ok(())
}

/// Write the per-run parse report
///
/// Passing tests are skipped unless `report_pass` is set.
///
/// # Errors
///
/// Returns an error if the CSV cannot be serialized or written.
pub fn write_parse_report(path: &Path, parsed: &ParsedLog, report_pass: bool) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PARSE_REPORT_HEADER)?;

    let mut rows = 0usize;
    for (file, tests) in &parsed.corpus {
        for (test, shape) in tests {
            match shape {
                TestShape::Single(record) => {
                    if record.status == TestStatus::Pass && !report_pass {
                        continue;
                    }
                    let time = record.time_ms.to_string();
                    let line = record.line.to_string();
                    writer.write_record([
                        file.as_str(),
                        test.as_str(),
                        "",
                        "",
                        record.status.name(),
                        time.as_str(),
                        time.as_str(),
                        line.as_str(),
                        record.log_file.as_str(),
                    ])?;
                    rows += 1;
                }
                TestShape::Grouped(groups) => {
                    for group in groups {
                        // All iterations in a group share one result; the
                        // first member stands in for the rest.
                        let representative = group.first();
                        if representative.status == TestStatus::Pass && !report_pass {
                            continue;
                        }
                        let iters: Vec<String> =
                            group.iter_indexes().iter().map(u32::to_string).collect();
                        let iters = iters.join(",");
                        let min_time = group.min_time_ms().to_string();
                        let max_time = group.max_time_ms().to_string();
                        let line = representative.line.to_string();
                        writer.write_record([
                            file.as_str(),
                            test.as_str(),
                            iters.as_str(),
                            representative.params.as_deref().unwrap_or(""),
                            representative.status.name(),
                            min_time.as_str(),
                            max_time.as_str(),
                            line.as_str(),
                            representative.log_file.as_str(),
                        ])?;
                        rows += 1;
                    }
                }
            }
        }
    }

    let footer = [format!("DESCRIPTION:{}", parsed.metadata.description)];
    finish_report(path, writer, &footer)?;

    info!(path = %path.display(), rows, "parse report written");
    Ok(())
}

fn side_result(side: Option<&rundiff_compare::SideInfo>) -> String {
    side.map(|s| s.result.name().to_string()).unwrap_or_default()
}

fn side_line(side: Option<&rundiff_compare::SideInfo>) -> String {
    side.map(|s| s.line.to_string()).unwrap_or_default()
}

/// Append the blank separator and footer rows, then write the file
///
/// The separator is a genuinely empty line, which the csv writer cannot
/// produce as a record, so the buffer is assembled in two stages.
fn finish_report(path: &Path, writer: csv::Writer<Vec<u8>>, footer: &[String]) -> Result<()> {
    let mut buffer = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("flushing CSV report buffer: {err}"))?;
    buffer.extend_from_slice(b"\n");

    let mut writer = csv::Writer::from_writer(buffer);
    for line in footer {
        writer.write_record([line.as_str()])?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("flushing CSV report footer: {err}"))?;

    fs::write(path, buffer).with_context(|| format!("writing report to {}", path.display()))?;
    Ok(())
}
