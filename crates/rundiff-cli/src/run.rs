// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Subcommand dispatch and the exit-status contract
//!
//! Exit codes: 0 when the runs are identical and both logs parsed cleanly,
//! 1 when the runs differ and/or structural errors were found, 2 when an
//! input file or folder is missing (nothing to compare).

use crate::collect;
use crate::config::{Command, Config, TimeThresholds};
use crate::report;
use rundiff_compare::{CompareOptions, compare_corpora};
use rundiff_log::{LogError, ParsedLog, parse_unified_log_file};
use std::path::Path;
use tracing::{error, info};

/// Exit code for identical runs / clean parse
pub const EXIT_OK: i32 = 0;
/// Exit code for differing runs or structural errors
pub const EXIT_DIFFERENT: i32 = 1;
/// Exit code for missing inputs
pub const EXIT_USAGE: i32 = 2;

/// Intermediate unified log written by `verify`
pub const VERIFY_INTERMEDIATE_LOG: &str = "make_check_new.log";

/// Run the selected subcommand and return the process exit code
#[must_use]
pub fn run(config: &Config) -> i32 {
    match &config.command {
        Command::Compare {
            ref_log,
            new_log,
            csv,
            thresholds,
            report_full_diff,
        } => compare_command(
            ref_log,
            new_log,
            csv,
            &thresholds.to_options(*report_full_diff),
        ),
        Command::Parse {
            log,
            csv,
            report_pass,
        } => parse_command(log, csv, *report_pass),
        Command::Collect {
            logs_folder,
            out,
            description,
        } => collect_command(logs_folder, out, description),
        Command::Verify {
            ref_log,
            logs_folder,
            csv,
            thresholds,
        } => verify_command(ref_log, logs_folder, csv, thresholds),
    }
}

fn compare_command(
    ref_log: &Path,
    new_log: &Path,
    csv: &Path,
    options: &CompareOptions,
) -> i32 {
    info!(
        reference = %ref_log.display(),
        new = %new_log.display(),
        "comparing runs"
    );

    let reference = match load_log(ref_log) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };
    let new = match load_log(new_log) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };

    let had_errors =
        dump_structural_errors(ref_log, &reference) | dump_structural_errors(new_log, &new);

    let outcome = compare_corpora(&reference.corpus, &new.corpus, options);

    if !outcome.diffs.is_empty() {
        if let Err(err) =
            report::write_diff_report(csv, &outcome.diffs, &reference.metadata, &new.metadata)
        {
            error!("{err:#}");
            return EXIT_DIFFERENT;
        }
    }

    if outcome.runs_identical && !had_errors {
        info!("runs are identical");
        EXIT_OK
    } else {
        info!("runs are different");
        EXIT_DIFFERENT
    }
}

fn parse_command(log: &Path, csv: &Path, report_pass: bool) -> i32 {
    let parsed = match load_log(log) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };
    let had_errors = dump_structural_errors(log, &parsed);

    if let Err(err) = report::write_parse_report(csv, &parsed, report_pass) {
        error!("{err:#}");
        return EXIT_DIFFERENT;
    }

    if had_errors { EXIT_DIFFERENT } else { EXIT_OK }
}

fn collect_command(logs_folder: &Path, out: &Path, description: &str) -> i32 {
    let collection = match collect::collect_into_unified(logs_folder, out, description) {
        Ok(collection) => collection,
        Err(err) => {
            error!("{err:#}");
            return EXIT_USAGE;
        }
    };

    info!(
        tests = collection.tests.len(),
        out = %out.display(),
        "logs collected"
    );
    if collection.errors.is_empty() {
        EXIT_OK
    } else {
        EXIT_DIFFERENT
    }
}

fn verify_command(
    ref_log: &Path,
    logs_folder: &Path,
    csv: &Path,
    thresholds: &TimeThresholds,
) -> i32 {
    let new_log = Path::new(VERIFY_INTERMEDIATE_LOG);
    info!(
        folder = %logs_folder.display(),
        out = %new_log.display(),
        "collecting logs for verification"
    );

    let collection = match collect::collect_into_unified(logs_folder, new_log, "") {
        Ok(collection) => collection,
        Err(err) => {
            error!("{err:#}");
            return EXIT_USAGE;
        }
    };

    let compare_code = compare_command(ref_log, new_log, csv, &thresholds.to_options(false));
    if collection.errors.is_empty() {
        compare_code
    } else {
        compare_code.max(EXIT_DIFFERENT)
    }
}

/// Load a unified log, mapping failures onto the exit contract
fn load_log(path: &Path) -> Result<ParsedLog, i32> {
    match parse_unified_log_file(path) {
        Ok(parsed) => Ok(parsed),
        Err(err @ LogError::Io { .. }) => {
            error!("{err}");
            Err(EXIT_USAGE)
        }
        Err(err) => {
            error!("{err}");
            Err(EXIT_DIFFERENT)
        }
    }
}

/// Surface a parsed log's structural errors; true when any exist
fn dump_structural_errors(path: &Path, parsed: &ParsedLog) -> bool {
    if parsed.errors.is_empty() {
        return false;
    }
    for structural in &parsed.errors {
        error!(log = %path.display(), "{structural}");
    }
    true
}
