// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for the rundiff binary
//!
//! This module provides the clap-derived configuration types for all
//! subcommands, plus the mapping from verbosity flags to tracing levels.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rundiff_compare::CompareOptions;

/// rundiff - parse and compare unified test-run logs
#[derive(Parser, Debug, Clone)]
#[command(name = "rundiff")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout stays clean for scripting.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

/// Time-regression threshold flags shared by compare-style subcommands
#[derive(clap::Args, Debug, Clone)]
pub struct TimeThresholds {
    /// Don't report passing tests whose run time increased
    #[arg(long, conflicts_with_all = ["min_ref_time", "ref_time_increase"])]
    pub ignore_too_long: bool,

    /// Minimum run time (ms) on either side before the increase check applies
    #[arg(long, default_value_t = 100)]
    pub min_ref_time: i64,

    /// Run-time increase (percent) over the reference that counts as too long
    #[arg(long, default_value_t = 30)]
    pub ref_time_increase: i64,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compare a reference unified log with a new one
    ///
    /// Writes a CSV diff report when the runs differ. Exit status is 0 when
    /// the runs are identical, 1 when they differ or either log had
    /// structural errors, 2 when an input file is missing.
    Compare {
        /// Reference run's unified log file
        ref_log: PathBuf,

        /// New run's unified log file
        new_log: PathBuf,

        /// Output CSV file for the diff report
        csv: PathBuf,

        #[command(flatten)]
        thresholds: TimeThresholds,

        /// Include line-level log diffs and both raw logs in the report
        #[arg(long)]
        report_full_diff: bool,
    },

    /// Parse a single unified log and write a per-test CSV summary
    Parse {
        /// Unified log file to parse
        log: PathBuf,

        /// Output CSV file
        csv: PathBuf,

        /// Also report passing tests (by default only non-passing ones)
        #[arg(long)]
        report_pass: bool,
    },

    /// Collect individual test log files into a unified log
    ///
    /// Picks up every `log-*` file in the folder.
    Collect {
        /// Folder containing the individual `log-*` files
        logs_folder: PathBuf,

        /// Output unified log file
        out: PathBuf,

        /// Free-form run description recorded in the metadata block
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Collect a logs folder and compare it against a reference log
    ///
    /// Equivalent to `collect` into an intermediate unified log followed by
    /// `compare` against the reference.
    Verify {
        /// Reference run's unified log file
        ref_log: PathBuf,

        /// Folder containing the new run's individual `log-*` files
        logs_folder: PathBuf,

        /// Output CSV file for the diff report
        csv: PathBuf,

        #[command(flatten)]
        thresholds: TimeThresholds,
    },
}

impl Config {
    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

impl TimeThresholds {
    /// Build comparison options from the threshold flags
    #[must_use]
    pub fn to_options(&self, full_diff: bool) -> CompareOptions {
        CompareOptions {
            check_too_long: !self.ignore_too_long,
            min_ref_time_ms: self.min_ref_time,
            max_time_increase_percent: self.ref_time_increase,
            full_diff,
        }
    }
}
