// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! rundiff-cli: Command-line interface for parsing and comparing test-run logs
//!
//! The `rundiff` binary collects individual test log files into a unified
//! log, parses such logs into per-test records, and compares a reference run
//! against a new one, writing CSV reports and following a fixed exit-status
//! contract (0 identical, 1 different or structural errors, 2 missing input).

#![warn(missing_docs)]

pub mod collect;
pub mod config;
pub mod report;
pub mod run;

pub use config::{Command, Config};
pub use run::{EXIT_DIFFERENT, EXIT_OK, EXIT_USAGE, run};
