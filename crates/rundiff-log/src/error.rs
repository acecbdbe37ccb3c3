// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for rundiff-log

use thiserror::Error;

/// Errors that make a whole unified log unusable
///
/// Per-block problems are not represented here; those are recorded as
/// [`crate::StructuralError`] values and parsing continues at the next block.
#[derive(Debug, Error)]
pub enum LogError {
    /// Error reading the unified log file
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that could not be read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No metadata block found at the top of the log
    #[error("No metadata section found in the unified log")]
    MetadataMissing,

    /// Metadata block is present but a mandatory field is absent
    #[error("Metadata field missing at line {line}: expected {field}")]
    MetadataField {
        /// Name of the missing field
        field: &'static str,
        /// 1-based line where the field was expected
        line: usize,
    },

    /// Metadata block is not closed by a delimiter line
    #[error("Metadata section at line {line} is not terminated by a delimiter")]
    MetadataUnterminated {
        /// 1-based line where the closing delimiter was expected
        line: usize,
    },
}
