//! Error types for snapshot operations.
//!
//! This module defines [`SnapshotError`] which covers all error cases that can
//! occur when fetching, filtering, or persisting ticker data.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during snapshot operations.
///
/// Fetch-stage errors (`Network`, `SymbolNotFound`, `Parse`) are recovered per
/// category: the fetch loop logs them and omits the category. The file-stage
/// errors (`ReadInput`, `WriteOutput`) are fatal for a run.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// The requested symbol was not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Error parsing data from a provider.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The requested operation is not supported by a provider.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// A raw snapshot file could not be read or parsed.
    #[error("Failed to read input {}: {}", path.display(), reason)]
    ReadInput {
        /// Path of the input file.
        path: PathBuf,
        /// Why it could not be read.
        reason: String,
    },

    /// A snapshot file could not be written.
    #[error("Failed to write output {}: {}", path.display(), reason)]
    WriteOutput {
        /// Path of the output file.
        path: PathBuf,
        /// Why it could not be written.
        reason: String,
    },

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`SnapshotError`].
pub type Result<T> = std::result::Result<T, SnapshotError>;
