//! CLI error types.

use icsconv_core::ExportError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
///
/// Per-file read and parse failures are not errors here; they are recorded
/// on the conversion result and reported in the run summary. Only total
/// inability to produce a requested output reaches this type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing an output file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding an export failed.
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}
