//! Report writer trait and output errors

use crate::audit::PageReport;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for OutputError {
    fn from(e: serde_json::Error) -> Self {
        OutputError::Format(e.to_string())
    }
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Renders audit reports to a byte sink
///
/// Implementations only format; they never decide pass or fail.
pub trait ReportWriter {
    /// Writes every report, in order, to `out`
    ///
    /// # Arguments
    ///
    /// * `reports` - One report per audited URL
    /// * `out` - Destination (stdout, a file, or a buffer in tests)
    fn write_reports(&self, reports: &[PageReport], out: &mut dyn Write) -> OutputResult<()>;
}
