//! Output module for rendering audit results
//!
//! This module handles:
//! - Writing reports as plain text, JSON lines or markdown
//! - Summarizing findings across a batch of pages

mod json;
mod markdown;
pub mod stats;
mod text;
mod traits;

pub use json::JsonReport;
pub use markdown::{format_markdown_report, MarkdownReport};
pub use stats::{print_summary, AuditSummary};
pub use text::TextReport;
pub use traits::{OutputError, OutputResult, ReportWriter};

use crate::audit::PageReport;
use crate::config::OutputFormat;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Picks the writer for a format
///
/// # Arguments
///
/// * `format` - Requested report format
/// * `config_hash` - Configuration hash, shown by formats that record run information
pub fn writer_for(format: OutputFormat, config_hash: Option<&str>) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Text => Box::new(TextReport),
        OutputFormat::Json => Box::new(JsonReport),
        OutputFormat::Markdown => {
            let writer = MarkdownReport::new();
            Box::new(match config_hash {
                Some(hash) => writer.with_config_hash(hash),
                None => writer,
            })
        }
    }
}

/// Writes reports to a file, replacing any existing content
pub fn write_report_file(
    writer: &dyn ReportWriter,
    reports: &[PageReport],
    path: &Path,
) -> OutputResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writer.write_reports(reports, &mut file)?;
    tracing::info!("Report written to {}", path.display());
    Ok(())
}
