use crate::audit::PageReport;
use crate::output::traits::{OutputResult, ReportWriter};
use std::io::Write;

/// Plain text report: one line per finding, grouped by URL
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

impl ReportWriter for TextReport {
    fn write_reports(&self, reports: &[PageReport], out: &mut dyn Write) -> OutputResult<()> {
        for report in reports {
            writeln!(out, "{}", report.url)?;

            if let Some(error) = &report.fetch_error {
                writeln!(out, "  [FETCH FAILED] {}", error)?;
            }

            for finding in &report.findings {
                writeln!(
                    out,
                    "  [{}] {}: {}",
                    finding.level().as_str().to_uppercase(),
                    finding.check_name(),
                    finding.message()
                )?;
            }

            for failure in &report.failures {
                writeln!(out, "  [CHECK FAILED] {}", failure)?;
            }
        }

        out.flush()?;
        Ok(())
    }
}
