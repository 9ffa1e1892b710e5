use crate::audit::PageReport;
use crate::output::traits::{OutputResult, ReportWriter};
use serde_json::json;
use std::io::Write;

/// JSON lines report
///
/// Each finding is serialized on its own line. Check failures become
/// `{"url", "check", "error"}` objects and unreachable pages become
/// `{"url", "fetch_error"}` objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

impl ReportWriter for JsonReport {
    fn write_reports(&self, reports: &[PageReport], out: &mut dyn Write) -> OutputResult<()> {
        for report in reports {
            if let Some(error) = &report.fetch_error {
                let line = json!({ "url": report.url, "fetch_error": error });
                writeln!(out, "{}", line)?;
            }

            for finding in &report.findings {
                writeln!(out, "{}", serde_json::to_string(finding)?)?;
            }

            for failure in &report.failures {
                let line = json!({
                    "url": report.url,
                    "check": failure.check_name(),
                    "error": failure.to_string(),
                });
                writeln!(out, "{}", line)?;
            }
        }

        out.flush()?;
        Ok(())
    }
}
