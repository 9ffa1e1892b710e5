//! Markdown report generation
//!
//! Produces a human-readable report with run information, a summary of
//! findings by level, and one findings table per audited URL.

use crate::audit::PageReport;
use crate::finding::FindingLevel;
use crate::output::stats::AuditSummary;
use crate::output::traits::{OutputResult, ReportWriter};
use chrono::{DateTime, Utc};
use std::io::Write;

/// Markdown report writer
#[derive(Debug, Clone, Default)]
pub struct MarkdownReport {
    config_hash: Option<String>,
    generated_at: Option<DateTime<Utc>>,
}

impl MarkdownReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the hash of the configuration the audit ran with
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Pins the generation timestamp instead of using the current time
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

impl ReportWriter for MarkdownReport {
    fn write_reports(&self, reports: &[PageReport], out: &mut dyn Write) -> OutputResult<()> {
        let generated_at = self.generated_at.unwrap_or_else(Utc::now);
        let markdown = format_markdown_report(reports, generated_at, self.config_hash.as_deref());
        out.write_all(markdown.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Formats reports as markdown
///
/// # Arguments
///
/// * `reports` - One report per audited URL
/// * `generated_at` - Timestamp shown in the run information
/// * `config_hash` - Hash of the configuration file, if one was used
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(
    reports: &[PageReport],
    generated_at: DateTime<Utc>,
    config_hash: Option<&str>,
) -> String {
    let summary = AuditSummary::from_reports(reports);
    let mut md = String::new();

    md.push_str("# Response-Checker Audit Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "- **Config Hash**: {}\n",
        config_hash.unwrap_or("(defaults)")
    ));
    md.push_str(&format!("- **Pages Audited**: {}\n", summary.total_pages));
    md.push_str(&format!("- **Fetch Failures**: {}\n", summary.fetch_failures));
    md.push_str(&format!("- **Check Failures**: {}\n\n", summary.check_failures));

    md.push_str("## Summary\n\n");
    md.push_str("| Level | Count |\n");
    md.push_str("|-------|-------|\n");
    for level in FindingLevel::ALL {
        md.push_str(&format!("| {} | {} |\n", level, summary.count(level)));
    }
    md.push('\n');

    if !summary.issues_by_check.is_empty() {
        md.push_str("### Issues by Check\n\n");
        for (check, count) in &summary.issues_by_check {
            md.push_str(&format!("- **{}**: {}\n", check, count));
        }
        md.push('\n');
    }

    md.push_str("## Findings\n\n");
    for report in reports {
        md.push_str(&format!("### {}\n\n", report.url));

        if let Some(error) = &report.fetch_error {
            md.push_str(&format!("Could not fetch page: {}\n\n", escape_cell(error)));
            continue;
        }

        if report.findings.is_empty() {
            md.push_str("_No findings._\n\n");
        } else {
            md.push_str("| Level | Check | Message |\n");
            md.push_str("|-------|-------|---------|\n");
            for finding in &report.findings {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    finding.level(),
                    finding.check_name(),
                    escape_cell(finding.message())
                ));
            }
            md.push('\n');
        }

        for failure in &report.failures {
            md.push_str(&format!("- **Check failed**: {}\n", escape_cell(&failure.to_string())));
        }
        if !report.failures.is_empty() {
            md.push('\n');
        }
    }

    md.push_str("---\n\n");
    md.push_str("*Generated by Response-Checker*\n");

    md
}

/// Escapes characters that would break a table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Finding;
    use chrono::TimeZone;

    #[test]
    fn test_format_markdown_report() {
        let url = "https://example.com/";
        let mut report = PageReport::new(url);
        report.findings.push(Finding::error("Missing <title> tag.", "TitleCheck", url));
        report
            .findings
            .push(Finding::success("Status code indicates success.", "StatusCodeCheck", url));

        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let md = format_markdown_report(&[report], at, Some("abc123"));

        assert!(md.contains("# Response-Checker Audit Report"));
        assert!(md.contains("- **Generated**: 2024-03-01 12:00:00 UTC"));
        assert!(md.contains("- **Config Hash**: abc123"));
        assert!(md.contains("| error | 1 |"));
        assert!(md.contains("| success | 1 |"));
        assert!(md.contains("### https://example.com/"));
        assert!(md.contains("| error | TitleCheck | Missing &lt;title&gt; tag. |"));
        assert!(md.contains("- **TitleCheck**: 1"));
    }

    #[test]
    fn test_fetch_failure_section() {
        let report = PageReport::fetch_failed("https://down.example/", "Request timeout");
        let md = format_markdown_report(&[report], Utc::now(), None);

        assert!(md.contains("- **Config Hash**: (defaults)"));
        assert!(md.contains("Could not fetch page: Request timeout"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("line\nbreak"), "line break");
    }
}
