//! Aggregate statistics over a batch of page reports

use crate::audit::PageReport;
use crate::finding::FindingLevel;
use std::collections::{BTreeMap, HashMap};

/// Audit statistics summary
#[derive(Debug, Clone, Default)]
pub struct AuditSummary {
    /// Number of URLs audited (including unreachable ones)
    pub total_pages: usize,

    /// Pages that could not be fetched
    pub fetch_failures: usize,

    /// Check contract violations across all pages
    pub check_failures: usize,

    /// Count of findings by level
    pub findings_by_level: HashMap<FindingLevel, usize>,

    /// Count of non-success findings by check name
    pub issues_by_check: BTreeMap<String, usize>,
}

impl AuditSummary {
    /// Builds a summary from a batch of reports
    pub fn from_reports(reports: &[PageReport]) -> Self {
        let mut summary = Self {
            total_pages: reports.len(),
            ..Self::default()
        };

        for report in reports {
            if report.fetch_error.is_some() {
                summary.fetch_failures += 1;
            }
            summary.check_failures += report.failures.len();

            for finding in &report.findings {
                *summary.findings_by_level.entry(finding.level()).or_insert(0) += 1;
                if finding.level() != FindingLevel::Success {
                    *summary
                        .issues_by_check
                        .entry(finding.check_name().to_string())
                        .or_insert(0) += 1;
                }
            }
        }

        summary
    }

    /// Number of findings at a level
    pub fn count(&self, level: FindingLevel) -> usize {
        self.findings_by_level.get(&level).copied().unwrap_or(0)
    }

    pub fn total_findings(&self) -> usize {
        self.findings_by_level.values().sum()
    }

    /// Returns true if any finding has one of the given levels, or if any
    /// page or check failed outright
    pub fn has_failures(&self, fail_on: &[FindingLevel]) -> bool {
        self.fetch_failures > 0
            || self.check_failures > 0
            || fail_on.iter().any(|level| self.count(*level) > 0)
    }
}

/// Prints a short summary to stderr
///
/// Stdout is left to the report itself.
pub fn print_summary(summary: &AuditSummary) {
    eprintln!("=== Audit Summary ===\n");

    eprintln!("Overview:");
    eprintln!("  Pages audited: {}", summary.total_pages);
    eprintln!("  Fetch failures: {}", summary.fetch_failures);
    eprintln!("  Check failures: {}", summary.check_failures);
    eprintln!();

    eprintln!("Findings by Level:");
    for level in FindingLevel::ALL {
        eprintln!("  {}: {}", level, summary.count(level));
    }
    eprintln!();

    if !summary.issues_by_check.is_empty() {
        eprintln!("Issues by Check:");
        for (check, count) in &summary.issues_by_check {
            eprintln!("  {}: {}", check, count);
        }
        eprintln!();
    }
}
