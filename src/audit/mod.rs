//! Audit harness
//!
//! This module runs a set of checks over responses:
//! - Isolating each check call so one faulty check cannot abort a batch
//! - Validating that every returned finding is well formed
//! - Fanning out fetch-and-audit work over many URLs (`runner`)

mod runner;

pub use runner::{audit_urls, audit_with_config};

use crate::checks::{default_checks, Check};
use crate::finding::{Finding, FindingLevel};
use crate::response::Response;
use crate::AuditError;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Result of auditing one URL
#[derive(Debug)]
pub struct PageReport {
    /// The audited URL
    pub url: String,

    /// Findings from every check that completed, in check order
    pub findings: Vec<Finding>,

    /// Checks that violated their contract for this page
    pub failures: Vec<AuditError>,

    /// Set when the page could not be fetched; no checks ran
    pub fetch_error: Option<String>,
}

impl PageReport {
    /// Creates an empty report for a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            findings: Vec::new(),
            failures: Vec::new(),
            fetch_error: None,
        }
    }

    /// Creates a report for a page that could not be fetched
    pub fn fetch_failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            fetch_error: Some(error.into()),
            ..Self::new(url)
        }
    }

    /// Number of findings at the given level
    pub fn count(&self, level: FindingLevel) -> usize {
        self.findings.iter().filter(|f| f.level() == level).count()
    }

    /// Findings produced by the named check
    pub fn findings_for<'a>(&'a self, check_name: &'a str) -> impl Iterator<Item = &'a Finding> {
        self.findings
            .iter()
            .filter(move |f| f.check_name() == check_name)
    }

    /// Returns true if the page was fetched and every check honored its contract
    pub fn is_complete(&self) -> bool {
        self.fetch_error.is_none() && self.failures.is_empty()
    }
}

/// Runs a fixed list of checks against responses
pub struct Auditor {
    checks: Vec<Box<dyn Check>>,
}

impl Auditor {
    /// Creates an auditor with no checks
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Creates an auditor with the five built-in checks at default settings
    pub fn with_default_checks() -> Self {
        Self {
            checks: default_checks(),
        }
    }

    /// Adds a check; checks run in registration order
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Adds an already boxed check
    pub fn push_check(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    pub fn checks(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Runs every check against one response
    ///
    /// Contract violations are collected in `PageReport::failures`; the
    /// remaining checks still run.
    pub fn audit(&self, url: &str, response: &Response) -> PageReport {
        let mut report = PageReport::new(url);

        for check in &self.checks {
            match run_check(check.as_ref(), url, response) {
                Ok(findings) => report.findings.extend(findings),
                Err(e) => {
                    tracing::error!("{}", e);
                    report.failures.push(e);
                }
            }
        }

        tracing::debug!(
            "Audited {}: {} finding(s), {} failure(s)",
            url,
            report.findings.len(),
            report.failures.len()
        );

        report
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::with_default_checks()
    }
}

/// Runs a single check, isolating panics and validating its result
pub fn run_check(check: &dyn Check, url: &str, response: &Response) -> Result<Vec<Finding>, AuditError> {
    let findings = catch_unwind(AssertUnwindSafe(|| check.check(url, response))).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        AuditError::CheckPanicked {
            check: check.name().to_string(),
            message,
        }
    })?;

    validate_findings(check.name(), &findings)?;
    Ok(findings)
}

/// Verifies that a check returned only well-formed findings
pub fn validate_findings(check_name: &str, findings: &[Finding]) -> Result<(), AuditError> {
    for (index, finding) in findings.iter().enumerate() {
        if !finding.is_well_formed() {
            return Err(AuditError::InvalidCheckResult {
                check: check_name.to_string(),
                returned: describe_malformed(index, finding),
            });
        }
    }
    Ok(())
}

fn describe_malformed(index: usize, finding: &Finding) -> String {
    let mut missing = Vec::new();
    if finding.message().trim().is_empty() {
        missing.push("message");
    }
    if finding.check_name().trim().is_empty() {
        missing.push("check name");
    }
    if finding.url().trim().is_empty() {
        missing.push("url");
    }
    format!("Finding #{} with empty {}", index, missing.join(", "))
}
