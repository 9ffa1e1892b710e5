use crate::config::checks::ChecksConfig;
use serde::Deserialize;

/// Main configuration structure for Response-Checker
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<UserAgentConfig>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
}

/// Audit run configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Maximum number of pages fetched at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Treat any recorded HTML parse error as a parse failure
    #[serde(rename = "strict-html", default)]
    pub strict_html: bool,

    /// URLs to audit, in addition to any given on the command line
    #[serde(default)]
    pub urls: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            strict_html: false,
            urls: Vec::new(),
        }
    }
}

fn default_concurrency() -> usize {
    8
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the auditing client
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the auditing client
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for contact about the client
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Report format
    #[serde(default)]
    pub format: OutputFormat,

    /// Where to write the report; stdout when absent
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,
}

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per finding
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// Markdown report with summary tables
    Markdown,
}
