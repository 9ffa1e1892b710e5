//! Response-Checker: a pluggable response-auditing engine
//!
//! Given an HTTP response for a URL, this crate runs independent content
//! checks (status code, title, meta description, H1, image alt text) and
//! reports a uniform list of leveled findings. It is meant to sit behind
//! site crawlers, CI gates and monitoring jobs.
//!
//! ```
//! use response_checker::{Auditor, FindingLevel, Response};
//!
//! let response = Response::html(
//!     200,
//!     "<html><head><title>Hi</title></head><body><h1>Welcome</h1></body></html>",
//! );
//! let report = Auditor::with_default_checks().audit("https://example.com/", &response);
//! assert!(report.count(FindingLevel::Warning) > 0);
//! ```

pub mod audit;
pub mod checks;
pub mod config;
pub mod dom;
pub mod finding;
pub mod output;
pub mod response;

#[doc(hidden)]
pub use serde_json;

use thiserror::Error;

/// Main error type for Response-Checker operations
#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Audit error: {0}")]
    Audit(#[from] AuditError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },
}

/// Contract violations detected by the audit harness
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error("Check '{check}' returned an invalid result: {returned}. Expected only well-formed findings.")]
    InvalidCheckResult { check: String, returned: String },

    #[error("Check '{check}' panicked: {message}")]
    CheckPanicked { check: String, message: String },
}

impl AuditError {
    /// Name of the check that misbehaved
    pub fn check_name(&self) -> &str {
        match self {
            Self::InvalidCheckResult { check, .. } | Self::CheckPanicked { check, .. } => check,
        }
    }
}

/// Result type alias for Response-Checker operations
pub type Result<T> = std::result::Result<T, CheckerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use audit::{Auditor, PageReport};
pub use checks::Check;
pub use config::Config;
pub use finding::{Finding, FindingLevel};
pub use response::Response;
