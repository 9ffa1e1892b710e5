//! HTTP status code classification
//!
//! Always yields exactly one finding; needs no DOM.

use crate::checks::{configuration_snapshot, Check};
use crate::details;
use crate::finding::{Details, Finding, FindingLevel};
use crate::response::Response;
use serde::Serialize;

/// Tunables for `StatusCodeCheck`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCodeCheckConfig {
    /// Level for 3xx; `Success` treats redirects like 2xx
    pub redirect_level: FindingLevel,
    pub client_error_level: FindingLevel,
    pub server_error_level: FindingLevel,
    /// Level for 1xx and out-of-range codes
    pub unexpected_level: FindingLevel,
}

impl Default for StatusCodeCheckConfig {
    fn default() -> Self {
        Self {
            redirect_level: FindingLevel::Warning,
            client_error_level: FindingLevel::Error,
            server_error_level: FindingLevel::Error,
            unexpected_level: FindingLevel::Error,
        }
    }
}

/// Classifies the response status into a single finding
#[derive(Debug, Clone, Default)]
pub struct StatusCodeCheck {
    config: StatusCodeCheckConfig,
}

impl StatusCodeCheck {
    pub const NAME: &'static str = "StatusCodeCheck";

    pub fn new(config: StatusCodeCheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatusCodeCheckConfig {
        &self.config
    }

    fn success(&self, url: &str, status: u16, configuration: Option<Details>) -> Finding {
        Finding::success("Status code indicates success.", Self::NAME, url)
            .with_configuration(configuration)
            .with_details(Some(details! { "status_code" => status }))
    }
}

impl Check for StatusCodeCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> Option<Details> {
        configuration_snapshot(&self.config)
    }

    fn check(&self, url: &str, response: &Response) -> Vec<Finding> {
        let status = response.status();
        let configuration = configuration_snapshot(&self.config);

        if response.successful()
            || (response.redirect() && self.config.redirect_level == FindingLevel::Success)
        {
            return vec![self.success(url, status, configuration)];
        }

        let (level, message, details) = if response.redirect() {
            (
                self.config.redirect_level,
                format!("Page redirected ({})", status),
                details! {
                    "status_code" => status,
                    "redirect_location" => response.header("Location"),
                },
            )
        } else if response.client_error() {
            (
                self.config.client_error_level,
                format!("Client error response ({})", status),
                details! { "status_code" => status },
            )
        } else if response.server_error() {
            (
                self.config.server_error_level,
                format!("Server error response ({})", status),
                details! { "status_code" => status },
            )
        } else {
            (
                self.config.unexpected_level,
                format!("Received unexpected status code: {}", status),
                details! { "status_code" => status },
            )
        };

        vec![Finding::new(level, message, Self::NAME, url)
            .with_configuration(configuration)
            .with_details(Some(details))]
    }
}
