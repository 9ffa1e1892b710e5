//! Image alt text check
//!
//! Every `<img>` is judged on its own and produces at most one finding.
//! A page without images, or a response that is not HTML, produces nothing
//! at all: absence of images is not notable.

use crate::checks::{configuration_snapshot, Check};
use crate::details;
use crate::dom::{DomAccess, DomError, Document};
use crate::finding::{Details, Finding, FindingLevel};
use crate::response::Response;
use serde::Serialize;

/// Reported as `src` when an image has no `src` attribute
pub const MISSING_SRC_PLACEHOLDER: &str = "[Image source missing]";

/// Tunables for `ImageAltTextCheck`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageAltTextCheckConfig {
    /// Report `alt=""` (or whitespace-only) as an issue
    pub flag_empty_alt: bool,
    pub missing_alt_level: FindingLevel,
    pub empty_alt_level: FindingLevel,
}

impl Default for ImageAltTextCheckConfig {
    fn default() -> Self {
        Self {
            flag_empty_alt: true,
            missing_alt_level: FindingLevel::Warning,
            empty_alt_level: FindingLevel::Warning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AltIssue {
    Missing,
    Empty,
}

impl AltIssue {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Empty => "empty",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::Missing => "Missing alt attribute.",
            Self::Empty => "Alt attribute is empty (alt=\"\").",
        }
    }
}

/// Checks that `<img>` elements carry meaningful `alt` attributes
#[derive(Debug, Clone)]
pub struct ImageAltTextCheck {
    config: ImageAltTextCheckConfig,
    dom: DomAccess,
    selector: &'static str,
}

impl ImageAltTextCheck {
    pub const NAME: &'static str = "ImageAltTextCheck";

    pub fn new(config: ImageAltTextCheckConfig) -> Self {
        Self {
            config,
            dom: DomAccess::default(),
            selector: "img",
        }
    }

    pub fn with_dom(mut self, dom: DomAccess) -> Self {
        self.dom = dom;
        self
    }

    pub fn config(&self) -> &ImageAltTextCheckConfig {
        &self.config
    }

    fn level_for(&self, issue: AltIssue) -> FindingLevel {
        match issue {
            AltIssue::Missing => self.config.missing_alt_level,
            AltIssue::Empty => self.config.empty_alt_level,
        }
    }

    fn evaluate(
        &self,
        document: &Document,
        url: &str,
        configuration: &Option<Details>,
    ) -> Result<Vec<Finding>, DomError> {
        let images = document.select(self.selector)?;
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let mut findings = Vec::new();
        for image in &images {
            let issue = match image.attribute("alt") {
                None => Some(AltIssue::Missing),
                Some(alt) if self.config.flag_empty_alt && alt.trim().is_empty() => {
                    Some(AltIssue::Empty)
                }
                Some(_) => None,
            };

            if let Some(issue) = issue {
                let src = image.attribute("src").unwrap_or(MISSING_SRC_PLACEHOLDER);
                findings.push(
                    Finding::new(self.level_for(issue), issue.message(), Self::NAME, url)
                        .with_configuration(configuration.clone())
                        .with_details(Some(details! {
                            "type" => issue.as_str(),
                            "src" => src,
                        })),
                );
            }
        }

        if findings.is_empty() {
            findings.push(
                Finding::success(
                    "All images have appropriate alt attributes.",
                    Self::NAME,
                    url,
                )
                .with_configuration(configuration.clone()),
            );
        }

        Ok(findings)
    }
}

impl Default for ImageAltTextCheck {
    fn default() -> Self {
        Self::new(ImageAltTextCheckConfig::default())
    }
}

impl Check for ImageAltTextCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> Option<Details> {
        configuration_snapshot(&self.config)
    }

    fn check(&self, url: &str, response: &Response) -> Vec<Finding> {
        let Some(document) = self.dom.try_parse(url, response, Self::NAME) else {
            return Vec::new();
        };

        let configuration = configuration_snapshot(&self.config);
        match self.evaluate(&document, url, &configuration) {
            Ok(findings) => findings,
            Err(e) => {
                tracing::warn!("{} failed for {}: {}", Self::NAME, url, e);
                vec![Finding::error(
                    format!("Error processing images: {}", e),
                    Self::NAME,
                    url,
                )
                .with_configuration(configuration)]
            }
        }
    }
}
