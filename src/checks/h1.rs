//! `<h1>` presence, uniqueness and length

use crate::checks::element::{run_element_check, ContentSource, ElementCheckConfig, ElementRule};
use crate::checks::{configuration_snapshot, Check};
use crate::dom::DomAccess;
use crate::finding::{Details, Finding};
use crate::response::Response;

const HEADING_RULE: ElementRule = ElementRule {
    selector: "h1",
    source: ContentSource::Text,
    tag: "<h1>",
    subject: "Heading",
    echo_key: "heading",
    empty_message: "<h1> tag is empty or contains only whitespace.",
    success_message: "Heading is present and has appropriate length.",
    error_context: "heading",
};

/// Checks the page's `<h1>` headings anywhere in the document
/// (20 to 70 characters by default)
#[derive(Debug, Clone)]
pub struct H1Check {
    config: ElementCheckConfig,
    dom: DomAccess,
}

impl H1Check {
    pub const NAME: &'static str = "H1Check";

    pub fn new(config: ElementCheckConfig) -> Self {
        Self {
            config,
            dom: DomAccess::default(),
        }
    }

    pub fn default_config() -> ElementCheckConfig {
        ElementCheckConfig::with_lengths(Some(20), Some(70))
    }

    pub fn with_dom(mut self, dom: DomAccess) -> Self {
        self.dom = dom;
        self
    }

    pub fn config(&self) -> &ElementCheckConfig {
        &self.config
    }
}

impl Default for H1Check {
    fn default() -> Self {
        Self::new(Self::default_config())
    }
}

impl Check for H1Check {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> Option<Details> {
        configuration_snapshot(&self.config)
    }

    fn check(&self, url: &str, response: &Response) -> Vec<Finding> {
        run_element_check(&HEADING_RULE, Self::NAME, &self.config, &self.dom, url, response)
    }
}
