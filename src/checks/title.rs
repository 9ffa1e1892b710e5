//! `<title>` presence, uniqueness and length

use crate::checks::element::{run_element_check, ContentSource, ElementCheckConfig, ElementRule};
use crate::checks::{configuration_snapshot, Check};
use crate::dom::DomAccess;
use crate::finding::{Details, Finding};
use crate::response::Response;

const TITLE_RULE: ElementRule = ElementRule {
    selector: "head > title",
    source: ContentSource::Text,
    tag: "<title>",
    subject: "Title",
    echo_key: "title",
    empty_message: "<title> tag is empty or contains only whitespace.",
    success_message: "Title is present and has appropriate length.",
    error_context: "title",
};

/// Checks the document's `<title>` (10 to 60 characters by default)
#[derive(Debug, Clone)]
pub struct TitleCheck {
    config: ElementCheckConfig,
    dom: DomAccess,
}

impl TitleCheck {
    pub const NAME: &'static str = "TitleCheck";

    pub fn new(config: ElementCheckConfig) -> Self {
        Self {
            config,
            dom: DomAccess::default(),
        }
    }

    /// Default bounds for page titles
    pub fn default_config() -> ElementCheckConfig {
        ElementCheckConfig::with_lengths(Some(10), Some(60))
    }

    /// Replaces the DOM-access helper (e.g. to parse strictly)
    pub fn with_dom(mut self, dom: DomAccess) -> Self {
        self.dom = dom;
        self
    }

    pub fn config(&self) -> &ElementCheckConfig {
        &self.config
    }
}

impl Default for TitleCheck {
    fn default() -> Self {
        Self::new(Self::default_config())
    }
}

impl Check for TitleCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> Option<Details> {
        configuration_snapshot(&self.config)
    }

    fn check(&self, url: &str, response: &Response) -> Vec<Finding> {
        run_element_check(&TITLE_RULE, Self::NAME, &self.config, &self.dom, url, response)
    }
}
