//! `<meta name="description">` presence, uniqueness and length

use crate::checks::element::{run_element_check, ContentSource, ElementCheckConfig, ElementRule};
use crate::checks::{configuration_snapshot, Check};
use crate::dom::DomAccess;
use crate::finding::{Details, Finding};
use crate::response::Response;

const DESCRIPTION_RULE: ElementRule = ElementRule {
    selector: "head > meta[name=\"description\"]",
    source: ContentSource::Attribute("content"),
    tag: "<meta name=\"description\">",
    subject: "Description",
    echo_key: "description",
    empty_message: "<meta name=\"description\"> tag content is empty.",
    success_message: "Description is present and has appropriate length.",
    error_context: "meta description",
};

/// Checks the `content` of the head's description meta tag
/// (50 to 160 characters by default)
#[derive(Debug, Clone)]
pub struct MetaDescriptionCheck {
    config: ElementCheckConfig,
    dom: DomAccess,
}

impl MetaDescriptionCheck {
    pub const NAME: &'static str = "MetaDescriptionCheck";

    pub fn new(config: ElementCheckConfig) -> Self {
        Self {
            config,
            dom: DomAccess::default(),
        }
    }

    pub fn default_config() -> ElementCheckConfig {
        ElementCheckConfig::with_lengths(Some(50), Some(160))
    }

    pub fn with_dom(mut self, dom: DomAccess) -> Self {
        self.dom = dom;
        self
    }

    pub fn config(&self) -> &ElementCheckConfig {
        &self.config
    }
}

impl Default for MetaDescriptionCheck {
    fn default() -> Self {
        Self::new(Self::default_config())
    }
}

impl Check for MetaDescriptionCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> Option<Details> {
        configuration_snapshot(&self.config)
    }

    fn check(&self, url: &str, response: &Response) -> Vec<Finding> {
        run_element_check(
            &DESCRIPTION_RULE,
            Self::NAME,
            &self.config,
            &self.dom,
            url,
            response,
        )
    }
}
