//! Response checks
//!
//! This module contains the check execution contract and the built-in rules:
//! - `StatusCodeCheck` classifies the HTTP status
//! - `TitleCheck`, `MetaDescriptionCheck` and `H1Check` inspect one
//!   document-level element each, sharing the evaluation in `element`
//! - `ImageAltTextCheck` inspects every `<img>` independently
//!
//! New rules plug in by implementing [`Check`].

mod element;
mod h1;
mod image_alt;
mod meta_description;
mod status_code;
mod title;

pub use element::ElementCheckConfig;
pub use h1::H1Check;
pub use image_alt::{ImageAltTextCheck, ImageAltTextCheckConfig};
pub use meta_description::MetaDescriptionCheck;
pub use status_code::{StatusCodeCheck, StatusCodeCheckConfig};
pub use title::TitleCheck;

use crate::finding::{Details, Finding, FindingLevel};
use crate::response::Response;
use serde::Serialize;
use serde_json::Value;

/// Message of the single finding emitted when a document check cannot run
pub const SKIPPED_MESSAGE: &str =
    "Skipped Check: Response was not parseable HTML or a parsing error occurred.";

/// A self-contained rule evaluated against one (url, response) pair
///
/// Implementations must be pure with respect to their inputs: configuration
/// is fixed at construction and no state survives between calls. Expected
/// failure modes (non-HTML bodies, malformed markup) are reported as
/// findings, never as panics.
pub trait Check: Send + Sync {
    /// Name reported in every finding this check produces
    fn name(&self) -> &str;

    /// Snapshot of the tunable settings, `None` when the check has none
    fn configuration(&self) -> Option<Details> {
        None
    }

    /// Evaluates the rule and returns zero or more findings
    fn check(&self, url: &str, response: &Response) -> Vec<Finding>;
}

/// Issue categories shared by the document-level element checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueType {
    Missing,
    Empty,
    Length,
    Multiple,
}

impl IssueType {
    /// Tag stored under `issue_type` in finding details
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Empty => "empty",
            Self::Length => "length",
            Self::Multiple => "multiple",
        }
    }
}

/// Configured severity for each issue type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueLevels {
    pub missing: FindingLevel,
    pub empty: FindingLevel,
    pub length: FindingLevel,
    pub multiple: FindingLevel,
}

impl IssueLevels {
    pub fn level_for(&self, issue: IssueType) -> FindingLevel {
        match issue {
            IssueType::Missing => self.missing,
            IssueType::Empty => self.empty,
            IssueType::Length => self.length,
            IssueType::Multiple => self.multiple,
        }
    }
}

impl Default for IssueLevels {
    fn default() -> Self {
        Self {
            missing: FindingLevel::Error,
            empty: FindingLevel::Error,
            length: FindingLevel::Warning,
            multiple: FindingLevel::Warning,
        }
    }
}

/// Serializes a check configuration into a snapshot map, dropping nulls
///
/// Returns `None` if the value does not serialize to a JSON object.
pub fn configuration_snapshot<T: Serialize>(config: &T) -> Option<Details> {
    match serde_json::to_value(config) {
        Ok(Value::Object(map)) => Some(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        Ok(other) => {
            tracing::warn!("Check configuration is not a map: {}", other);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to snapshot check configuration: {}", e);
            None
        }
    }
}

/// Returns the five built-in checks with default settings
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(StatusCodeCheck::default()),
        Box::new(TitleCheck::default()),
        Box::new(MetaDescriptionCheck::default()),
        Box::new(H1Check::default()),
        Box::new(ImageAltTextCheck::default()),
    ]
}
