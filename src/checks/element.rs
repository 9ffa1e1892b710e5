//! Shared evaluation for document-level element checks
//!
//! Title, meta description and H1 follow the same decision sequence:
//!
//! 1. No document → one ERROR "skipped" finding
//! 2. Zero matches → one `missing` finding, stop
//! 3. More than one match → one `multiple` finding, continue with the first
//! 4. Empty content → one `empty` finding, no length checks
//! 5. Length outside the enforced bounds → `length` finding(s)
//! 6. Nothing reported → one SUCCESS finding
//!
//! A query error discards everything collected so far and yields a single
//! ERROR finding instead.

use crate::checks::{configuration_snapshot, IssueLevels, IssueType, SKIPPED_MESSAGE};
use crate::details;
use crate::dom::{DomAccess, DomError, Document, Element};
use crate::finding::{Details, Finding, FindingLevel};
use crate::response::Response;
use serde::Serialize;

/// Tunables of a document-level element check
///
/// A bound of `None` or `0` is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementCheckConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    pub missing_level: FindingLevel,
    pub empty_level: FindingLevel,
    pub length_level: FindingLevel,
    pub multiple_level: FindingLevel,
}

impl ElementCheckConfig {
    /// Creates a configuration with the given bounds and default levels
    pub fn with_lengths(min_length: Option<usize>, max_length: Option<usize>) -> Self {
        let levels = IssueLevels::default();
        Self {
            min_length,
            max_length,
            missing_level: levels.missing,
            empty_level: levels.empty,
            length_level: levels.length,
            multiple_level: levels.multiple,
        }
    }

    pub fn levels(&self) -> IssueLevels {
        IssueLevels {
            missing: self.missing_level,
            empty: self.empty_level,
            length: self.length_level,
            multiple: self.multiple_level,
        }
    }

    fn enforced_min(&self) -> Option<usize> {
        self.min_length.filter(|min| *min > 0)
    }

    fn enforced_max(&self) -> Option<usize> {
        self.max_length.filter(|max| *max > 0)
    }
}

/// Where the checked content comes from on the matched element
#[derive(Debug, Clone, Copy)]
pub(crate) enum ContentSource {
    Text,
    Attribute(&'static str),
}

/// Static description of one element rule
#[derive(Debug, Clone, Copy)]
pub(crate) struct ElementRule {
    pub selector: &'static str,
    pub source: ContentSource,
    /// Tag as shown in messages, e.g. `<title>`
    pub tag: &'static str,
    /// Capitalized subject for length messages, e.g. `Title`
    pub subject: &'static str,
    /// Details key echoing the offending content
    pub echo_key: &'static str,
    pub empty_message: &'static str,
    pub success_message: &'static str,
    /// Noun used in "Error during <context> check"
    pub error_context: &'static str,
}

impl ContentSource {
    fn extract(&self, element: &Element<'_>) -> String {
        match self {
            Self::Text => element.text(),
            Self::Attribute(name) => element.attribute(name).unwrap_or("").to_string(),
        }
    }
}

/// Runs a rule end to end, including the skip and error boundaries
pub(crate) fn run_element_check(
    rule: &ElementRule,
    check_name: &str,
    config: &ElementCheckConfig,
    dom: &DomAccess,
    url: &str,
    response: &Response,
) -> Vec<Finding> {
    let configuration = configuration_snapshot(config);

    let Some(document) = dom.try_parse(url, response, check_name) else {
        return vec![Finding::error(SKIPPED_MESSAGE, check_name, url).with_configuration(configuration)];
    };

    let mut recorder = IssueRecorder::new(check_name, url, config.levels(), configuration.clone());

    match evaluate(rule, config, &document, &mut recorder) {
        Ok(()) => recorder.finish(rule.success_message),
        Err(e) => {
            tracing::warn!("{} failed for {}: {}", check_name, url, e);
            vec![Finding::error(
                format!("Error during {} check: {}", rule.error_context, e),
                check_name,
                url,
            )
            .with_configuration(configuration)]
        }
    }
}

fn evaluate(
    rule: &ElementRule,
    config: &ElementCheckConfig,
    document: &Document,
    recorder: &mut IssueRecorder<'_>,
) -> Result<(), DomError> {
    let matches = document.select(rule.selector)?;

    let Some(first) = matches.first() else {
        recorder.add(
            IssueType::Missing,
            format!("Missing {} tag.", rule.tag),
            None,
        );
        return Ok(());
    };

    if matches.len() > 1 {
        recorder.add(
            IssueType::Multiple,
            format!("Multiple {} tags found.", rule.tag),
            Some(details! { "count" => matches.len() }),
        );
    }

    let raw = rule.source.extract(first);
    let content = raw.trim();
    if content.is_empty() {
        recorder.add(IssueType::Empty, rule.empty_message.to_string(), None);
        return Ok(());
    }

    let length = content.chars().count();

    if let Some(min) = config.enforced_min() {
        if length < min {
            recorder.add(
                IssueType::Length,
                format!(
                    "{} length ({}) is less than minimum ({}).",
                    rule.subject, length, min
                ),
                Some(details! {
                    rule.echo_key => content,
                    "length" => length,
                    "limit" => min,
                    "type" => "min",
                }),
            );
        }
    }

    if let Some(max) = config.enforced_max() {
        if length > max {
            recorder.add(
                IssueType::Length,
                format!("{} length ({}) exceeds maximum ({}).", rule.subject, length, max),
                Some(details! {
                    rule.echo_key => content,
                    "length" => length,
                    "limit" => max,
                    "type" => "max",
                }),
            );
        }
    }

    Ok(())
}

/// Buffers per-issue findings for one check invocation
pub(crate) struct IssueRecorder<'a> {
    check_name: &'a str,
    url: &'a str,
    levels: IssueLevels,
    configuration: Option<Details>,
    findings: Vec<Finding>,
}

impl<'a> IssueRecorder<'a> {
    pub fn new(
        check_name: &'a str,
        url: &'a str,
        levels: IssueLevels,
        configuration: Option<Details>,
    ) -> Self {
        Self {
            check_name,
            url,
            levels,
            configuration,
            findings: Vec::new(),
        }
    }

    /// Records one issue at its configured level, tagging `issue_type`
    pub fn add(&mut self, issue: IssueType, message: String, details: Option<Details>) {
        let mut details = details.unwrap_or_default();
        details.insert("issue_type".to_string(), issue.as_str().into());

        self.findings.push(
            Finding::new(self.levels.level_for(issue), message, self.check_name, self.url)
                .with_configuration(self.configuration.clone())
                .with_details(Some(details)),
        );
    }

    /// Returns the buffered findings, or one SUCCESS finding if there are none
    pub fn finish(self, success_message: &str) -> Vec<Finding> {
        if self.findings.is_empty() {
            vec![Finding::success(success_message, self.check_name, self.url)
                .with_configuration(self.configuration)]
        } else {
            self.findings
        }
    }
}
