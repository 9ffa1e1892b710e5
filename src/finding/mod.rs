//! Finding model
//!
//! A `Finding` is the sole output type of every check: one observation about
//! a response, tagged with a severity level, the producing check and the URL.
//! Findings are immutable once built; the `with_*` helpers consume the value
//! and hand back a new one.

mod level;

pub use level::FindingLevel;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured key/value payload attached to a finding
pub type Details = Map<String, Value>;

/// One reported observation about a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    level: FindingLevel,
    message: String,
    check_name: String,
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    configuration: Option<Details>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Details>,
}

impl Finding {
    /// Creates a finding without configuration snapshot or details
    pub fn new(
        level: FindingLevel,
        message: impl Into<String>,
        check_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            check_name: check_name.into(),
            url: url.into(),
            configuration: None,
            details: None,
        }
    }

    /// Creates a `Success` finding
    pub fn success(
        message: impl Into<String>,
        check_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::new(FindingLevel::Success, message, check_name, url)
    }

    /// Creates an `Info` finding
    pub fn info(
        message: impl Into<String>,
        check_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::new(FindingLevel::Info, message, check_name, url)
    }

    /// Creates a `Warning` finding
    pub fn warning(
        message: impl Into<String>,
        check_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::new(FindingLevel::Warning, message, check_name, url)
    }

    /// Creates an `Error` finding
    pub fn error(
        message: impl Into<String>,
        check_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::new(FindingLevel::Error, message, check_name, url)
    }

    /// Returns a copy of this finding carrying the given configuration snapshot
    pub fn with_configuration(self, configuration: Option<Details>) -> Self {
        Self {
            configuration,
            ..self
        }
    }

    /// Returns a copy of this finding carrying the given details
    pub fn with_details(self, details: Option<Details>) -> Self {
        Self { details, ..self }
    }

    pub fn level(&self) -> FindingLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn check_name(&self) -> &str {
        &self.check_name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Snapshot of the issuing check's settings at evaluation time
    pub fn configuration(&self) -> Option<&Details> {
        self.configuration.as_ref()
    }

    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }

    /// Looks up a single detail value by key
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }

    /// Returns true if message, check name and url are all non-empty
    pub fn is_well_formed(&self) -> bool {
        !self.message.trim().is_empty()
            && !self.check_name.trim().is_empty()
            && !self.url.trim().is_empty()
    }
}

/// Builds a `Details` map from key/value pairs
///
/// ```
/// use response_checker::details;
///
/// let d = details! { "status_code" => 200, "type" => "min" };
/// assert_eq!(d.len(), 2);
/// ```
#[macro_export]
macro_rules! details {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = $crate::finding::Details::new();
        $(map.insert(::std::string::String::from($key), $crate::serde_json::json!($value));)*
        map
    }};
}
