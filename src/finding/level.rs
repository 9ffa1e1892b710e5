//! Severity tags attached to findings
//!
//! Levels carry no ordering: a check's configuration decides which level an
//! issue is reported at, and consumers filter by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a single finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingLevel {
    /// The rule passed
    Success,

    /// Informational observation
    Info,

    /// Something worth fixing
    Warning,

    /// A defect
    Error,
}

impl FindingLevel {
    /// All levels, in declaration order
    pub const ALL: [FindingLevel; 4] = [Self::Success, Self::Info, Self::Warning, Self::Error];

    /// Returns the lowercase name used in configuration files and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for FindingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FindingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown finding level '{}' (expected success, info, warning or error)",
                other
            )),
        }
    }
}
