//! Per-check settings from the `[checks]` tables
//!
//! Every key is optional; anything left out keeps the check's built-in
//! default. A length bound of `0` switches that bound off.

use crate::audit::Auditor;
use crate::checks::{
    Check, ElementCheckConfig, H1Check, ImageAltTextCheck, ImageAltTextCheckConfig, MetaDescriptionCheck,
    StatusCodeCheck, StatusCodeCheckConfig, TitleCheck,
};
use crate::config::types::Config;
use crate::dom::{DomAccess, ParseMode};
use crate::finding::FindingLevel;
use serde::Deserialize;

/// Names accepted in `checks.enabled`
pub const CHECK_NAMES: [&str; 5] = ["status-code", "title", "meta-description", "h1", "image-alt"];

/// The `[checks]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ChecksConfig {
    /// Checks to run, by name; all of them when absent
    #[serde(default = "all_check_names")]
    pub enabled: Vec<String>,

    #[serde(default)]
    pub title: ElementSettings,

    #[serde(rename = "meta-description", default)]
    pub meta_description: ElementSettings,

    #[serde(default)]
    pub h1: ElementSettings,

    #[serde(rename = "image-alt", default)]
    pub image_alt: ImageAltSettings,

    #[serde(rename = "status-code", default)]
    pub status_code: StatusCodeSettings,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            enabled: all_check_names(),
            title: ElementSettings::default(),
            meta_description: ElementSettings::default(),
            h1: ElementSettings::default(),
            image_alt: ImageAltSettings::default(),
            status_code: StatusCodeSettings::default(),
        }
    }
}

fn all_check_names() -> Vec<String> {
    CHECK_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Overrides for title, meta description and H1
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ElementSettings {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub missing_level: Option<FindingLevel>,
    pub empty_level: Option<FindingLevel>,
    pub length_level: Option<FindingLevel>,
    pub multiple_level: Option<FindingLevel>,
}

impl ElementSettings {
    /// Applies these overrides on top of a check's defaults
    pub fn apply(&self, base: ElementCheckConfig) -> ElementCheckConfig {
        ElementCheckConfig {
            min_length: self.min_length.or(base.min_length).filter(|n| *n > 0),
            max_length: self.max_length.or(base.max_length).filter(|n| *n > 0),
            missing_level: self.missing_level.unwrap_or(base.missing_level),
            empty_level: self.empty_level.unwrap_or(base.empty_level),
            length_level: self.length_level.unwrap_or(base.length_level),
            multiple_level: self.multiple_level.unwrap_or(base.multiple_level),
        }
    }
}

/// Overrides for the image alt text check
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageAltSettings {
    pub flag_empty_alt: Option<bool>,
    pub missing_alt_level: Option<FindingLevel>,
    pub empty_alt_level: Option<FindingLevel>,
}

impl ImageAltSettings {
    pub fn apply(&self, base: ImageAltTextCheckConfig) -> ImageAltTextCheckConfig {
        ImageAltTextCheckConfig {
            flag_empty_alt: self.flag_empty_alt.unwrap_or(base.flag_empty_alt),
            missing_alt_level: self.missing_alt_level.unwrap_or(base.missing_alt_level),
            empty_alt_level: self.empty_alt_level.unwrap_or(base.empty_alt_level),
        }
    }
}

/// Overrides for the status code check
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StatusCodeSettings {
    pub redirect_level: Option<FindingLevel>,
    pub client_error_level: Option<FindingLevel>,
    pub server_error_level: Option<FindingLevel>,
    pub unexpected_level: Option<FindingLevel>,
}

impl StatusCodeSettings {
    pub fn apply(&self, base: StatusCodeCheckConfig) -> StatusCodeCheckConfig {
        StatusCodeCheckConfig {
            redirect_level: self.redirect_level.unwrap_or(base.redirect_level),
            client_error_level: self.client_error_level.unwrap_or(base.client_error_level),
            server_error_level: self.server_error_level.unwrap_or(base.server_error_level),
            unexpected_level: self.unexpected_level.unwrap_or(base.unexpected_level),
        }
    }
}

impl Config {
    /// Builds an auditor with the enabled checks, in `CHECK_NAMES` order
    pub fn build_auditor(&self) -> Auditor {
        let dom = DomAccess::new(if self.audit.strict_html {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        });
        let checks = &self.checks;
        let candidates: [(&str, Box<dyn Check>); 5] = [
            (
                "status-code",
                Box::new(StatusCodeCheck::new(
                    checks.status_code.apply(StatusCodeCheckConfig::default()),
                )),
            ),
            (
                "title",
                Box::new(
                    TitleCheck::new(checks.title.apply(TitleCheck::default_config()))
                        .with_dom(dom),
                ),
            ),
            (
                "meta-description",
                Box::new(
                    MetaDescriptionCheck::new(
                        checks
                            .meta_description
                            .apply(MetaDescriptionCheck::default_config()),
                    )
                    .with_dom(dom),
                ),
            ),
            (
                "h1",
                Box::new(H1Check::new(checks.h1.apply(H1Check::default_config())).with_dom(dom)),
            ),
            (
                "image-alt",
                Box::new(
                    ImageAltTextCheck::new(checks.image_alt.apply(ImageAltTextCheckConfig::default()))
                        .with_dom(dom),
                ),
            ),
        ];

        let mut auditor = Auditor::new();
        for (name, check) in candidates {
            if checks.enabled.iter().any(|enabled| enabled == name) {
                auditor.push_check(check);
            } else {
                tracing::debug!("Check '{}' disabled by configuration", name);
            }
        }

        auditor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_settings_override_defaults() {
        let settings = ElementSettings {
            min_length: Some(5),
            length_level: Some(FindingLevel::Info),
            ..ElementSettings::default()
        };
        let config = settings.apply(TitleCheck::default_config());

        assert_eq!(config.min_length, Some(5));
        assert_eq!(config.max_length, Some(60));
        assert_eq!(config.length_level, FindingLevel::Info);
        assert_eq!(config.missing_level, FindingLevel::Error);
    }

    #[test]
    fn test_zero_disables_bound() {
        let settings = ElementSettings {
            max_length: Some(0),
            ..ElementSettings::default()
        };
        let config = settings.apply(H1Check::default_config());
        assert_eq!(config.min_length, Some(20));
        assert_eq!(config.max_length, None);
    }

    #[test]
    fn test_build_auditor_respects_enabled_list() {
        let mut config = Config::default();
        assert_eq!(config.build_auditor().len(), 5);

        config.checks.enabled = vec!["h1".to_string(), "status-code".to_string()];
        let auditor = config.build_auditor();
        let names: Vec<&str> = auditor.checks().map(|c| c.name()).collect();
        assert_eq!(names, vec!["StatusCodeCheck", "H1Check"]);
    }
}
