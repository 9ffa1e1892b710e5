use crate::checks::{ElementCheckConfig, H1Check, MetaDescriptionCheck, TitleCheck};
use crate::config::checks::{ChecksConfig, ElementSettings, CHECK_NAMES};
use crate::config::types::{AuditConfig, Config, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_audit_config(&config.audit)?;
    if let Some(user_agent) = &config.user_agent {
        validate_user_agent_config(user_agent)?;
    }
    validate_output_config(&config.output)?;
    validate_checks_config(&config.checks)?;
    Ok(())
}

/// Validates the `[audit]` section
fn validate_audit_config(config: &AuditConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    for url in &config.urls {
        validate_target_url(url)?;
    }

    Ok(())
}

/// Checks that a URL to audit is absolute http(s)
pub fn validate_target_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid URL '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "URL '{}' must use http or https",
            raw
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.report_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "report_path cannot be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates the `[checks]` section
fn validate_checks_config(config: &ChecksConfig) -> Result<(), ConfigError> {
    for name in &config.enabled {
        if !CHECK_NAMES.contains(&name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Unknown check '{}' in checks.enabled (expected one of: {})",
                name,
                CHECK_NAMES.join(", ")
            )));
        }
    }

    validate_lengths("title", &config.title, TitleCheck::default_config())?;
    validate_lengths(
        "meta-description",
        &config.meta_description,
        MetaDescriptionCheck::default_config(),
    )?;
    validate_lengths("h1", &config.h1, H1Check::default_config())?;

    Ok(())
}

/// Rejects a minimum above the maximum once overrides are merged with the
/// check's defaults
fn validate_lengths(
    section: &str,
    settings: &ElementSettings,
    defaults: ElementCheckConfig,
) -> Result<(), ConfigError> {
    let effective = settings.apply(defaults);
    if let (Some(min), Some(max)) = (effective.min_length, effective.max_length) {
        if min > max {
            return Err(ConfigError::Validation(format!(
                "checks.{}: min-length ({}) exceeds max-length ({})",
                section, min, max
            )));
        }
    }
    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::Validation(format!("Invalid email format: '{}'", email));

    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
