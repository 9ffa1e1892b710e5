use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Reports carry this hash so two runs can be compared knowing whether
/// the thresholds changed in between.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::finding::FindingLevel;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[audit]
concurrency = 4
strict-html = true
urls = ["https://example.com/", "https://example.com/about"]

[user-agent]
crawler-name = "SiteAudit"
crawler-version = "2.1"
contact-url = "https://example.com/bot"
contact-email = "ops@example.com"

[output]
format = "markdown"
report-path = "./report.md"

[checks]
enabled = ["status-code", "title", "h1"]

[checks.title]
min-length = 15
max-length = 0
length-level = "info"

[checks.status-code]
redirect-level = "info"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.audit.concurrency, 4);
        assert!(config.audit.strict_html);
        assert_eq!(config.audit.urls.len(), 2);
        assert_eq!(config.user_agent.as_ref().unwrap().crawler_name, "SiteAudit");
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert_eq!(config.output.report_path.as_deref(), Some("./report.md"));
        assert_eq!(config.checks.title.min_length, Some(15));
        assert_eq!(config.checks.title.length_level, Some(FindingLevel::Info));
        assert_eq!(config.checks.status_code.redirect_level, Some(FindingLevel::Info));

        let auditor = config.build_auditor();
        assert_eq!(auditor.len(), 3);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.audit.concurrency, 8);
        assert!(!config.audit.strict_html);
        assert!(config.user_agent.is_none());
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.checks.enabled.len(), 5);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/checker.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_level_is_parse_error() {
        let result = parse_config("[checks.h1]\nmissing-level = \"fatal\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[checks.meta-description]
min-length = 200
max-length = 100
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_single_sided_minimum_above_default_maximum() {
        let result = parse_config("[checks.title]\nmin-length = 100\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let config = parse_config("[checks.title]\nmin-length = 100\nmax-length = 0\n").unwrap();
        assert_eq!(config.checks.title.min_length, Some(100));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("[audit]\nconcurrency = 2\n");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let (_, hash2) = load_config_with_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
