//! Configuration module for Response-Checker
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and turning the `[checks]` tables into a ready-to-run `Auditor`.
//!
//! # Example
//!
//! ```no_run
//! use response_checker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("checker.toml")).unwrap();
//! let auditor = config.build_auditor();
//! println!("Running {} checks", auditor.len());
//! ```

mod checks;
mod parser;
mod types;
mod validation;

pub use checks::{ChecksConfig, ElementSettings, ImageAltSettings, StatusCodeSettings, CHECK_NAMES};
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use types::{AuditConfig, Config, OutputConfig, OutputFormat, UserAgentConfig};
pub use validation::{validate, validate_target_url};
