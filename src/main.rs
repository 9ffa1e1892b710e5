//! Response-Checker main entry point
//!
//! This is the command-line interface for the Response-Checker page auditor.

use anyhow::{bail, Context};
use clap::Parser;
use response_checker::audit::audit_with_config;
use response_checker::config::{load_config_with_hash, validate_target_url, Config, OutputFormat};
use response_checker::output::{print_summary, write_report_file, writer_for, AuditSummary};
use response_checker::FindingLevel;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Response-Checker: audits web pages for common content defects
///
/// Fetches each URL without following redirects and runs the status code,
/// title, meta description, H1 and image alt text checks against it.
#[derive(Parser, Debug)]
#[command(name = "response-checker")]
#[command(version)]
#[command(about = "Audits HTTP responses for common content defects", long_about = None)]
struct Cli {
    /// URLs to audit (added to any listed in the configuration)
    #[arg(value_name = "URLS")]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report format (overrides the configuration)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Finding level that makes the run exit non-zero (repeatable)
    #[arg(long = "fail-on", value_name = "LEVEL", default_values_t = [FindingLevel::Error])]
    fail_on: Vec<FindingLevel>,

    /// Validate config and show what would be audited without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, Some(hash))
        }
        None => (Config::default(), None),
    };

    let urls = collect_urls(&config, &cli.urls)?;
    let format = cli.format.unwrap_or(config.output.format);
    let report_path = cli
        .output
        .clone()
        .or_else(|| config.output.report_path.as_ref().map(PathBuf::from));

    if cli.dry_run {
        print_dry_run(&config, &urls, format, report_path.as_ref(), &cli.fail_on);
        return Ok(ExitCode::SUCCESS);
    }

    if urls.is_empty() {
        bail!("No URLs to audit; pass them on the command line or list them under [audit] urls");
    }

    let reports = audit_with_config(&config, urls)
        .await
        .context("Audit could not start")?;

    let writer = writer_for(format, config_hash.as_deref());
    match &report_path {
        Some(path) => write_report_file(writer.as_ref(), &reports, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writer
                .write_reports(&reports, &mut handle)
                .context("Failed to write report")?;
        }
    }

    let summary = AuditSummary::from_reports(&reports);
    if !cli.quiet {
        print_summary(&summary);
    }

    if summary.has_failures(&cli.fail_on) {
        tracing::warn!("Audit found issues at a failing level");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("response_checker=info,warn"),
            1 => EnvFilter::new("response_checker=debug,info"),
            2 => EnvFilter::new("response_checker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Merges configured and command-line URLs, dropping duplicates
fn collect_urls(config: &Config, extra: &[String]) -> anyhow::Result<Vec<String>> {
    let mut urls: Vec<String> = Vec::new();

    for url in config.audit.urls.iter().chain(extra) {
        validate_target_url(url)?;
        if !urls.contains(url) {
            urls.push(url.clone());
        }
    }

    Ok(urls)
}

/// Handles the --dry-run mode: shows the resolved configuration and URL list
fn print_dry_run(
    config: &Config,
    urls: &[String],
    format: OutputFormat,
    report_path: Option<&PathBuf>,
    fail_on: &[FindingLevel],
) {
    println!("=== Response-Checker Dry Run ===\n");

    println!("Audit Configuration:");
    println!("  Concurrency: {}", config.audit.concurrency);
    println!("  Strict HTML: {}", config.audit.strict_html);

    println!("\nUser Agent:");
    match &config.user_agent {
        Some(ua) => {
            println!("  Name: {}", ua.crawler_name);
            println!("  Version: {}", ua.crawler_version);
            println!("  Contact URL: {}", ua.contact_url);
            println!("  Contact Email: {}", ua.contact_email);
        }
        None => println!("  {}", response_checker::response::DEFAULT_USER_AGENT),
    }

    println!("\nOutput:");
    println!("  Format: {:?}", format);
    match report_path {
        Some(path) => println!("  Report: {}", path.display()),
        None => println!("  Report: stdout"),
    }
    let levels: Vec<&str> = fail_on.iter().map(|l| l.as_str()).collect();
    println!("  Fail on: {}", levels.join(", "));

    println!("\nChecks:");
    for check in config.build_auditor().checks() {
        println!("  - {}", check.name());
        if let Some(snapshot) = check.configuration() {
            for (key, value) in &snapshot {
                println!("      {}: {}", key, value);
            }
        }
    }

    println!("\nURLs ({}):", urls.len());
    for url in urls {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");
}
