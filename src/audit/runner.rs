//! Concurrent fetch-and-audit over a list of URLs
//!
//! A global semaphore bounds how many pages are in flight at once. Each task
//! fetches one URL and runs every check against the materialized response.

use crate::audit::{Auditor, PageReport};
use crate::config::{validate_target_url, Config};
use crate::response::{build_http_client, fetch};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fetches and audits every URL, returning reports in input order
///
/// # Arguments
///
/// * `auditor` - The checks to run on each response
/// * `client` - HTTP client used for fetching
/// * `urls` - Absolute http(s) URLs
/// * `concurrency` - Maximum number of pages fetched at once (at least 1)
pub async fn audit_urls(
    auditor: Arc<Auditor>,
    client: Client,
    urls: Vec<String>,
    concurrency: usize,
) -> Vec<PageReport> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let total = urls.len();
    let mut tasks = JoinSet::new();

    for (index, url) in urls.iter().cloned().enumerate() {
        let auditor = Arc::clone(&auditor);
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => return (index, PageReport::fetch_failed(url, e.to_string())),
            };

            tracing::debug!("Fetching {}", url);
            let report = match fetch(&client, &url).await {
                Ok(response) => auditor.audit(&url, &response),
                Err(e) => {
                    tracing::warn!("{}", e);
                    PageReport::fetch_failed(url, e.to_string())
                }
            };
            (index, report)
        });
    }

    let mut slots: Vec<Option<PageReport>> = (0..total).map(|_| None).collect();
    let mut completed = 0;
    let mut last_task_error = None;

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, report)) => {
                completed += 1;
                tracing::info!("Progress: {}/{} pages audited", completed, total);
                slots[index] = Some(report);
            }
            Err(e) => {
                tracing::error!("Audit task failed: {}", e);
                last_task_error = Some(e.to_string());
            }
        }
    }

    let reason = last_task_error.unwrap_or_else(|| "no report produced".to_string());
    fill_missing_reports(urls, slots, &reason)
}

/// Pairs each URL with its report, marking URLs whose task died as failed
fn fill_missing_reports(
    urls: Vec<String>,
    slots: Vec<Option<PageReport>>,
    reason: &str,
) -> Vec<PageReport> {
    urls.into_iter()
        .zip(slots)
        .map(|(url, slot)| {
            slot.unwrap_or_else(|| {
                PageReport::fetch_failed(url, format!("Audit task failed: {}", reason))
            })
        })
        .collect()
}

/// Audits URLs with the checks, client identity and concurrency from a configuration
///
/// Every URL is validated before anything is fetched.
///
/// # Returns
///
/// * `Ok(Vec<PageReport>)` - One report per URL, in input order
/// * `Err(CheckerError)` - A URL was not absolute http(s) or the client could not be built
pub async fn audit_with_config(config: &Config, urls: Vec<String>) -> crate::Result<Vec<PageReport>> {
    for url in &urls {
        validate_target_url(url)?;
    }

    let auditor = Arc::new(config.build_auditor());
    let client = build_http_client(config.user_agent.as_ref())?;

    tracing::info!(
        "Auditing {} URL(s) with {} check(s), concurrency {}",
        urls.len(),
        auditor.len(),
        config.audit.concurrency
    );

    Ok(audit_urls(auditor, client, urls, config.audit.concurrency).await)
}
