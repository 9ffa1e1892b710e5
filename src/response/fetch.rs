//! HTTP fetcher
//!
//! This module turns a URL into a materialized `Response`:
//! - Building HTTP clients with a descriptive user agent string
//! - Leaving redirects unfollowed so 3xx statuses reach the checks
//! - Classifying transport failures into `FetchError`

use crate::config::UserAgentConfig;
use crate::response::Response;
use crate::FetchError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// User agent used when no `[user-agent]` section is configured
pub const DEFAULT_USER_AGENT: &str = concat!("response-checker/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration, or `None` for the default identity
///
/// # Example
///
/// ```no_run
/// use response_checker::config::UserAgentConfig;
/// use response_checker::response::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "SiteAudit".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(Some(&config)).unwrap();
/// ```
pub fn build_http_client(config: Option<&UserAgentConfig>) -> Result<Client, reqwest::Error> {
    // Format: Name/Version (+ContactURL; ContactEmail)
    let user_agent = match config {
        Some(config) => format!(
            "{}/{} (+{}; {})",
            config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
        ),
        None => DEFAULT_USER_AGENT.to_string(),
    };

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and materializes the full response
///
/// Any HTTP status is a successful fetch; only transport problems are errors.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The absolute http(s) URL to fetch
///
/// # Returns
///
/// * `Ok(Response)` - Status, headers and body as received
/// * `Err(FetchError)` - The URL was invalid or the request failed
pub async fn fetch(client: &Client, url: &str) -> Result<Response, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status().as_u16();
    let headers = response.headers().clone();
    tracing::debug!("Fetched {} ({})", url, status);

    let body = response
        .text()
        .await
        .map_err(|e| classify_error(url, e))?;

    Ok(Response::from_parts(status, headers, body))
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
