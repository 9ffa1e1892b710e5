//! Integration tests for fetch-and-audit
//!
//! These tests use wiremock to serve pages and run the full
//! fetch, check and report cycle end-to-end.

use response_checker::audit::audit_urls;
use response_checker::config::{Config, UserAgentConfig};
use response_checker::dom::is_html;
use response_checker::output::{AuditSummary, JsonReport, ReportWriter};
use response_checker::response::{build_http_client, fetch};
use response_checker::{Auditor, FindingLevel};
use serde_json::Value;
use std::net::TcpListener;
use std::sync::Arc;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Field Notes on Urban Beekeeping</title>
  <meta name="description" content="What two seasons of rooftop hives taught us about forage, swarm control and keeping the neighbours on side.">
</head>
<body>
  <h1>Field Notes on Urban Beekeeping</h1>
  <img src="/hive.jpg" alt="Two hives on a rooftop">
</body>
</html>"#;

async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ARTICLE, "text/html; charset=utf-8"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/article"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503).set_body_raw("<h1>Down</h1>", "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_materializes_response() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let client = build_http_client(None).unwrap();
    let response = fetch(&client, &format!("{}/article", server.uri())).await.unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.successful());
    assert!(response
        .header("content-type")
        .is_some_and(|ct| ct.starts_with("text/html")));
    assert!(is_html(&response));
    assert!(response.body().contains("Urban Beekeeping"));
}

#[tokio::test]
async fn test_redirects_are_not_followed() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let client = build_http_client(None).unwrap();
    let response = fetch(&client, &format!("{}/old", server.uri())).await.unwrap();

    assert_eq!(response.status(), 302);
    assert_eq!(response.header("Location"), Some("/article"));
}

#[tokio::test]
async fn test_audit_urls_end_to_end() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let base = server.uri();
    let urls = vec![
        format!("{}/article", base),
        format!("{}/old", base),
        format!("{}/api/status", base),
        format!("{}/broken", base),
    ];

    let client = build_http_client(None).unwrap();
    let reports = audit_urls(Arc::new(Auditor::with_default_checks()), client, urls.clone(), 2).await;

    assert_eq!(reports.len(), 4);
    for (report, url) in reports.iter().zip(&urls) {
        assert_eq!(&report.url, url);
        assert!(report.is_complete());
    }

    // Clean article
    assert!(reports[0]
        .findings
        .iter()
        .all(|f| f.level() == FindingLevel::Success));
    assert_eq!(reports[0].findings.len(), 5);

    // Redirect is observed, not followed
    let redirect: Vec<_> = reports[1].findings_for("StatusCodeCheck").collect();
    assert_eq!(redirect[0].level(), FindingLevel::Warning);
    assert_eq!(redirect[0].message(), "Page redirected (302)");
    assert_eq!(
        redirect[0].detail("redirect_location").and_then(Value::as_str),
        Some("/article")
    );

    // JSON body: status passes, document checks are skipped
    assert_eq!(reports[2].count(FindingLevel::Success), 1);
    assert_eq!(reports[2].count(FindingLevel::Error), 3);

    // Server error
    let status: Vec<_> = reports[3].findings_for("StatusCodeCheck").collect();
    assert_eq!(status[0].message(), "Server error response (503)");
    assert_eq!(status[0].level(), FindingLevel::Error);

    let summary = AuditSummary::from_reports(&reports);
    assert_eq!(summary.total_pages, 4);
    assert_eq!(summary.fetch_failures, 0);
    assert!(summary.has_failures(&[FindingLevel::Error]));
}

#[tokio::test]
async fn test_unreachable_host_is_fetch_failure() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let dead = format!("http://127.0.0.1:{}/article", port);

    let client = build_http_client(None).unwrap();
    let reports = audit_urls(Arc::new(Auditor::default()), client, vec![dead], 1).await;

    assert_eq!(reports.len(), 1);
    assert!(reports[0].fetch_error.is_some());
    assert!(reports[0].findings.is_empty());
    assert!(AuditSummary::from_reports(&reports).has_failures(&[]));
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .and(header_regex("user-agent", r"^SiteAudit/2\.0 \(\+https://example\.com/bot; ops@example\.com\)$"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ARTICLE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.user_agent = Some(UserAgentConfig {
        crawler_name: "SiteAudit".to_string(),
        crawler_version: "2.0".to_string(),
        contact_url: "https://example.com/bot".to_string(),
        contact_email: "ops@example.com".to_string(),
    });

    let client = build_http_client(config.user_agent.as_ref()).unwrap();
    let reports = audit_urls(
        Arc::new(config.build_auditor()),
        client,
        vec![format!("{}/article", server.uri())],
        config.audit.concurrency,
    )
    .await;

    assert_eq!(reports[0].count(FindingLevel::Success), 5);
}

#[tokio::test]
async fn test_json_report_of_live_audit() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let client = build_http_client(None).unwrap();
    let reports = audit_urls(
        Arc::new(Auditor::with_default_checks()),
        client,
        vec![format!("{}/old", server.uri())],
        1,
    )
    .await;

    let mut buffer = Vec::new();
    JsonReport.write_reports(&reports, &mut buffer).unwrap();
    let lines: Vec<Value> = String::from_utf8(buffer)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // Status finding plus three skipped document checks
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["check_name"], "StatusCodeCheck");
    assert_eq!(lines[0]["details"]["status_code"], 302);
}
