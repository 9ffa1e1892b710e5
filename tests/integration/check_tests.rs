//! Integration tests for the built-in checks
//!
//! These run complete pages through an `Auditor`, the way a caller embeds
//! the library, and verify the findings each check contributes.

use response_checker::checks::{
    Check, ElementCheckConfig, H1Check, ImageAltTextCheck, StatusCodeCheck, TitleCheck,
    SKIPPED_MESSAGE,
};
use response_checker::config::parse_config;
use response_checker::{AuditError, Auditor, Finding, FindingLevel, Response};
use serde_json::json;

const URL: &str = "https://shop.example.com/products/lamp";

const GOOD_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Brass Desk Lamp | Example Shop</title>
  <meta name="description" content="A hand-finished brass desk lamp with a weighted base, adjustable arm and warm LED bulb. Ships free within three business days.">
</head>
<body>
  <h1>Brass Desk Lamp with Adjustable Arm</h1>
  <img src="/img/lamp-front.jpg" alt="Lamp seen from the front">
  <img src="/img/lamp-side.jpg" alt="Lamp seen from the side">
</body>
</html>"#;

fn levels_for(findings: &[Finding], check: &str) -> Vec<FindingLevel> {
    findings
        .iter()
        .filter(|f| f.check_name() == check)
        .map(|f| f.level())
        .collect()
}

#[test]
fn test_well_formed_page_passes_every_check() {
    let report = Auditor::with_default_checks().audit(URL, &Response::html(200, GOOD_PAGE));

    assert!(report.is_complete());
    assert_eq!(report.findings.len(), 5);
    assert!(report
        .findings
        .iter()
        .all(|f| f.level() == FindingLevel::Success && f.url() == URL));

    let names: Vec<&str> = report.findings.iter().map(|f| f.check_name()).collect();
    assert_eq!(
        names,
        vec![
            "StatusCodeCheck",
            "TitleCheck",
            "MetaDescriptionCheck",
            "H1Check",
            "ImageAltTextCheck"
        ]
    );
}

#[test]
fn test_neglected_page_reports_each_defect() {
    let body = r#"<html><head><title>Lamp</title></head>
<body><h1></h1><h1>Second heading that is long enough</h1>
<img src="/a.jpg"><img alt="   " src="/b.jpg"><img alt="ok"></body></html>"#;
    let report = Auditor::with_default_checks().audit(URL, &Response::html(200, body));

    let title = levels_for(&report.findings, "TitleCheck");
    assert_eq!(title, vec![FindingLevel::Warning]);

    let meta: Vec<&Finding> = report.findings_for("MetaDescriptionCheck").collect();
    assert_eq!(meta.len(), 1);
    assert_eq!(meta[0].message(), "Missing <meta name=\"description\"> tag.");
    assert_eq!(meta[0].level(), FindingLevel::Error);

    // Multiple H1 is reported, and the first one is also evaluated
    let h1: Vec<&Finding> = report.findings_for("H1Check").collect();
    assert_eq!(h1.len(), 2);
    assert_eq!(h1[0].message(), "Multiple <h1> tags found.");
    assert_eq!(h1[0].detail("count"), Some(&json!(2)));
    assert_eq!(h1[1].detail("issue_type"), Some(&json!("empty")));

    let images: Vec<&Finding> = report.findings_for("ImageAltTextCheck").collect();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].message(), "Missing alt attribute.");
    assert_eq!(images[0].detail("src"), Some(&json!("/a.jpg")));
    assert_eq!(images[1].detail("type"), Some(&json!("empty")));
}

#[test]
fn test_non_html_response_skips_document_checks() {
    let response = Response::new(200)
        .with_header("Content-Type", "application/json")
        .with_body(r#"{"title": "not a page"}"#);
    let report = Auditor::with_default_checks().audit(URL, &response);

    assert_eq!(levels_for(&report.findings, "StatusCodeCheck"), vec![FindingLevel::Success]);
    for check in ["TitleCheck", "MetaDescriptionCheck", "H1Check"] {
        let findings: Vec<&Finding> = report.findings_for(check).collect();
        assert_eq!(findings.len(), 1, "{}", check);
        assert_eq!(findings[0].level(), FindingLevel::Error);
        assert_eq!(findings[0].message(), SKIPPED_MESSAGE);
        assert!(findings[0].configuration().is_some());
    }
    assert_eq!(report.findings_for("ImageAltTextCheck").count(), 0);
}

#[test]
fn test_redirect_carries_location() {
    let response = Response::new(301).with_header("Location", "https://shop.example.com/lamp");
    let findings = StatusCodeCheck::default().check(URL, &response);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].level(), FindingLevel::Warning);
    assert_eq!(findings[0].message(), "Page redirected (301)");
    assert_eq!(
        findings[0].detail("redirect_location"),
        Some(&json!("https://shop.example.com/lamp"))
    );
}

#[test]
fn test_configured_thresholds_flow_into_findings() {
    let config = parse_config(
        r#"
[checks]
enabled = ["title", "h1"]

[checks.title]
min-length = 3
max-length = 0

[checks.h1]
missing-level = "info"
"#,
    )
    .unwrap();
    let auditor = config.build_auditor();
    let page = Response::html(
        200,
        format!("<html><head><title>{}</title></head><body></body></html>", "T".repeat(300)),
    );
    let report = auditor.audit(URL, &page);

    let title: Vec<&Finding> = report.findings_for("TitleCheck").collect();
    assert_eq!(title.len(), 1);
    assert_eq!(title[0].level(), FindingLevel::Success);
    let snapshot = title[0].configuration().unwrap();
    assert_eq!(snapshot.get("min_length"), Some(&json!(3)));
    assert!(!snapshot.contains_key("max_length"));

    let h1: Vec<&Finding> = report.findings_for("H1Check").collect();
    assert_eq!(h1[0].level(), FindingLevel::Info);
    assert_eq!(h1[0].message(), "Missing <h1> tag.");
}

#[test]
fn test_strict_html_skips_malformed_pages() {
    let config = parse_config("[audit]\nstrict-html = true\n").unwrap();
    let auditor = config.build_auditor();
    let malformed = Response::html(200, "<html><head><title>Broken page title</title></head><body><h1>Heading</h2></p></body>");

    let report = auditor.audit(URL, &malformed);

    let title: Vec<&Finding> = report.findings_for("TitleCheck").collect();
    assert_eq!(title.len(), 1);
    assert_eq!(title[0].message(), SKIPPED_MESSAGE);
    assert_eq!(report.findings_for("ImageAltTextCheck").count(), 0);
}

#[test]
fn test_lenient_parsing_recovers_malformed_pages() {
    let malformed = Response::html(200, "<html><head><title>Broken but readable</title></head><body><h1>Heading</h2></p></body>");
    let findings = TitleCheck::default().check(URL, &malformed);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].level(), FindingLevel::Success);
}

#[test]
fn test_findings_are_fresh_per_call() {
    let check = H1Check::new(ElementCheckConfig::with_lengths(None, None));
    let first = check.check(URL, &Response::html(200, "<h1>First page</h1>"));
    let second = check.check("https://shop.example.com/other", &Response::html(200, "<p>no heading</p>"));

    assert_eq!(first[0].level(), FindingLevel::Success);
    assert_eq!(second[0].level(), FindingLevel::Error);
    assert_eq!(second[0].url(), "https://shop.example.com/other");
}

struct CanonicalLinkCheck;

impl Check for CanonicalLinkCheck {
    fn name(&self) -> &str {
        "CanonicalLinkCheck"
    }

    fn check(&self, url: &str, response: &Response) -> Vec<Finding> {
        if response.body().contains("rel=\"canonical\"") {
            vec![Finding::success("Canonical link present.", self.name(), url)]
        } else {
            vec![Finding::info("No canonical link.", self.name(), url)]
        }
    }
}

struct SilentFailureCheck;

impl Check for SilentFailureCheck {
    fn name(&self) -> &str {
        "SilentFailureCheck"
    }

    fn check(&self, _url: &str, _response: &Response) -> Vec<Finding> {
        vec![Finding::warning("Something odd.", self.name(), "")]
    }
}

#[test]
fn test_custom_checks_plug_into_auditor() {
    let auditor = Auditor::new()
        .with_check(CanonicalLinkCheck)
        .with_check(SilentFailureCheck)
        .with_check(ImageAltTextCheck::default());

    let report = auditor.audit(URL, &Response::html(200, GOOD_PAGE));

    assert_eq!(levels_for(&report.findings, "CanonicalLinkCheck"), vec![FindingLevel::Info]);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        &report.failures[0],
        AuditError::InvalidCheckResult { check, .. } if check == "SilentFailureCheck"
    ));
    assert!(report.failures[0].to_string().contains("SilentFailureCheck"));
    assert_eq!(levels_for(&report.findings, "ImageAltTextCheck"), vec![FindingLevel::Success]);
}
