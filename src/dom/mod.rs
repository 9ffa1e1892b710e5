//! DOM access for content checks
//!
//! This module mediates between raw response bodies and structured traversal:
//! - Deciding whether a response is HTML at all
//! - Parsing the body into a queryable `Document`
//! - Isolating parse failures so checks never abort on malformed markup
//!
//! Every call parses a fresh document owned by the caller. Nothing is cached
//! between calls, so checks can run concurrently on different responses.

use crate::response::Response;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Errors raised while parsing or querying a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("HTML parse error: {message} ({count} error(s) recorded)")]
    Malformed { count: usize, message: String },

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// How strictly a body must parse before a document is handed out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Accept anything the HTML5 tree builder can recover from
    #[default]
    Lenient,

    /// Reject bodies for which the tree builder recorded any parse error
    Strict,
}

/// Shared DOM-access helper used by the content checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomAccess {
    mode: ParseMode,
}

impl DomAccess {
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }

    pub fn strict() -> Self {
        Self::new(ParseMode::Strict)
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Attempts to produce a document for the given response
    ///
    /// # Returns
    ///
    /// * `Some(Document)` - The response is non-empty HTML and parsed
    /// * `None` - Not HTML, empty body, or the parse failed (logged)
    pub fn try_parse(&self, url: &str, response: &Response, check_name: &str) -> Option<Document> {
        if !is_html(response) {
            tracing::debug!("{}: skipping non-HTML response for {}", check_name, url);
            return None;
        }

        if response.body().is_empty() {
            tracing::debug!("{}: skipping empty body for {}", check_name, url);
            return None;
        }

        match self.parse(response.body()) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!(
                    check = check_name,
                    url = url,
                    "DOM parsing failed, check will be skipped: {}",
                    e
                );
                None
            }
        }
    }

    /// Parses a body according to this helper's mode
    pub fn parse(&self, body: &str) -> Result<Document, DomError> {
        let html = Html::parse_document(body);

        if self.mode == ParseMode::Strict && !html.errors.is_empty() {
            return Err(DomError::Malformed {
                count: html.errors.len(),
                message: html.errors[0].to_string(),
            });
        }

        Ok(Document { html })
    }
}

/// Returns true if the response's Content-Type mentions `text/html`
pub fn is_html(response: &Response) -> bool {
    response
        .header("Content-Type")
        .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
        .unwrap_or(false)
}

/// A parsed HTML document, queryable by CSS selector
pub struct Document {
    html: Html,
}

impl Document {
    /// Returns every element matching `selector`, in document order
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'_>>, DomError> {
        let parsed = Selector::parse(selector).map_err(|e| DomError::InvalidSelector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;

        Ok(self.html.select(&parsed).map(Element).collect())
    }

    /// Number of elements matching `selector`
    pub fn count(&self, selector: &str) -> Result<usize, DomError> {
        self.select(selector).map(|elements| elements.len())
    }
}

/// Handle to one element of a `Document`
#[derive(Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// Concatenated text of all descendant text nodes
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.0.value().attr(name).is_some()
    }

    pub fn tag_name(&self) -> &'a str {
        self.0.value().name()
    }
}
