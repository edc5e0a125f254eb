use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

use crate::fetcher::FetchError;

static SPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").unwrap());
static NEWLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Structured fields recovered from one news page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedArticle {
    /// URL after redirects.
    pub url: Url,
    pub title: String,
    pub text: String,
    pub summary: String,
    pub publish_date: Option<DateTime<Utc>>,
    pub keywords: Vec<String>,
}

#[derive(Debug)]
pub struct ReadabilityResult {
    pub title: String,
    pub text: String,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no readable content")]
    Unreadable,

    #[error("rejected: {0}")]
    Rejected(&'static str),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("parse error: {0}")]
    Parse(String),
}

impl ExtractError {
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_transient(),
            _ => false,
        }
    }
}

/// A candidate URL that could not be turned into an article.
#[derive(Error, Debug)]
#[error("extraction failed for {url}: {source}")]
pub struct ExtractionFailed {
    pub url: String,
    #[source]
    pub source: ExtractError,
}

impl ExtractionFailed {
    pub fn new(url: impl Into<String>, source: impl Into<ExtractError>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}

pub fn normalize_whitespace(text: &str) -> String {
    let text = text.trim();
    let spaced = SPACE_REGEX.replace_all(text, " ");
    let collapsed = NEWLINE_REGEX.replace_all(&spaced, "\n\n");
    collapsed
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        let text = "  Hujan   deras  \n\n\n  sejak pagi  ";
        assert_eq!(normalize_whitespace(text), "Hujan deras\n\nsejak pagi");
    }

    #[test]
    fn test_normalize_non_breaking_spaces() {
        let text = "Jakarta\u{a0}\u{a0}Utara";
        assert_eq!(normalize_whitespace(text), "Jakarta Utara");
    }

    #[test]
    fn test_extraction_failed_display() {
        let failed = ExtractionFailed::new("https://example.com/a", ExtractError::MissingField("title"));
        assert_eq!(
            failed.to_string(),
            "extraction failed for https://example.com/a: missing required field 'title'"
        );
        assert!(!failed.source.is_transient());
    }
}
