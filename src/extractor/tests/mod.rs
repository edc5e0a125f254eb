use chrono::{TimeZone, Utc};
use std::fs;
use url::Url;

use crate::extractor::{ExtractError, language, parse};
use crate::fetcher::PageResponse;

#[test]
fn test_parse_news_article() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "https://kabarkota.example/metro/banjir");
    let article = parse(&response).expect("article should be extracted");

    assert!(article.title.contains("Banjir Rendam Jakarta Timur"));
    assert!(article.text.contains("Kampung Melayu"));
    assert!(!article.text.contains("window.dataLayer"));
    assert_eq!(
        article.publish_date,
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap())
    );
    assert!(!article.summary.is_empty());
    assert!(article.summary.lines().count() <= 5);
    assert!(article.keywords.iter().any(|k| k == "banjir"));
    assert!(article.keywords.len() <= 10);
    assert_eq!(article.url.as_str(), "https://kabarkota.example/metro/banjir");
}

#[test]
fn test_reject_consent_wall() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/consent.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "https://consent.example/wall");
    let result = parse(&response);

    assert!(matches!(result, Err(ExtractError::Rejected(_))));
}

#[test]
fn test_empty_page_is_unusable() {
    let response = create_test_response(
        "<html><head></head><body></body></html>".to_string(),
        "https://example.com/empty",
    );

    assert!(parse(&response).is_err());
}

#[test]
fn test_missing_title() {
    let html = format!(
        r#"<!DOCTYPE html><html><head></head><body><div class="content"><p>{}</p></div></body></html>"#,
        "Warga Jakarta Timur mulai membersihkan rumah mereka setelah air surut pada sore hari. ".repeat(8)
    );

    let response = create_test_response(html, "https://example.com/untitled");
    let result = parse(&response);

    assert!(matches!(result, Err(ExtractError::MissingField("title"))));
}

#[test]
fn test_minimal_valid_content() {
    let html = format!(
        r#"<!DOCTYPE html><html><head><title>Valid Article</title></head><body><article><h1>Valid Article</h1><p>{}</p></article></body></html>"#,
        "This is a valid article with enough content to pass the minimum requirements for extraction. ".repeat(20)
    );

    let response = create_test_response(html, "https://example.com/valid");
    let article = parse(&response).expect("article should be extracted");

    assert_eq!(article.title, "Valid Article");
    assert!(article.text.len() > 250);
    assert_eq!(language::detect_language(&article.text), Some("en".to_string()));
    assert_eq!(article.publish_date, None);
}

#[test]
fn test_malformed_html() {
    let html =
        "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content".to_string();

    let response = create_test_response(html, "https://example.com/broken");

    // Too little text to be an article, but must not panic
    assert!(parse(&response).is_err());
}

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        body_utf8: html,
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_parse_never_panics(
            html in ".*",
            url in "https://[a-z]+\\.com/.*"
        ) {
            let response = create_test_response(html, &url);
            let _ = parse(&response);
        }

        #[test]
        fn test_summary_lines_come_from_text(
            html in ".*",
        ) {
            let response = create_test_response(html, "https://example.com");
            if let Ok(article) = parse(&response) {
                for line in article.summary.lines() {
                    prop_assert!(article.text.contains(line));
                }
            }
        }
    }
}
