pub mod language;
pub mod metadata;
pub mod model;
pub mod nlp;
pub mod reader;
pub mod reject;

#[cfg(test)]
mod tests;

pub use model::{ExtractError, ExtractedArticle, ExtractionFailed};

use async_trait::async_trait;
use scraper::Html;
use tracing::{debug, instrument};

use crate::fetcher::{Fetcher, PageResponse};

/// Turns a news URL into structured article fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, ExtractionFailed>;
}

/// Downloads the page and runs readability, metadata and NLP passes over it.
#[derive(Clone)]
pub struct WebExtractor {
    fetcher: Fetcher,
}

impl WebExtractor {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl ArticleExtractor for WebExtractor {
    #[instrument(skip(self))]
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, ExtractionFailed> {
        let page = self
            .fetcher
            .fetch_page(url)
            .await
            .map_err(|e| ExtractionFailed::new(url, e))?;

        // HTML parsing is CPU bound
        let article = tokio::task::spawn_blocking(move || parse(&page))
            .await
            .map_err(|e| ExtractionFailed::new(url, ExtractError::Parse(e.to_string())))?
            .map_err(|e| ExtractionFailed::new(url, e))?;

        debug!(
            title = %article.title,
            keywords = article.keywords.len(),
            "article extracted"
        );
        Ok(article)
    }
}

/// Extract an article from an already downloaded page.
pub fn parse(page: &PageResponse) -> Result<ExtractedArticle, ExtractError> {
    let readable =
        reader::extract(&page.body_utf8, &page.url_final).ok_or(ExtractError::Unreadable)?;

    let title = normalize_title(&readable.title);
    let text = model::normalize_whitespace(&readable.text);

    if let Some(reason) = reject::rejection_reason(&title, &text) {
        return Err(ExtractError::Rejected(reason));
    }
    if title.is_empty() {
        return Err(ExtractError::MissingField("title"));
    }

    let language = language::detect_language(&text);
    debug!(language = ?language, "language detected");
    let publish_date = metadata::publish_date(&Html::parse_document(&page.body_utf8));

    let summary = nlp::summarize(&title, &text, language.as_deref(), nlp::SUMMARY_SENTENCES);
    if summary.is_empty() {
        return Err(ExtractError::MissingField("summary"));
    }
    let keywords = nlp::keywords(&format!("{title}\n{text}"), language.as_deref(), nlp::MAX_KEYWORDS);

    Ok(ExtractedArticle {
        url: page.url_final.clone(),
        title,
        text,
        summary,
        publish_date,
        keywords,
    })
}

fn normalize_title(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
