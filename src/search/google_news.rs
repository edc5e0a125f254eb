use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, instrument};

use crate::config::NewsConfig;
use crate::fetcher::Fetcher;
use crate::search::{NewsCandidate, NewsSearch, SearchError, feed};

/// Google News RSS search for a single locale.
#[derive(Clone)]
pub struct GoogleNewsClient {
    fetcher: Fetcher,
    base_url: String,
    language: String,
    country: String,
}

impl GoogleNewsClient {
    pub fn new(fetcher: Fetcher, config: &NewsConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            country: config.country.clone(),
        }
    }

    /// Search URL restricted to stories published on `day`.
    pub fn search_url(&self, query: &str, day: NaiveDate) -> Result<String, SearchError> {
        let next = day
            .checked_add_days(Days::new(1))
            .ok_or_else(|| SearchError::InvalidUrl(format!("no day after {day}")))?;
        let q = format!("{query} after:{day} before:{next}");
        let encoded = utf8_percent_encode(&q, NON_ALPHANUMERIC);

        Ok(format!(
            "{}/rss/search?q={}&hl={}&gl={}&ceid={}:{}",
            self.base_url, encoded, self.language, self.country, self.country, self.language
        ))
    }
}

#[async_trait]
impl NewsSearch for GoogleNewsClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        day: NaiveDate,
        limit: usize,
    ) -> Result<Vec<NewsCandidate>, SearchError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let url = self.search_url(query, day)?;
        let page = self.fetcher.fetch_feed(&url).await?;
        let candidates = feed::parse_feed(&page.body_utf8, limit)?;

        debug!(count = candidates.len(), "search feed parsed");
        Ok(candidates)
    }
}
