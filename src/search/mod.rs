//! News search providers: given a query and a day, find candidate stories.

pub mod errors;
pub mod feed;
pub mod google_news;

pub use errors::SearchError;
pub use google_news::GoogleNewsClient;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::Publisher;

/// A search hit. Not persisted as-is; it is merged with the extracted
/// article before storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsCandidate {
    pub title: String,
    pub url: String,
    pub publisher: Option<Publisher>,
    pub published_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// At most `limit` candidates published on `day`.
    async fn search(
        &self,
        query: &str,
        day: NaiveDate,
        limit: usize,
    ) -> Result<Vec<NewsCandidate>, SearchError>;
}
