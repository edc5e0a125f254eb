use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::ArticleRecord;
use crate::ingest::CandidateFailure;

pub const DEFAULT_LIMIT_PER_DAY: u32 = 20;
pub const MAX_LIMIT_PER_DAY: u32 = 100;
pub const MAX_QUERY_LEN: usize = 256;
pub const MAX_PAGE_SIZE: i64 = 1000;

fn default_limit_per_day() -> u32 {
    DEFAULT_LIMIT_PER_DAY
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"query": "banjir", "limit_per_day": 2, "start_date": "2024-01-01", "end_date": "2024-01-03"}))]
pub struct FetchNewsRequest {
    pub query: String,
    #[serde(default = "default_limit_per_day")]
    pub limit_per_day: u32,
    pub start_date: NaiveDate,
    /// Exclusive. Defaults to today (UTC).
    pub end_date: Option<NaiveDate>,
}

impl FetchNewsRequest {
    pub fn validate(&self) -> Result<(), String> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err("Query cannot be empty".to_string());
        }
        if query.chars().count() > MAX_QUERY_LEN {
            return Err("Query too long".to_string());
        }
        if !(1..=MAX_LIMIT_PER_DAY).contains(&self.limit_per_day) {
            return Err(format!(
                "limit_per_day must be between 1 and {MAX_LIMIT_PER_DAY}"
            ));
        }
        Ok(())
    }

    pub fn end_date_or_today(&self) -> NaiveDate {
        self.end_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FetchNewsResponse {
    pub received_at: DateTime<Utc>,
    pub result: Vec<ArticleRecord>,
    /// Candidates that were found but not stored.
    pub skipped: Vec<CandidateFailure>,
    /// Days for which the search provider was unreachable.
    pub unavailable_days: Vec<NaiveDate>,
    /// True when the run hit its time limit before finishing.
    pub cancelled: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNewsQuery {
    /// Page size; all records when absent.
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListNewsQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.limit
            && !(1..=MAX_PAGE_SIZE).contains(&limit)
        {
            return Err(format!("limit must be between 1 and {MAX_PAGE_SIZE}"));
        }
        if self.offset.is_some_and(|offset| offset < 0) {
            return Err("offset cannot be negative".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListNewsResponse {
    pub received_at: DateTime<Utc>,
    pub result: Vec<ArticleRecord>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewsDetailQuery {
    /// Record id (UUID).
    pub news_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NewsDetailResponse {
    pub received_at: DateTime<Utc>,
    pub result: ArticleRecord,
}
