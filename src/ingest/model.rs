use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::ArticleRecord;

/// One ingestion run over the half-open day range `[start_date, end_date)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRequest {
    pub query: String,
    pub limit_per_day: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Username that triggered the run, if any.
    pub requested_by: Option<String>,
}

/// A candidate that did not make it into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CandidateFailure {
    pub url: String,
    pub reason: String,
    /// Whether retrying the same URL later could succeed.
    pub transient: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct IngestReport {
    /// Stored records, in day order then provider order.
    pub stored: Vec<ArticleRecord>,
    pub failures: Vec<CandidateFailure>,
    /// Days for which the search provider could not be reached.
    pub unavailable_days: Vec<NaiveDate>,
    /// Days whose candidates were all handled; a day cut short by
    /// cancellation is not counted.
    pub days_processed: u32,
    pub cancelled: bool,
}
