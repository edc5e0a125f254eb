use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use futures::{StreamExt, stream};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::config::Config;
use crate::entities::{Article, ArticleRecord, NewArticle, Sentiment};
use crate::extractor::{ArticleExtractor, ExtractedArticle, WebExtractor};
use crate::fetcher::Fetcher;
use crate::ingest::errors::CandidateError;
use crate::ingest::model::{IngestReport, IngestRequest};
use crate::repositories::ArticleRepositoryTrait;
use crate::search::{GoogleNewsClient, NewsCandidate, NewsSearch};
use crate::sentiment::{InferenceClassifier, SentimentClassifier};

pub const DEFAULT_CONCURRENCY: usize = 4;

/// Drives search, extraction, classification and storage over a date range.
pub struct IngestService {
    search: Arc<dyn NewsSearch>,
    extractor: Arc<dyn ArticleExtractor>,
    classifier: SentimentClassifier,
    store: Arc<dyn ArticleRepositoryTrait>,
    concurrency: usize,
}

impl IngestService {
    pub fn new(
        search: Arc<dyn NewsSearch>,
        extractor: Arc<dyn ArticleExtractor>,
        classifier: SentimentClassifier,
        store: Arc<dyn ArticleRepositoryTrait>,
    ) -> Self {
        Self {
            search,
            extractor,
            classifier,
            store,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Production wiring: Google News search, web extraction and the remote
    /// sentiment model, all persisting into `store`.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn ArticleRepositoryTrait>,
    ) -> anyhow::Result<Self> {
        let fetcher = Fetcher::new(&config.news().user_agent)?;
        let search = GoogleNewsClient::new(fetcher.clone(), config.news());
        let extractor = WebExtractor::new(fetcher);
        let model = InferenceClassifier::new(config.classifier())?;

        Ok(Self::new(
            Arc::new(search),
            Arc::new(extractor),
            SentimentClassifier::new(Arc::new(model)),
            store,
        )
        .with_concurrency(config.ingest_concurrency()))
    }

    /// Number of candidates of one day processed at the same time.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Ingest every day in `[start_date, end_date)`. Individual candidate
    /// failures are collected in the report; records stored before a
    /// cancellation are kept.
    pub async fn ingest(&self, request: &IngestRequest, cancel: &CancellationToken) -> IngestReport {
        let mut report = IngestReport::default();
        let seen = Mutex::new(HashSet::new());
        let mut day = request.start_date;

        while day < request.end_date {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let span = info_span!("ingest_day", %day);
            self.ingest_day(request, day, &seen, cancel, &mut report)
                .instrument(span)
                .await;
            if report.cancelled {
                break;
            }
            report.days_processed += 1;

            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        info!(
            query = %request.query,
            stored = report.stored.len(),
            failed = report.failures.len(),
            unavailable_days = report.unavailable_days.len(),
            cancelled = report.cancelled,
            "ingestion finished"
        );
        report
    }

    async fn ingest_day(
        &self,
        request: &IngestRequest,
        day: NaiveDate,
        seen: &Mutex<HashSet<String>>,
        cancel: &CancellationToken,
        report: &mut IngestReport,
    ) {
        if request.limit_per_day == 0 {
            debug!("no candidates requested");
            return;
        }
        let limit = request.limit_per_day as usize;

        let mut candidates = match self.search.search(&request.query, day, limit).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "search unavailable, skipping day");
                report.unavailable_days.push(day);
                return;
            }
        };
        candidates.truncate(limit);
        debug!(count = candidates.len(), "candidates found");

        let mut work = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let rejected = if candidate.url.trim().is_empty() {
                Some(CandidateError::MissingUrl)
            } else if !mark_seen(seen, &candidate.url) {
                Some(CandidateError::Duplicate)
            } else {
                None
            };
            match rejected {
                Some(e) => {
                    warn!(url = %candidate.url, error = %e, "candidate skipped");
                    report.failures.push(e.into_failure(&candidate.url));
                }
                None => work.push(candidate),
            }
        }

        let requested_by = request.requested_by.as_deref();
        let outcomes: Vec<_> = stream::iter(work)
            .map(|candidate| async move {
                if cancel.is_cancelled() {
                    return None;
                }
                let url = candidate.url.clone();
                Some((url, self.process_candidate(candidate, seen, requested_by).await))
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                Some((_, Ok(record))) => {
                    info!(
                        id = %record.id,
                        url = %record.url,
                        sentiment = record.article.sentiment.as_str(),
                        "article stored"
                    );
                    report.stored.push(record);
                }
                Some((url, Err(e))) => {
                    warn!(%url, error = %e, "candidate dropped");
                    report.failures.push(e.into_failure(&url));
                }
                None => report.cancelled = true,
            }
        }
    }

    async fn process_candidate(
        &self,
        candidate: NewsCandidate,
        seen: &Mutex<HashSet<String>>,
        requested_by: Option<&str>,
    ) -> Result<ArticleRecord, CandidateError> {
        let extracted = self.extractor.extract(&candidate.url).await?;
        // Distinct feed links can redirect to the same publisher page
        if extracted.url.as_str() != candidate.url && !mark_seen(seen, extracted.url.as_str()) {
            return Err(CandidateError::Duplicate);
        }
        let sentiment = self.classifier.classify(&extracted.summary).await;

        let article = assemble(candidate, extracted, sentiment, requested_by);
        self.store
            .insert(&article)
            .await
            .map_err(|source| CandidateError::Persistence {
                url: article.url.clone(),
                source,
            })
    }
}

/// Records `url` for this run; false when it was already there.
fn mark_seen(seen: &Mutex<HashSet<String>>, url: &str) -> bool {
    seen.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(url.to_string())
}

fn assemble(
    candidate: NewsCandidate,
    extracted: ExtractedArticle,
    sentiment: Sentiment,
    requested_by: Option<&str>,
) -> NewArticle {
    NewArticle {
        title: candidate.title,
        description: candidate.description,
        published_date: candidate.published_date.or(extracted.publish_date),
        url: extracted.url.to_string(),
        publisher: candidate.publisher,
        article: Article {
            title: extracted.title,
            text: extracted.text,
            summary: extracted.summary,
            keywords: extracted.keywords,
            sentiment,
        },
        requested_by: requested_by.map(str::to_string),
    }
}
