use thiserror::Error;

use crate::extractor::ExtractionFailed;
use crate::ingest::model::CandidateFailure;

/// Why a single candidate was skipped. Never aborts the run.
#[derive(Error, Debug)]
pub enum CandidateError {
    #[error("candidate has no url")]
    MissingUrl,

    #[error("url already processed in this run")]
    Duplicate,

    #[error(transparent)]
    Extraction(#[from] ExtractionFailed),

    #[error("failed to store {url}: {source}")]
    Persistence {
        url: String,
        #[source]
        source: anyhow::Error,
    },
}

impl CandidateError {
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Extraction(e) => e.source.is_transient(),
            Self::Persistence { .. } => true,
            Self::MissingUrl | Self::Duplicate => false,
        }
    }

    pub fn into_failure(self, url: &str) -> CandidateFailure {
        CandidateFailure {
            url: url.to_string(),
            transient: self.is_transient(),
            reason: self.to_string(),
        }
    }
}
