//! Day-by-day news ingestion.

pub mod errors;
pub mod model;
pub mod service;


pub use errors::CandidateError;
pub use model::{CandidateFailure, IngestReport, IngestRequest};
pub use service::IngestService;
