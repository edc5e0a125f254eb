use thiserror::Error;

use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid search url: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed feed: {0}")]
    Xml(#[from] quick_xml::Error),
}
