use crate::fetcher::{
    errors::FetchError,
    pipeline::process_response,
    types::{PageKind, PageResponse},
};
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tracing::{debug, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const MAX_REDIRECTS: usize = 10;

/// HTTP client shared by the news search and the article extractor.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("id,en;q=0.8"),
        );

        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Unknown(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch an HTML document.
    pub async fn fetch_page(&self, url: &str) -> Result<PageResponse, FetchError> {
        self.fetch(url, PageKind::Html).await
    }

    /// Fetch an RSS/Atom feed.
    pub async fn fetch_feed(&self, url: &str) -> Result<PageResponse, FetchError> {
        self.fetch(url, PageKind::Feed).await
    }

    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str, kind: PageKind) -> Result<PageResponse, FetchError> {
        let parsed_url = url::Url::parse(url)?;

        let response = self
            .client
            .get(parsed_url)
            .header(header::ACCEPT, kind.accept_header())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                retriable: status.is_server_error() || status.as_u16() == 429,
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or(kind.assumed_content_type())
            .to_string();

        if !kind.accepts(&content_type) {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        // Content-Length may have been missing
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
        }

        debug!(
            status = %status,
            final_url = %final_url,
            bytes = body_bytes.len(),
            "fetched"
        );

        process_response(final_url, body_bytes, &content_type)
    }
}
