use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::ClassifierConfig;
use crate::sentiment::SentimentModel;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("classifier request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("classifier returned status {0}")]
    Status(StatusCode),

    #[error("classifier response parse error: {0}")]
    Decode(String),

    #[error("classifier returned no labels")]
    EmptyPrediction,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
    truncate: bool,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

/// Text-classification servers answer either with one list of labels or
/// with one list per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Flat(Vec<Prediction>),
    Nested(Vec<Vec<Prediction>>),
}

impl PredictResponse {
    fn top_label(self) -> Option<String> {
        let predictions = match self {
            Self::Flat(predictions) => predictions,
            Self::Nested(batches) => batches.into_iter().next()?,
        };
        predictions
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|p| p.label)
    }
}

/// Client for a text-classification inference endpoint serving the
/// sentiment model.
pub struct InferenceClassifier {
    client: reqwest::Client,
    url: String,
    model: String,
    token: Option<String>,
}

impl InferenceClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            model: config.model.clone(),
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl SentimentModel for InferenceClassifier {
    #[instrument(skip(self, text), fields(model = %self.model, chars = text.len()))]
    async fn predict(&self, text: &str) -> Result<String, ClassifyError> {
        let mut request = self.client.post(&self.url).json(&PredictRequest {
            inputs: text,
            truncate: true,
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ClassifyError::Status(response.status()));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Decode(e.to_string()))?;
        let label = body.top_label().ok_or(ClassifyError::EmptyPrediction)?;

        debug!(%label, "prediction received");
        Ok(label)
    }
}
