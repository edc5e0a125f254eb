//! Sentiment labelling of article summaries.
//!
//! The model itself sits behind [`SentimentModel`], which returns raw labels
//! and may fail. [`SentimentClassifier`] wraps a model and never fails: it
//! maps labels onto [`Sentiment`] and degrades to `unknown`.

pub mod classifier;

pub use classifier::{ClassifyError, InferenceClassifier};

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::entities::Sentiment;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Raw top label for `text`, e.g. `LABEL_0`.
    async fn predict(&self, text: &str) -> Result<String, ClassifyError>;
}

#[derive(Clone)]
pub struct SentimentClassifier {
    model: Arc<dyn SentimentModel>,
}

impl SentimentClassifier {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self { model }
    }

    pub async fn classify(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::Unknown;
        }

        match self.model.predict(text).await {
            Ok(label) => {
                let sentiment = Sentiment::from_label(&label);
                if sentiment == Sentiment::Unknown {
                    warn!(%label, "unmapped sentiment label");
                }
                sentiment
            }
            Err(e) => {
                warn!(error = %e, "classification degraded to unknown");
                Sentiment::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn classifier_returning(result: Result<&'static str, ClassifyError>) -> SentimentClassifier {
        let mut model = MockSentimentModel::new();
        let mut result = Some(result);
        model
            .expect_predict()
            .times(1)
            .returning(move |_| match result.take() {
                Some(Ok(label)) => Ok(label.to_string()),
                Some(Err(e)) => Err(e),
                None => Err(ClassifyError::EmptyPrediction),
            });
        SentimentClassifier::new(Arc::new(model))
    }

    #[tokio::test]
    async fn test_known_labels() {
        for (label, expected) in [
            ("LABEL_0", Sentiment::Positive),
            ("LABEL_1", Sentiment::Neutral),
            ("LABEL_2", Sentiment::Negative),
        ] {
            let classifier = classifier_returning(Ok(label));
            assert_eq!(classifier.classify("Harga beras turun.").await, expected);
        }
    }

    #[tokio::test]
    async fn test_unmapped_label_is_unknown() {
        let classifier = classifier_returning(Ok("LABEL_7"));
        assert_eq!(classifier.classify("Harga beras turun.").await, Sentiment::Unknown);
    }

    #[tokio::test]
    async fn test_model_error_is_unknown() {
        let classifier = classifier_returning(Err(ClassifyError::EmptyPrediction));
        assert_eq!(classifier.classify("Harga beras turun.").await, Sentiment::Unknown);
    }

    #[tokio::test]
    async fn test_empty_text_skips_model() {
        let mut model = MockSentimentModel::new();
        model.expect_predict().never();
        let classifier = SentimentClassifier::new(Arc::new(model));

        assert_eq!(classifier.classify("").await, Sentiment::Unknown);
        assert_eq!(classifier.classify("   \n").await, Sentiment::Unknown);
    }

    #[tokio::test]
    async fn test_text_passed_through() {
        let mut model = MockSentimentModel::new();
        model
            .expect_predict()
            .with(eq("Banjir surut."))
            .times(1)
            .returning(|_| Ok("LABEL_0".to_string()));
        let classifier = SentimentClassifier::new(Arc::new(model));

        assert_eq!(classifier.classify("Banjir surut.").await, Sentiment::Positive);
    }
}
