use std::sync::Arc;

use newsfeel::{
    config::ClassifierConfig,
    entities::Sentiment,
    sentiment::{ClassifyError, InferenceClassifier, SentimentClassifier, SentimentModel},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn config(server: &MockServer, token: Option<&str>) -> ClassifierConfig {
    ClassifierConfig {
        url: format!("{}/predict", server.uri()),
        token: token.map(str::to_string),
        ..ClassifierConfig::default()
    }
}

#[tokio::test]
async fn test_predict_returns_top_label() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_partial_json(json!({"inputs": "Banjir merendam ratusan rumah."})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"label": "LABEL_0", "score": 0.05},
            {"label": "LABEL_1", "score": 0.15},
            {"label": "LABEL_2", "score": 0.80}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let model = InferenceClassifier::new(&config(&server, None)).unwrap();
    let label = model.predict("Banjir merendam ratusan rumah.").await.unwrap();

    assert_eq!(label, "LABEL_2");
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header("authorization", "Bearer rahasia"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([[{"label": "LABEL_0", "score": 0.9}]])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let model = InferenceClassifier::new(&config(&server, Some("rahasia"))).unwrap();
    assert_eq!(model.predict("Warga senang").await.unwrap(), "LABEL_0");
}

#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let model = InferenceClassifier::new(&config(&server, None)).unwrap();
    let result = model.predict("teks").await;

    assert!(matches!(result, Err(ClassifyError::Status(status)) if status.as_u16() == 503));
}

#[tokio::test]
async fn test_classifier_degrades_to_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let model = InferenceClassifier::new(&config(&server, None)).unwrap();
    let classifier = SentimentClassifier::new(Arc::new(model));

    assert_eq!(classifier.classify("teks berita").await, Sentiment::Unknown);
}

#[tokio::test]
async fn test_classifier_maps_labels() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"label": "LABEL_1", "score": 0.7}])),
        )
        .mount(&server)
        .await;

    let model = InferenceClassifier::new(&config(&server, None)).unwrap();
    let classifier = SentimentClassifier::new(Arc::new(model));

    assert_eq!(classifier.classify("teks berita").await, Sentiment::Neutral);
}
