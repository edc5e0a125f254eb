//! Shared fixtures for handler tests.

use std::sync::Arc;
use std::time::Duration;

use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

use crate::app_state::AppState;
use crate::auth::jwt::JwtService;
use crate::extractor::MockArticleExtractor;
use crate::ingest::IngestService;
use crate::passwords::Passwords;
use crate::repositories::article::MockArticleRepositoryTrait;
use crate::repositories::user::MockUserRepositoryTrait;
use crate::search::MockNewsSearch;
use crate::sentiment::{MockSentimentModel, SentimentClassifier};

pub const TEST_JWT_SECRET: &str = "test-secret";

pub fn create_test_pool() -> Pool<Postgres> {
    // Never reachable; handlers under test only touch the mocks
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("postgresql://dummy")
        .expect("Failed to create test pool")
}

/// An ingestion service whose collaborators fail the test if they are used.
pub fn idle_ingest() -> IngestService {
    IngestService::new(
        Arc::new(MockNewsSearch::new()),
        Arc::new(MockArticleExtractor::new()),
        SentimentClassifier::new(Arc::new(MockSentimentModel::new())),
        Arc::new(MockArticleRepositoryTrait::new()),
    )
}

pub fn test_state(
    user_repo: MockUserRepositoryTrait,
    article_repo: MockArticleRepositoryTrait,
    ingest: IngestService,
) -> AppState {
    AppState {
        user_repo: Arc::new(user_repo),
        article_repo: Arc::new(article_repo),
        ingest: Arc::new(ingest),
        jwt: Arc::new(JwtService::new(TEST_JWT_SECRET, 3600)),
        passwords: Passwords::new(1024, 1, 1).expect("argon2 params"),
        ingest_timeout: Duration::from_secs(30),
        db_pool: create_test_pool(),
    }
}

pub fn idle_state() -> AppState {
    test_state(
        MockUserRepositoryTrait::new(),
        MockArticleRepositoryTrait::new(),
        idle_ingest(),
    )
}

pub fn bearer(username: &str) -> String {
    let token = JwtService::new(TEST_JWT_SECRET, 3600)
        .generate_token(username)
        .expect("Failed to generate token");
    format!("Bearer {token}")
}
