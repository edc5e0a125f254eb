use axum::Router;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::sync::Arc;

use newsfeel::{
    app_state::AppState, config::Config, ingest::IngestService, passwords::Passwords,
    repositories::ArticleRepository, router::build_router,
};

/// Connect to `TEST_DATABASE_URL` and migrate; `None` when no database is configured.
pub async fn test_pool() -> Option<Pool<Postgres>> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .ok()?;
    sqlx::migrate!("./migrations").run(&pool).await.ok()?;
    Some(pool)
}

pub fn test_app(pool: Pool<Postgres>) -> Router {
    let config = Config::default();
    let store = Arc::new(ArticleRepository::new(pool.clone()));
    let ingest = IngestService::from_config(&config, store).unwrap();
    let passwords = Passwords::new(1024, 1, 1).unwrap();

    build_router(AppState::new(pool, &config, ingest, passwords))
}

/// Usernames are unique per test run so tests can share one database.
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}
