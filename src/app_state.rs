use crate::{
    auth::jwt::JwtService,
    config::Config,
    ingest::IngestService,
    passwords::Passwords,
    repositories::{ArticleRepository, ArticleRepositoryTrait, UserRepository, UserRepositoryTrait},
};
use sqlx::{Pool, Postgres};
use std::{sync::Arc, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepositoryTrait + Send + Sync>,
    pub article_repo: Arc<dyn ArticleRepositoryTrait + Send + Sync>,
    pub ingest: Arc<IngestService>,
    pub jwt: Arc<JwtService>,
    pub passwords: Passwords,
    /// Upper bound on one ingestion request before it is cancelled.
    pub ingest_timeout: Duration,
    pub db_pool: Pool<Postgres>,
}

impl AppState {
    /// Wire the Postgres repositories around an ingestion service that must
    /// share the same article store.
    pub fn new(
        pool: Pool<Postgres>,
        config: &Config,
        ingest: IngestService,
        passwords: Passwords,
    ) -> Self {
        Self {
            user_repo: Arc::new(UserRepository::new(pool.clone())),
            article_repo: Arc::new(ArticleRepository::new(pool.clone())),
            ingest: Arc::new(ingest),
            jwt: Arc::new(JwtService::new(
                config.jwt_secret(),
                config.jwt_expiration_secs(),
            )),
            passwords,
            ingest_timeout: Duration::from_secs(config.ingest_timeout_secs()),
            db_pool: pool,
        }
    }
}
