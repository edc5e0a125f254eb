use crate::entities::{ArticleRecord, ArticleRow, NewArticle};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const ARTICLE_COLUMNS: &str = "id, title, description, published_date, url, \
    publisher_title, publisher_href, article_title, article_text, article_summary, \
    article_keywords, sentiment, requested_by, created_at";

/// Window over the article list. `limit: None` means everything after `offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListPage {
    pub limit: Option<i64>,
    pub offset: i64,
}

/// Persistence for news records. Inserts never upsert and never deduplicate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepositoryTrait: Send + Sync {
    async fn insert(&self, article: &NewArticle) -> Result<ArticleRecord>;
    /// Records in insertion order.
    async fn list(&self, page: ListPage) -> Result<Vec<ArticleRecord>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ArticleRecord>>;
}

#[derive(Clone)]
pub struct ArticleRepository {
    pool: Pool<Postgres>,
}

impl ArticleRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepositoryTrait for ArticleRepository {
    async fn insert(&self, article: &NewArticle) -> Result<ArticleRecord> {
        let (publisher_title, publisher_href) = match &article.publisher {
            Some(p) => (Some(p.title.as_str()), p.href.as_deref()),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            INSERT INTO articles
                  (title, description, published_date, url, publisher_title, publisher_href,
                   article_title, article_text, article_summary, article_keywords, sentiment,
                   requested_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(&article.title)
        .bind(&article.description)
        .bind(article.published_date)
        .bind(&article.url)
        .bind(publisher_title)
        .bind(publisher_href)
        .bind(&article.article.title)
        .bind(&article.article.text)
        .bind(&article.article.summary)
        .bind(&article.article.keywords)
        .bind(article.article.sentiment)
        .bind(&article.requested_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list(&self, page: ListPage) -> Result<Vec<ArticleRecord>> {
        // LIMIT NULL is LIMIT ALL in Postgres
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            SELECT {ARTICLE_COLUMNS}
            FROM articles
            ORDER BY seq
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ArticleRecord::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ArticleRecord>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ArticleRecord::from))
    }
}
