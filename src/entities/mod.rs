use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// --- PostgreSQL Enums ---
#[derive(
    sqlx::Type, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[sqlx(type_name = "sentiment", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    #[default]
    Unknown,
}

impl Sentiment {
    /// Map a raw classifier label onto the closed vocabulary.
    pub fn from_label(label: &str) -> Self {
        match label {
            "LABEL_0" => Self::Positive,
            "LABEL_1" => Self::Neutral,
            "LABEL_2" => Self::Negative,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Unknown => "unknown",
        }
    }
}

/// --- Tables ---

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub pw_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Flat row of the `articles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub url: String,
    pub publisher_title: Option<String>,
    pub publisher_href: Option<String>,
    pub article_title: String,
    pub article_text: String,
    pub article_summary: String,
    pub article_keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub requested_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// --- Documents ---

/// Outlet that published a news item, as reported by the search feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Publisher {
    pub title: String,
    pub href: Option<String>,
}

/// Enriched article body embedded in every stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub title: String,
    pub text: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
}

/// A record that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub description: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub url: String,
    pub publisher: Option<Publisher>,
    pub article: Article,
    pub requested_by: Option<String>,
}

/// A persisted, immutable news record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArticleRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub url: String,
    pub publisher: Option<Publisher>,
    pub article: Article,
    pub requested_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ArticleRecord {
    /// Attach store-assigned identity to a new article.
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, new: NewArticle) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            published_date: new.published_date,
            url: new.url,
            publisher: new.publisher,
            article: new.article,
            requested_by: new.requested_by,
            created_at,
        }
    }
}

impl From<ArticleRow> for ArticleRecord {
    fn from(row: ArticleRow) -> Self {
        let publisher = match (row.publisher_title, row.publisher_href) {
            (Some(title), href) => Some(Publisher { title, href }),
            (None, Some(href)) => Some(Publisher {
                title: String::new(),
                href: Some(href),
            }),
            (None, None) => None,
        };

        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            published_date: row.published_date,
            url: row.url,
            publisher,
            article: Article {
                title: row.article_title,
                text: row.article_text,
                summary: row.article_summary,
                keywords: row.article_keywords,
                sentiment: row.sentiment,
            },
            requested_by: row.requested_by,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(Sentiment::from_label("LABEL_0"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("LABEL_1"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label("LABEL_2"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("LABEL_3"), Sentiment::Unknown);
        assert_eq!(Sentiment::from_label("positive"), Sentiment::Unknown);
        assert_eq!(Sentiment::from_label(""), Sentiment::Unknown);
    }

    #[test]
    fn test_sentiment_serializes_lowercase() {
        let json = serde_json::to_string(&Sentiment::Negative).unwrap();
        assert_eq!(json, "\"negative\"");
        assert_eq!(Sentiment::default(), Sentiment::Unknown);
    }

    #[test]
    fn test_row_into_record_regroups_publisher() {
        let now = Utc::now();
        let row = ArticleRow {
            id: Uuid::new_v4(),
            title: "Banjir Jakarta".to_string(),
            description: None,
            published_date: None,
            url: "https://example.com/a".to_string(),
            publisher_title: Some("Kompas".to_string()),
            publisher_href: Some("https://kompas.com".to_string()),
            article_title: "Banjir Jakarta".to_string(),
            article_text: "Teks".to_string(),
            article_summary: "Ringkasan".to_string(),
            article_keywords: vec!["banjir".to_string()],
            sentiment: Sentiment::Negative,
            requested_by: Some("alfabeta".to_string()),
            created_at: now,
        };

        let record = ArticleRecord::from(row);
        assert_eq!(
            record.publisher,
            Some(Publisher {
                title: "Kompas".to_string(),
                href: Some("https://kompas.com".to_string()),
            })
        );
        assert_eq!(record.article.sentiment, Sentiment::Negative);
        assert_eq!(record.article.keywords, vec!["banjir".to_string()]);
    }
}
