use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::error::Result;
use crate::models::{Article, NewArticle};

use super::schema::SCHEMA;

pub struct Repository {
    pool: PgPool,
}

impl Repository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Insert articles one by one, ignoring rows whose URL is already
    /// stored. Returns the number of rows actually written.
    pub async fn insert_articles(&self, articles: &[NewArticle]) -> Result<u64> {
        let mut inserted = 0;
        for article in articles {
            let result = sqlx::query(
                r#"INSERT INTO articles (url, summary, query, tags)
                   VALUES ($1, $2, $3, $4)
                   ON CONFLICT (url) DO NOTHING"#,
            )
            .bind(&article.url)
            .bind(&article.summary)
            .bind(&article.query)
            .bind(&article.tags)
            .execute(&self.pool)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// Fetch articles whose tag array overlaps the given tags (Postgres
    /// `&&` operator, served by the GIN index).
    pub async fn find_by_tags(&self, tags: &[String]) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            r#"SELECT id, url, summary, query, tags, retrieval_timestamp
               FROM articles
               WHERE tags && $1
               ORDER BY retrieval_timestamp DESC"#,
        )
        .bind(tags.to_vec())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(article_from_row).collect()
    }

    pub async fn article_exists(&self, url: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE url = $1")
            .bind(url)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn article_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn article_from_row(row: &PgRow) -> Result<Article> {
    Ok(Article {
        id: row.try_get("id")?,
        url: row.try_get("url")?,
        summary: row.try_get("summary")?,
        query: row.try_get("query")?,
        tags: row.try_get("tags")?,
        retrieval_timestamp: row.try_get("retrieval_timestamp")?,
    })
}
