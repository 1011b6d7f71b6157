//! News repository
//!
//! Database operations for news articles.

use crate::db::pool::{backend, Backend};
use crate::db::DynDatabasePool;
use crate::models::{News, NewsWithAuthor};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const LIST_SQL: &str = r#"
    SELECT n.id, n.title, n.content, n.published, n.published_at, n.author_id,
           p.name AS author_name
    FROM news n
    INNER JOIN players p ON p.id = n.author_id
    ORDER BY n.published_at DESC, n.id DESC
"#;

/// News repository trait
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Persist a news article, returning it with its assigned ID
    async fn create(&self, news: &News) -> Result<News>;

    /// All news articles with author names, newest first
    async fn list(&self) -> Result<Vec<NewsWithAuthor>>;
}

/// SQLx-based news repository implementation
pub struct SqlxNewsRepository {
    pool: DynDatabasePool,
}

impl SqlxNewsRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn NewsRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl NewsRepository for SqlxNewsRepository {
    async fn create(&self, news: &News) -> Result<News> {
        let id = match backend(&self.pool)? {
            Backend::Sqlite(pool) => create_news_sqlite(pool, news).await?,
            Backend::Mysql(pool) => create_news_mysql(pool, news).await?,
        };

        let mut created = news.clone();
        created.id = id;
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<NewsWithAuthor>> {
        match backend(&self.pool)? {
            Backend::Sqlite(pool) => list_news_sqlite(pool).await,
            Backend::Mysql(pool) => list_news_mysql(pool).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_news_sqlite(pool: &SqlitePool, news: &News) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO news (title, content, published, published_at, author_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&news.title)
    .bind(&news.content)
    .bind(news.published)
    .bind(news.published_at)
    .bind(news.author_id)
    .execute(pool)
    .await
    .context("Failed to create news")?;

    Ok(result.last_insert_rowid())
}

async fn list_news_sqlite(pool: &SqlitePool) -> Result<Vec<NewsWithAuthor>> {
    let rows = sqlx::query(LIST_SQL)
        .fetch_all(pool)
        .await
        .context("Failed to list news")?;

    Ok(rows
        .iter()
        .map(|row| NewsWithAuthor {
            news: News {
                id: row.get("id"),
                title: row.get("title"),
                content: row.get("content"),
                published: row.get("published"),
                published_at: row.get("published_at"),
                author_id: row.get("author_id"),
            },
            author_name: row.get("author_name"),
        })
        .collect())
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_news_mysql(pool: &MySqlPool, news: &News) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO news (title, content, published, published_at, author_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&news.title)
    .bind(&news.content)
    .bind(news.published)
    .bind(news.published_at)
    .bind(news.author_id)
    .execute(pool)
    .await
    .context("Failed to create news")?;

    Ok(result.last_insert_id() as i64)
}

async fn list_news_mysql(pool: &MySqlPool) -> Result<Vec<NewsWithAuthor>> {
    let rows = sqlx::query(LIST_SQL)
        .fetch_all(pool)
        .await
        .context("Failed to list news")?;

    Ok(rows
        .iter()
        .map(|row| NewsWithAuthor {
            news: News {
                id: row.get("id"),
                title: row.get("title"),
                content: row.get("content"),
                published: row.get("published"),
                published_at: row.get("published_at"),
                author_id: row.get("author_id"),
            },
            author_name: row.get("author_name"),
        })
        .collect())
}
