//! News service
//!
//! Creates and lists news articles. Input arrives already validated by
//! [`NewsForm`](crate::services::validation::NewsForm); the service only
//! guards against empty values reaching storage.

use crate::db::repositories::NewsRepository;
use crate::models::{CreateNewsInput, News, NewsWithAuthor};
use anyhow::Context;
use std::sync::Arc;

/// Error types for news service operations
#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub struct NewsService {
    repo: Arc<dyn NewsRepository>,
}

impl NewsService {
    pub fn new(repo: Arc<dyn NewsRepository>) -> Self {
        Self { repo }
    }

    /// Create a news article stamped with the current time
    ///
    /// # Errors
    ///
    /// - `ValidationError` if title or content is empty
    /// - `InternalError` for database errors
    pub async fn create(&self, input: CreateNewsInput) -> Result<News, NewsServiceError> {
        if input.title.trim().is_empty() {
            return Err(NewsServiceError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }
        if input.content.trim().is_empty() {
            return Err(NewsServiceError::ValidationError(
                "Content cannot be empty".to_string(),
            ));
        }

        let news = News::new(input.title, input.content, input.published, input.author_id);
        let created = self
            .repo
            .create(&news)
            .await
            .context("Failed to create news article")?;

        tracing::info!("Created news article {} by player {}", created.id, created.author_id);
        Ok(created)
    }

    /// All news articles, newest first
    pub async fn list(&self) -> anyhow::Result<Vec<NewsWithAuthor>> {
        self.repo.list().await.context("Failed to list news")
    }
}
