//! News model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// News article entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    /// Unique identifier
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Whether the article is visible on the public news page
    pub published: bool,
    /// Publication timestamp
    pub published_at: DateTime<Utc>,
    /// Authoring player ID
    pub author_id: i64,
}

impl News {
    /// Create a news article stamped with the current time
    pub fn new(title: String, content: String, published: bool, author_id: i64) -> Self {
        Self {
            id: 0, // Will be set by database
            title,
            content,
            published,
            published_at: Utc::now(),
            author_id,
        }
    }
}

/// News article joined with its author's name, as listed on the admin page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsWithAuthor {
    #[serde(flatten)]
    pub news: News,
    pub author_name: String,
}

/// Input for creating a news article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNewsInput {
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: i64,
}
