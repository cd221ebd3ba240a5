use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CommentDetail, User};

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(PostStatus::Draft),
            "published" => Some(PostStatus::Published),
            "archived" => Some(PostStatus::Archived),
            _ => None,
        }
    }
}

/// Post entity - a blog post authored by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub is_featured: bool,
    pub publish_date: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(
        user_id: Uuid,
        title: String,
        content: String,
        status: PostStatus,
        is_featured: bool,
        publish_date: NaiveDateTime,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            content,
            status,
            is_featured,
            publish_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A post together with whichever relations the caller chose to load.
///
/// Relation fields stay `None` unless they were loaded explicitly; the
/// resource layer only serializes what is present, so no hidden side
/// queries happen at shaping time.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub author: Option<User>,
    pub comments: Option<Vec<CommentDetail>>,
    /// Size of the loaded likes collection, not a fresh count query.
    pub total_likes: Option<u64>,
}

impl PostDetail {
    /// A detail view with no relations loaded.
    pub fn bare(post: Post) -> Self {
        Self {
            post,
            author: None,
            comments: None,
            total_likes: None,
        }
    }
}
