use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// Comment entity - a user's comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment on a post.
    pub fn new(user_id: Uuid, post_id: Uuid, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A comment with its commentator, when that relation was loaded.
#[derive(Debug, Clone)]
pub struct CommentDetail {
    pub comment: Comment,
    pub commentator: Option<User>,
}
