use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Like entity - marks that a user liked a post.
///
/// At most one like may exist per (user, post); the storage layer
/// enforces this with a unique index so concurrent duplicate requests
/// surface as a conflict instead of a second row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(user_id: Uuid, post_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            created_at: Utc::now(),
        }
    }
}
