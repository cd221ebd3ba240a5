//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    CommentRepository, LikeRepository, PasswordService, PostRepository, UserRepository,
};
use quill_infra::{
    Argon2PasswordService, DatabaseConfig, DbErr, SeaOrmCommentRepository, SeaOrmLikeRepository,
    SeaOrmPostRepository, SeaOrmUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Connect to the database and wire up the repository implementations.
    pub async fn new(db_config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = quill_infra::connect(db_config).await?;

        tracing::info!("Application state initialized");

        Ok(Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            posts: Arc::new(SeaOrmPostRepository::new(db.clone())),
            comments: Arc::new(SeaOrmCommentRepository::new(db.clone())),
            likes: Arc::new(SeaOrmLikeRepository::new(db)),
            passwords: Arc::new(Argon2PasswordService::new()),
        })
    }
}
