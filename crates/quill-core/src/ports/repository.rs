use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Like, Post, PostDetail, User};
use crate::error::RepoError;

/// Sort direction for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Columns a post listing may be ordered by.
///
/// The order-by parameter is user supplied, so it is parsed into this
/// fixed set instead of being passed through to query construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSortKey {
    #[default]
    CreatedAt,
    Title,
    Status,
    PublishDate,
}

impl PostSortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(PostSortKey::CreatedAt),
            "title" => Some(PostSortKey::Title),
            "status" => Some(PostSortKey::Status),
            "publish_date" => Some(PostSortKey::PublishDate),
            _ => None,
        }
    }
}

/// Columns a user listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortKey {
    #[default]
    CreatedAt,
    Name,
    Email,
}

impl UserSortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(UserSortKey::CreatedAt),
            "name" => Some(UserSortKey::Name),
            "email" => Some(UserSortKey::Email),
            _ => None,
        }
    }
}

/// Requested page of a listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

/// One page of results together with the total row count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Filters and ordering for a post listing.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Restrict to posts authored by this user.
    pub author_id: Option<Uuid>,
    /// Substring match on the title.
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub sort: PostSortKey,
    pub order: SortOrder,
    pub page: PageRequest,
}

/// Filters and ordering for a user listing.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Substring match on the name.
    pub search: Option<String>,
    pub sort: UserSortKey,
    pub order: SortOrder,
    pub page: PageRequest,
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Whether a user with this email exists, optionally ignoring one id
    /// (for update validation against the record being updated).
    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, RepoError>;

    /// Paged listing with optional name search.
    async fn list(&self, query: &UserQuery) -> Result<Page<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Paged listing honoring author, featured and search filters.
    async fn list(&self, query: &PostQuery) -> Result<Page<Post>, RepoError>;

    /// Load a post with author, comments (and their commentators) and
    /// the like count, all in explicit queries.
    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError>;

    /// Whether a post with this title exists, optionally ignoring one id.
    async fn title_exists(&self, title: &str, exclude: Option<Uuid>) -> Result<bool, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {}

/// Like repository.
///
/// `insert` must surface a duplicate (user, post) pair as
/// [`RepoError::Conflict`] backed by the storage-level unique index, so
/// concurrent duplicate requests cannot both succeed.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn insert(&self, like: Like) -> Result<Like, RepoError>;
}
