//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenRevocationStore, TokenService};
pub use repository::{
    BaseRepository, CommentRepository, LikeRepository, Page, PageRequest, PostQuery,
    PostRepository, PostSortKey, SortOrder, UserQuery, UserRepository, UserSortKey,
};
