//! Domain entities - the core business objects.

mod comment;
mod like;
mod post;
mod user;

pub use comment::{Comment, CommentDetail};
pub use like::Like;
pub use post::{Post, PostDetail, PostStatus};
pub use user::User;
