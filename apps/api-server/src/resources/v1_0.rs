//! v1.0 resource shapes.
//!
//! Shaping is a pure mapping from a persisted entity to its public
//! representation. Relation fields and the like count only appear when
//! the caller loaded them; everything else is always present.

use serde::Serialize;
use uuid::Uuid;

use quill_core::domain::{CommentDetail, Post, PostDetail, User};
use quill_shared::validate::DATETIME_FORMAT;

/// Public shape of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserResource {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl UserResource {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Public shape of a comment, optionally with its commentator.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResource {
    pub id: Uuid,
    pub comment: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentator: Option<UserResource>,
}

impl CommentResource {
    pub fn from_detail(detail: &CommentDetail) -> Self {
        Self {
            id: detail.comment.id,
            comment: detail.comment.body.clone(),
            created_at: detail.comment.created_at.to_rfc3339(),
            commentator: detail.commentator.as_ref().map(UserResource::from_user),
        }
    }
}

/// Public shape of a post.
#[derive(Debug, Clone, Serialize)]
pub struct PostResource {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub status: &'static str,
    pub is_featured: bool,
    pub publish_date: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_likes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentResource>>,
}

impl PostResource {
    /// Shape a post with no relations loaded.
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            body: post.content.clone(),
            status: post.status.as_str(),
            is_featured: post.is_featured,
            publish_date: post.publish_date.format(DATETIME_FORMAT).to_string(),
            created_at: post.created_at.to_rfc3339(),
            author: None,
            total_likes: None,
            comments: None,
        }
    }

    /// Shape a post with whichever relations the caller loaded.
    pub fn from_detail(detail: &PostDetail) -> Self {
        let mut resource = Self::from_post(&detail.post);
        resource.author = detail.author.as_ref().map(UserResource::from_user);
        resource.total_likes = detail.total_likes;
        resource.comments = detail
            .comments
            .as_ref()
            .map(|comments| comments.iter().map(CommentResource::from_detail).collect());
        resource
    }
}

/// Login response: the issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResource {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use quill_core::domain::{Comment, PostStatus};

    use super::*;

    fn sample_user(name: &str) -> User {
        User::new(
            name.to_string(),
            format!("{}@example.com", name.to_lowercase()),
            "$argon2$...".to_string(),
        )
    }

    fn sample_post(author: &User) -> Post {
        Post::new(
            author.id,
            "First Post".to_string(),
            "Here goes the content".to_string(),
            PostStatus::Published,
            true,
            Utc::now().naive_utc(),
        )
    }

    #[test]
    fn bare_post_omits_relations_entirely() {
        let author = sample_user("Jane");
        let shaped = PostResource::from_post(&sample_post(&author));
        let json = serde_json::to_value(&shaped).unwrap();

        assert_eq!(json["title"], "First Post");
        assert_eq!(json["status"], "published");
        assert!(json.get("author").is_none());
        assert!(json.get("total_likes").is_none());
        assert!(json.get("comments").is_none());
    }

    #[test]
    fn loaded_relations_appear_in_the_shape() {
        let author = sample_user("Jane");
        let commentator = sample_user("Joe");
        let post = sample_post(&author);
        let comment = Comment::new(commentator.id, post.id, "Nice blog post bro".to_string());

        let detail = PostDetail {
            post,
            author: Some(author.clone()),
            comments: Some(vec![CommentDetail {
                comment,
                commentator: Some(commentator.clone()),
            }]),
            total_likes: Some(1),
        };

        let json = serde_json::to_value(PostResource::from_detail(&detail)).unwrap();

        assert_eq!(json["author"]["name"], "Jane");
        assert_eq!(json["total_likes"], 1);
        assert_eq!(json["comments"][0]["comment"], "Nice blog post bro");
        assert_eq!(json["comments"][0]["commentator"]["name"], "Joe");
    }

    #[test]
    fn publish_date_uses_the_wire_format() {
        let author = sample_user("Jane");
        let mut post = sample_post(&author);
        post.publish_date = chrono::NaiveDateTime::parse_from_str(
            "2023-04-02 09:12:40",
            DATETIME_FORMAT,
        )
        .unwrap();

        let shaped = PostResource::from_post(&post);
        assert_eq!(shaped.publish_date, "2023-04-02 09:12:40");
    }

    #[test]
    fn comment_without_loaded_commentator_omits_it() {
        let commentator = sample_user("Joe");
        let comment = Comment::new(commentator.id, Uuid::new_v4(), "Hello".to_string());

        let json = serde_json::to_value(CommentResource::from_detail(&CommentDetail {
            comment,
            commentator: None,
        }))
        .unwrap();

        assert!(json.get("commentator").is_none());
    }
}
