//! Frontend handlers: the public reading surface plus likes and
//! comments.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use quill_core::ApiVersion;
use quill_core::domain::{Comment, Like};
use quill_core::error::RepoError;
use quill_shared::{CollectionEnvelope, ResourceEnvelope};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::version::RequestedVersion;
use crate::requests::v1_0::{CommentStoreRequest, ListParams};
use crate::resources::v1_0::PostResource;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FrontendPostPath {
    pub post_id: Uuid,
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// GET /api/{version}/frontend/posts - public listing of all posts.
pub async fn index(
    version: RequestedVersion,
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let query = params.post_query().map_err(AppError::Validation)?;
    let page = state.posts.list(&query).await?;

    let data: Vec<PostResource> = page.items.iter().map(PostResource::from_post).collect();
    Ok(HttpResponse::Ok().json(CollectionEnvelope::new(
        data,
        req.path(),
        page.page,
        page.per_page,
        page.total,
    )))
}

/// POST /api/{version}/frontend/posts/like/{post_id}
///
/// Idempotent per (user, post): the unique index makes the second
/// attempt fail at the storage layer, which surfaces here as a 409
/// instead of a second row - also under concurrent duplicates.
pub async fn like_post(
    version: RequestedVersion,
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<FrontendPostPath>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let post = state
        .posts
        .find_by_id(path.post_id)
        .await?
        .ok_or_else(post_not_found)?;

    match state.likes.insert(Like::new(identity.user_id, post.id)).await {
        Ok(_) => {}
        Err(RepoError::Conflict(_)) => {
            return Err(AppError::Conflict(
                "User has already liked the post".to_string(),
            ));
        }
        Err(other) => return Err(other.into()),
    }

    let detail = state
        .posts
        .find_detail(post.id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(ResourceEnvelope::new(PostResource::from_detail(&detail))))
}

/// POST /api/{version}/frontend/posts/comment/{post_id}
pub async fn comment_post(
    version: RequestedVersion,
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<FrontendPostPath>,
    body: web::Json<CommentStoreRequest>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let text = body.validate().map_err(AppError::Validation)?;

    let post = state
        .posts
        .find_by_id(path.post_id)
        .await?
        .ok_or_else(post_not_found)?;

    state
        .comments
        .insert(Comment::new(identity.user_id, post.id, text))
        .await?;

    let detail = state
        .posts
        .find_detail(post.id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(ResourceEnvelope::new(PostResource::from_detail(&detail))))
}
