//! Post handlers: the authenticated author-facing CRUD surface.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use quill_core::ApiVersion;
use quill_core::domain::Post;
use quill_shared::{CollectionEnvelope, MessageEnvelope, ResourceEnvelope, ValidationErrors};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::version::RequestedVersion;
use crate::requests::v1_0::{ListParams, PostStoreRequest, PostUpdateRequest};
use crate::resources::v1_0::PostResource;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostPath {
    pub id: Uuid,
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

fn title_taken() -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add("title", "The title has already been taken.");
    AppError::Validation(errors)
}

/// Load a post and check it belongs to the caller. A post owned by
/// someone else answers exactly like a missing one.
async fn owned_post(state: &AppState, identity: &Identity, id: Uuid) -> AppResult<Post> {
    let post = state.posts.find_by_id(id).await?.ok_or_else(post_not_found)?;
    if post.user_id != identity.user_id {
        return Err(post_not_found());
    }
    Ok(post)
}

/// GET /api/{version}/posts - the caller's own posts.
pub async fn index(
    version: RequestedVersion,
    identity: Identity,
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let mut query = params.post_query().map_err(AppError::Validation)?;
    query.author_id = Some(identity.user_id);
    query.featured = None;

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

/// POST /api/{version}/posts
pub async fn store(
    version: RequestedVersion,
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostStoreRequest>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let valid = body.validate().map_err(AppError::Validation)?;

    // Titles are globally unique; the database constraint backs this
    // check up against concurrent creates.
    if state.posts.title_exists(&valid.title, None).await? {
        return Err(title_taken());
    }

    let post = Post::new(
        identity.user_id,
        valid.title,
        valid.body,
        valid.status,
        valid.is_featured,
        valid.publish_date,
    );
    let saved = state.posts.insert(post).await?;

    Ok(HttpResponse::Created().json(ResourceEnvelope::new(PostResource::from_post(&saved))))
}

/// GET /api/{version}/posts/{id}
pub async fn show(
    version: RequestedVersion,
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<PostPath>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let detail = state
        .posts
        .find_detail(path.id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(ResourceEnvelope::new(PostResource::from_detail(&detail))))
}

/// PATCH /api/{version}/posts/{id}
///
/// Partial update: omitted fields keep their stored values.
pub async fn update(
    version: RequestedVersion,
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<PostPath>,
    body: web::Json<PostUpdateRequest>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let valid = body.validate().map_err(AppError::Validation)?;

    let mut post = owned_post(&state, &identity, path.id).await?;

    if let Some(title) = &valid.title {
        if state.posts.title_exists(title, Some(post.id)).await? {
            return Err(title_taken());
        }
        post.title = title.clone();
    }
    if let Some(body) = valid.body {
        post.content = body;
    }
    if let Some(status) = valid.status {
        post.status = status;
    }
    if let Some(is_featured) = valid.is_featured {
        post.is_featured = is_featured;
    }
    if let Some(publish_date) = valid.publish_date {
        post.publish_date = publish_date;
    }
    post.updated_at = Utc::now();

    let saved = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(ResourceEnvelope::new(PostResource::from_post(&saved))))
}

/// DELETE /api/{version}/posts/{id}
///
/// Hard delete; dependent likes and comments cascade at the storage
/// layer.
pub async fn destroy(
    version: RequestedVersion,
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<PostPath>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let post = owned_post(&state, &identity, path.id).await?;
    state.posts.delete(post.id).await?;

    Ok(HttpResponse::Ok().json(MessageEnvelope::new("Post deleted successfully")))
}
