//! User handlers: public registration plus authenticated management.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use quill_core::ApiVersion;
use quill_core::domain::User;
use quill_shared::{CollectionEnvelope, MessageEnvelope, ResourceEnvelope, ValidationErrors};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::version::RequestedVersion;
use crate::requests::v1_0::{ListParams, UserStoreRequest, UserUpdateRequest};
use crate::resources::v1_0::UserResource;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserPath {
    pub id: Uuid,
}

/// GET /api/{version}/users
pub async fn index(
    version: RequestedVersion,
    _identity: Identity,
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let query = params.user_query().map_err(AppError::Validation)?;
    let page = state.users.list(&query).await?;

    let data: Vec<UserResource> = page.items.iter().map(UserResource::from_user).collect();
    Ok(HttpResponse::Ok().json(CollectionEnvelope::new(
        data,
        req.path(),
        page.page,
        page.per_page,
        page.total,
    )))
}

/// POST /api/{version}/users - public registration.
pub async fn store(
    version: RequestedVersion,
    state: web::Data<AppState>,
    body: web::Json<UserStoreRequest>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let valid = body.validate().map_err(AppError::Validation)?;

    if state.users.email_exists(&valid.email, None).await? {
        let mut errors = ValidationErrors::new();
        errors.add("email", "The email has already been taken.");
        return Err(AppError::Validation(errors));
    }

    let password_hash = state
        .passwords
        .hash(&valid.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(valid.name, valid.email, password_hash);
    let saved = state.users.insert(user).await?;

    Ok(HttpResponse::Created().json(ResourceEnvelope::new(UserResource::from_user(&saved))))
}

/// GET /api/{version}/users/{id}
pub async fn show(
    version: RequestedVersion,
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<UserPath>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let user = state
        .users
        .find_by_id(path.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ResourceEnvelope::new(UserResource::from_user(&user))))
}

/// PATCH /api/{version}/users/{id}
pub async fn update(
    version: RequestedVersion,
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<UserPath>,
    body: web::Json<UserUpdateRequest>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let valid = body.validate().map_err(AppError::Validation)?;

    let mut user = state
        .users
        .find_by_id(path.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if state.users.email_exists(&valid.email, Some(user.id)).await? {
        let mut errors = ValidationErrors::new();
        errors.add("email", "The email has already been taken.");
        return Err(AppError::Validation(errors));
    }

    user.name = valid.name;
    user.email = valid.email;
    user.updated_at = Utc::now();
    let saved = state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(ResourceEnvelope::new(UserResource::from_user(&saved))))
}

/// DELETE /api/{version}/users/{id}
///
/// Hard delete; the user's posts, likes and comments go with them via
/// the cascading foreign keys.
pub async fn destroy(
    version: RequestedVersion,
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<UserPath>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    state.users.delete(path.id).await.map_err(|e| match e {
        quill_core::error::RepoError::NotFound => AppError::NotFound("User not found".to_string()),
        other => other.into(),
    })?;

    Ok(HttpResponse::Ok().json(MessageEnvelope::new("User deleted successfully")))
}
