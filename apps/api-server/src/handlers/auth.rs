//! Authentication handlers.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quill_core::ApiVersion;
use quill_core::ports::{TokenRevocationStore, TokenService};
use quill_shared::MessageEnvelope;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::version::RequestedVersion;
use crate::requests::v1_0::LoginRequest;
use crate::resources::v1_0::AuthResource;
use crate::state::AppState;

/// POST /api/{version}/auth/login
///
/// Unknown email and wrong password answer identically, so the endpoint
/// does not leak which accounts exist.
pub async fn login(
    version: RequestedVersion,
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    let credentials = body.validate().map_err(AppError::Validation)?;

    let Some(user) = state.users.find_by_email(&credentials.email).await? else {
        // Burn the same hashing cost as a real verification so the
        // unknown-email path is not measurably faster.
        let _ = state.passwords.hash(&credentials.password);
        return Err(AppError::Unauthorized);
    };

    let valid = state
        .passwords
        .verify(&credentials.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Created().json(AuthResource { token }))
}

/// POST /api/{version}/auth/logout
///
/// Revokes the bearer token used on this request, and only that one;
/// the user's other sessions stay valid.
pub async fn logout(
    version: RequestedVersion,
    identity: Identity,
    revocations: web::Data<Arc<dyn TokenRevocationStore>>,
) -> AppResult<HttpResponse> {
    version.gate(ApiVersion::V1_0)?;

    // Keep the revocation entry alive until the token would expire anyway.
    let remaining = (identity.expires_at - Utc::now().timestamp()).max(0) as u64;
    revocations
        .revoke(identity.jti, Duration::from_secs(remaining))
        .await;

    Ok(HttpResponse::Ok().json(MessageEnvelope::new(format!(
        "{} has been logged out.",
        identity.email
    ))))
}
