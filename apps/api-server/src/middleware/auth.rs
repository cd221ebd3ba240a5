//! Authentication middleware and extractors.

use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use quill_core::ports::{AuthError, TokenClaims, TokenRevocationStore, TokenService};
use quill_shared::ErrorEnvelope;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub email: String,
    /// Id of the bearer token behind this request; logout revokes it.
    pub jti: uuid::Uuid,
    /// When the token expires (unix seconds).
    pub expires_at: i64,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            jti: claims.jti,
            expires_at: claims.exp,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();
        let message = match &self.0 {
            AuthError::TokenExpired => "Your authentication token has expired. Please login again.",
            AuthError::TokenRevoked => "This token has been revoked. Please login again.",
            AuthError::InvalidToken(_) => "Invalid authentication token.",
            AuthError::MissingAuth => {
                "Please provide a valid Bearer token in the Authorization header."
            }
            AuthError::InvalidCredentials => "Invalid credentials",
            AuthError::HashingError(_) => "Internal server error",
        };

        actix_web::HttpResponse::build(status).json(ErrorEnvelope::new(status.as_u16(), message))
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token_service = req
                .app_data::<web::Data<Arc<dyn TokenService>>>()
                .ok_or_else(|| {
                    tracing::error!("TokenService not found in app data");
                    AuthenticationError(AuthError::InvalidToken(
                        "Server configuration error".to_string(),
                    ))
                })?;

            let token = bearer_token(&req).map_err(AuthenticationError)?;

            let claims = token_service
                .validate_token(&token)
                .map_err(AuthenticationError)?;

            // A structurally valid token may still have been revoked by
            // logout; that check needs the async store.
            let revocations = req
                .app_data::<web::Data<Arc<dyn TokenRevocationStore>>>()
                .ok_or_else(|| {
                    tracing::error!("TokenRevocationStore not found in app data");
                    AuthenticationError(AuthError::InvalidToken(
                        "Server configuration error".to_string(),
                    ))
                })?;

            if revocations.is_revoked(claims.jti).await {
                return Err(AuthenticationError(AuthError::TokenRevoked));
            }

            Ok(Identity::from(claims))
        })
    }
}
