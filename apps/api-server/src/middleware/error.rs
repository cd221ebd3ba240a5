//! Error handling at the transport boundary.
//!
//! Every handler returns `AppResult`; any failure renders the uniform
//! `{code, message}` envelope (with a per-field map on validation
//! failures) so no raw fault ever reaches the client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use quill_shared::{ErrorEnvelope, ValidationErrors};

/// Application-level error type rendered as the uniform error envelope.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Conflict(String),
    Internal(String),
    Validation(ValidationErrors),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let envelope = match self {
            AppError::NotFound(detail) => ErrorEnvelope::new(status.as_u16(), detail.clone()),
            AppError::BadRequest(detail) => ErrorEnvelope::new(status.as_u16(), detail.clone()),
            AppError::Unauthorized => ErrorEnvelope::new(status.as_u16(), "Invalid credentials"),
            AppError::Conflict(detail) => ErrorEnvelope::new(status.as_u16(), detail.clone()),
            AppError::Internal(detail) => {
                // Log internal errors, never leak them
                tracing::error!("Internal error: {}", detail);
                ErrorEnvelope::new(status.as_u16(), "Internal server error")
            }
            AppError::Validation(errors) => {
                ErrorEnvelope::new(status.as_u16(), "The given data was invalid.")
                    .with_fields(errors.clone().into_map())
            }
        };

        HttpResponse::build(status).json(envelope)
    }
}

// Conversion from domain errors
impl From<quill_core::error::DomainError> for AppError {
    fn from(err: quill_core::error::DomainError) -> Self {
        match err {
            quill_core::error::DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            quill_core::error::DomainError::Validation(msg) => AppError::BadRequest(msg),
            quill_core::error::DomainError::Duplicate(msg) => AppError::Conflict(msg),
            quill_core::error::DomainError::InvalidCredentials => AppError::Unauthorized,
            quill_core::error::DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<quill_core::error::RepoError> for AppError {
    fn from(err: quill_core::error::RepoError) -> Self {
        match err {
            quill_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            quill_core::error::RepoError::Conflict(msg) => AppError::Conflict(msg),
            quill_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            quill_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
