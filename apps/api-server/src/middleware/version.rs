//! Version gate extractor.
//!
//! Versioned routes carry a `{version}` path segment (e.g. `v1.0`).
//! Handlers call `gate(min)` before doing anything else; a token below
//! the endpoint's minimum, or one that does not parse, answers 404 so
//! unsupported versions look exactly like missing routes.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use quill_core::version::ApiVersion;

use super::error::AppError;

/// The API version requested in the path.
#[derive(Debug, Clone, Copy)]
pub struct RequestedVersion(pub ApiVersion);

impl RequestedVersion {
    /// Version gate: pass when the requested version reaches `min`.
    pub fn gate(&self, min: ApiVersion) -> Result<(), AppError> {
        if self.0.supports(min) {
            Ok(())
        } else {
            Err(not_found())
        }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

impl FromRequest for RequestedVersion {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("version")
            .and_then(|token| token.parse::<ApiVersion>().ok());

        ready(match parsed {
            Some(version) => Ok(RequestedVersion(version)),
            None => Err(not_found()),
        })
    }
}
