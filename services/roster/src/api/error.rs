//! API error types and helpers.
//!
//! # Purpose and responsibility
//! Centralizes HTTP error response construction so every roster endpoint
//! returns the same error shape and maps access failures the same way.
//!
//! # Key invariants and assumptions
//! - Error responses carry a stable `code` and a human-readable `message`.
//! - A 401 always carries a `WWW-Authenticate: Basic` challenge.
//! - Denials never say which rule fired or which roles were missing.
//!
//! # Security considerations
//! - Internal errors log details server-side but return generic messages.
use crate::api::types::ErrorResponse;
use crate::store::StoreError;
use axum::Json;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;

/// Structured API error returned by handlers.
///
/// # Invariants
/// - `status` must match the semantics of `body.code`.
/// - `challenge` is set only for 401 responses.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
    pub challenge: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let mut response = (self.status, Json(self.body)).into_response();
        if let Some(challenge) = self.challenge {
            match HeaderValue::from_str(&challenge) {
                Ok(value) => {
                    response.headers_mut().insert(WWW_AUTHENTICATE, value);
                }
                Err(err) => tracing::warn!(error = %err, "invalid authentication challenge"),
            }
        }
        response
    }
}

fn error(status: StatusCode, code: &str, message: &str) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            code: code.to_string(),
            message: message.to_string(),
            request_id: None,
        },
        challenge: None,
    }
}

/// Build a 404 Not Found error.
pub fn api_not_found(message: &str) -> ApiError {
    error(StatusCode::NOT_FOUND, "not_found", message)
}

/// Build a 401 Unauthorized error with a Basic challenge for `realm`.
pub fn api_unauthorized(realm: &str, message: &str) -> ApiError {
    let mut err = error(StatusCode::UNAUTHORIZED, "unauthorized", message);
    err.challenge = Some(format!("Basic realm=\"{realm}\""));
    err
}

/// Build a 403 Forbidden error.
pub fn api_forbidden(message: &str) -> ApiError {
    // Authenticated, but the principal lacks the required role.
    error(StatusCode::FORBIDDEN, "forbidden", message)
}

/// Build a 400 Bad Request validation error.
pub fn api_validation_error(message: &str) -> ApiError {
    error(StatusCode::BAD_REQUEST, "validation_error", message)
}

/// Build a 500 Internal Server Error from a store error.
///
/// # What it does
/// Logs the store error and returns a generic internal error response.
pub fn api_internal(message: &str, err: &StoreError) -> ApiError {
    tracing::error!(error = ?err, "roster storage error");
    error(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

/// Translate a store failure into the matching HTTP error.
///
/// # What it does
/// - Authentication failures become 401 with a challenge for `realm`.
/// - Policy denials become 403.
/// - Missing records become 404.
/// - Anything else is logged and returned as a generic 500 with `message`.
pub fn api_store_error(realm: &str, message: &str, err: StoreError) -> ApiError {
    match err {
        StoreError::Access(access) if access.is_authentication_failure() => {
            api_unauthorized(realm, "full authentication is required")
        }
        StoreError::Access(_) => api_forbidden("access is denied"),
        StoreError::NotFound(what) => api_not_found(&format!("{what} not found")),
        other => api_internal(message, &other),
    }
}
