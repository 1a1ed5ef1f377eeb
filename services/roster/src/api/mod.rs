//! Roster HTTP API module.
//!
//! # Purpose
//! Exposes route handler modules plus the shared helpers every handler uses to
//! resolve the caller and to decode bodies after the access check.
//!
//! # Key invariants
//! - The principal is resolved from the `Authorization` header before any
//!   body is read, so a denied caller sees 401/403 rather than 400.
//! - A present but unusable `Authorization` header is rejected with 401 even
//!   on open routes.
//! - Path ids are parsed after the access check; see [`parse_id`].
pub mod employees;
pub mod error;
pub mod hal;
pub mod items;
pub mod openapi;
pub mod root;
pub mod system;
pub mod types;

use crate::api::error::{ApiError, api_not_found, api_unauthorized, api_validation_error};
use crate::app::AppState;
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use bastion_authz::{Credential, Principal};
use serde::de::DeserializeOwned;

pub(crate) fn resolve_principal(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<Principal>, ApiError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| api_unauthorized(&state.realm, "bad credentials"))?;
    let credential = Credential::from_authorization_header(value).map_err(|err| {
        tracing::debug!(error = %err, "authorization header rejected");
        api_unauthorized(&state.realm, "bad credentials")
    })?;
    state
        .identity
        .authenticate(Some(&credential))
        .map(Some)
        .map_err(|err| {
            tracing::debug!(
                username = credential.username(),
                error = %err,
                "authentication failed"
            );
            api_unauthorized(&state.realm, "bad credentials")
        })
}

/// Parse a record id taken from the path.
///
/// Ids are extracted as strings and parsed only after the access check, so a
/// malformed id never short-circuits authentication. A value that is not a
/// number cannot name a record and is reported as missing.
pub(crate) fn parse_id(raw: &str, kind: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .map_err(|_| api_not_found(&format!("{kind} {raw} not found")))
}

pub(crate) fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    if body.is_empty() {
        return Err(api_validation_error("request body is required"));
    }
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "request body rejected");
        api_validation_error("malformed request body")
    })
}
