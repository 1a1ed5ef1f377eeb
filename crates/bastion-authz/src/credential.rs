//! Credential parsing for HTTP Basic authentication.
//!
//! # Key invariants
//! - Only the `Basic` scheme is recognized; anything else is rejected rather
//!   than treated as anonymous.
//! - The password may contain `:`; only the first colon splits the pair.
//!
//! # Security considerations
//! - Error messages never echo the decoded secret.
use crate::{AuthzError, AuthzResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Basic { username: String, password: String },
}

impl Credential {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credential::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parse an `Authorization` header value.
    ///
    /// # Errors
    /// - [`AuthzError::InvalidCredential`] for an unknown scheme, bad base64,
    ///   non-UTF-8 content, or a missing `username:password` separator.
    pub fn from_authorization_header(value: &str) -> AuthzResult<Self> {
        let (scheme, encoded) = value
            .trim()
            .split_once(' ')
            .ok_or_else(|| AuthzError::InvalidCredential("malformed authorization".into()))?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(AuthzError::InvalidCredential(format!(
                "unsupported scheme: {scheme}"
            )));
        }
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| AuthzError::InvalidCredential("invalid base64".into()))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| AuthzError::InvalidCredential("credential is not utf-8".into()))?;
        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| AuthzError::InvalidCredential("missing separator".into()))?;
        Ok(Self::basic(username, password))
    }

    /// Render as an `Authorization` header value.
    pub fn to_authorization_header(&self) -> String {
        match self {
            Credential::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Credential::Basic { username, .. } => username,
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
