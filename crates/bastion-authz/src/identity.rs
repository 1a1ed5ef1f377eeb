//! Identity provider backed by an in-memory user directory.
//!
//! # Purpose
//! Verifies presented credentials against stored secret digests and turns a
//! successful match into a [`Principal`] carrying the user's roles.
//!
//! # Key invariants
//! - Secrets are never stored in clear; each record holds
//!   `hex(sha256(username ":" password))`.
//! - Unknown users and wrong passwords produce the same error, so callers
//!   cannot probe which usernames exist.
//!
//! # Security considerations
//! - The directory is immutable after construction; replacing users means
//!   building a new provider.
use crate::{AuthzError, AuthzResult, Credential, Principal, Role};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Stable digest of a username/secret pair.
pub fn hash_secret(username: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
}

impl UserRecord {
    /// Build a record from a clear-text password, hashing it immediately.
    pub fn with_password(
        username: impl Into<String>,
        password: &str,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        let username = username.into();
        let password_hash = hash_secret(&username, password);
        Self {
            username,
            password_hash,
            roles: roles.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentityProvider {
    users: HashMap<String, UserRecord>,
}

impl IdentityProvider {
    pub fn new(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    /// Directory with the two demonstration accounts.
    pub fn with_default_users() -> Self {
        Self::new([
            UserRecord::with_password("greg", "turnquist", [Role::user()]),
            UserRecord::with_password("ollie", "gierke", [Role::user(), Role::admin()]),
        ])
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Resolve a credential to a principal.
    ///
    /// # Errors
    /// - [`AuthzError::Unauthenticated`] when `credential` is `None`.
    /// - [`AuthzError::InvalidCredential`] when the user is unknown or the
    ///   secret does not match.
    pub fn authenticate(&self, credential: Option<&Credential>) -> AuthzResult<Principal> {
        let Some(credential) = credential else {
            return Err(AuthzError::Unauthenticated);
        };
        match credential {
            Credential::Basic { username, password } => {
                let presented = hash_secret(username, password);
                let Some(user) = self
                    .users
                    .get(username)
                    .filter(|user| user.password_hash == presented)
                else {
                    tracing::debug!(username = %username, "credential rejected");
                    return Err(AuthzError::InvalidCredential(
                        "bad username or password".into(),
                    ));
                };
                Ok(Principal::new(
                    user.username.clone(),
                    Some(user.password_hash.clone()),
                    user.roles.iter().cloned(),
                ))
            }
        }
    }
}
