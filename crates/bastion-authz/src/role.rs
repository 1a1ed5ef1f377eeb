//! Role names granted to principals.
//!
//! # Key invariants
//! - Role names are compared exactly; `ROLE_ADMIN` and `role_admin` differ.
//! - Display and `as_str` return the wrapped value.
use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_USER: &str = "ROLE_USER";

/// Named permission grant held by a principal.
///
/// # Example
/// ```rust
/// use bastion_authz::{ROLE_ADMIN, Role};
///
/// let role = Role::admin();
/// assert_eq!(role.as_str(), ROLE_ADMIN);
/// assert_eq!(Role::new("ROLE_ADMIN"), role);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn admin() -> Self {
        Self::new(ROLE_ADMIN)
    }

    pub fn user() -> Self {
        Self::new(ROLE_USER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
