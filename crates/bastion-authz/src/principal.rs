//! Authenticated actor model.
//!
//! # Purpose
//! A principal is created when a credential is verified (or synthesized by a
//! trusted caller) and lives only as long as the request that resolved it.
use crate::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    /// Digest of the verified secret; `None` for synthesized principals.
    pub credential_hash: Option<String>,
    pub roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(
        id: impl Into<String>,
        credential_hash: Option<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self {
            id: id.into(),
            credential_hash,
            roles: roles.into_iter().collect(),
        }
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// True when the principal holds at least one of `roles`.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }
}
