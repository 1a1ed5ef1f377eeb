//! Explicit, caller-owned security context.
//!
//! # Purpose
//! Holds at most one principal for a sequence of calls made by the same
//! caller. Trusted startup code uses [`SecurityContext::act_as`] to install a
//! synthetic principal without verifying a credential and
//! [`SecurityContext::clear`] to drop it again.
//!
//! # Key invariants
//! - A context is a plain value owned by one caller; it is never global and
//!   never shared between requests.
//! - After `clear()` the context is anonymous.
use crate::{Principal, Role};

#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    principal: Option<Principal>,
}

impl SecurityContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Install a synthetic principal with the given roles.
    pub fn act_as(&mut self, id: impl Into<String>, roles: impl IntoIterator<Item = Role>) {
        let principal = Principal::new(id, None, roles);
        tracing::debug!(principal = %principal.id, roles = ?principal.roles, "acting as");
        self.principal = Some(principal);
    }

    /// Drop any installed principal.
    pub fn clear(&mut self) {
        if let Some(principal) = self.principal.take() {
            tracing::debug!(principal = %principal.id, "security context cleared");
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn act_as_then_clear_restores_anonymous() {
        let mut context = SecurityContext::anonymous();
        assert!(!context.is_authenticated());

        context.act_as("system", [Role::admin()]);
        let principal = context.principal().expect("principal");
        assert_eq!(principal.id, "system");
        assert!(principal.credential_hash.is_none());
        assert!(principal.has_role(&Role::admin()));

        context.clear();
        assert!(context.principal().is_none());
        context.clear();
        assert!(!context.is_authenticated());
    }

    #[test]
    fn act_as_replaces_previous_principal() {
        let mut context = SecurityContext::anonymous();
        context.act_as("greg", [Role::user()]);
        context.act_as("system", [Role::user(), Role::admin()]);
        let principal = context.principal().expect("principal");
        assert_eq!(principal.id, "system");
        assert_eq!(principal.roles.len(), 2);
    }
}
