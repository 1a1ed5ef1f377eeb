//! Static role-based access policy.
//!
//! # Purpose
//! Maps `(ResourceType, Operation)` to the roles that may perform it and
//! evaluates a principal (or its absence) against that table.
//!
//! # How it fits
//! Every secured store method and every HTTP handler calls
//! [`Policy::enforce`] before doing work, so method calls and network calls
//! get identical decisions.
//!
//! # Key invariants
//! - A principal satisfies a rule when it holds at least one required role.
//! - An empty required-role set allows everyone, including anonymous callers.
//! - A `(resource, operation)` pair without a rule is denied.
//! - The table is fixed at construction; there is no mutation API.
use crate::{AuthzError, AuthzResult, Operation, Principal, ResourceType, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRule {
    pub resource: ResourceType,
    pub operation: Operation,
    pub required_roles: Vec<Role>,
}

impl PolicyRule {
    pub fn open(resource: ResourceType, operation: Operation) -> Self {
        Self {
            resource,
            operation,
            required_roles: Vec::new(),
        }
    }

    pub fn requires(
        resource: ResourceType,
        operation: Operation,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self {
            resource,
            operation,
            required_roles: roles.into_iter().collect(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.required_roles.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    Forbidden,
}

impl DenyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DenyReason::Unauthenticated => "unauthenticated",
            DenyReason::Forbidden => "forbidden",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone)]
pub struct Policy {
    rules: Vec<PolicyRule>,
}

impl Policy {
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// The roster's rule table.
    ///
    /// | resource | operation | roles |
    /// |---|---|---|
    /// | root | read | open |
    /// | employee | read | open |
    /// | employee | write, delete | `ROLE_ADMIN` |
    /// | item | read, write, delete | `ROLE_ADMIN` |
    pub fn standard() -> Self {
        Self::new(vec![
            PolicyRule::open(ResourceType::Root, Operation::Read),
            PolicyRule::open(ResourceType::Employee, Operation::Read),
            PolicyRule::requires(ResourceType::Employee, Operation::Write, [Role::admin()]),
            PolicyRule::requires(ResourceType::Employee, Operation::Delete, [Role::admin()]),
            PolicyRule::requires(ResourceType::Item, Operation::Read, [Role::admin()]),
            PolicyRule::requires(ResourceType::Item, Operation::Write, [Role::admin()]),
            PolicyRule::requires(ResourceType::Item, Operation::Delete, [Role::admin()]),
        ])
    }

    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    pub fn rule(&self, resource: ResourceType, operation: Operation) -> Option<&PolicyRule> {
        self.rules
            .iter()
            .find(|rule| rule.resource == resource && rule.operation == operation)
    }

    pub fn authorize(
        &self,
        principal: Option<&Principal>,
        resource: ResourceType,
        operation: Operation,
    ) -> Decision {
        let Some(rule) = self.rule(resource, operation) else {
            // Unknown pairs fail closed.
            return match principal {
                None => Decision::Deny(DenyReason::Unauthenticated),
                Some(_) => Decision::Deny(DenyReason::Forbidden),
            };
        };
        if rule.is_open() {
            return Decision::Allow;
        }
        match principal {
            None => Decision::Deny(DenyReason::Unauthenticated),
            Some(principal) if principal.has_any_role(&rule.required_roles) => Decision::Allow,
            Some(_) => Decision::Deny(DenyReason::Forbidden),
        }
    }

    /// Evaluate and convert a denial into an [`AuthzError`].
    ///
    /// # Errors
    /// - [`AuthzError::Unauthenticated`] when a role is required and there is
    ///   no principal.
    /// - [`AuthzError::Forbidden`] when the principal lacks every required role.
    pub fn enforce(
        &self,
        principal: Option<&Principal>,
        resource: ResourceType,
        operation: Operation,
    ) -> AuthzResult<()> {
        let decision = self.authorize(principal, resource, operation);
        let principal_id = principal.map(|p| p.id.as_str()).unwrap_or("anonymous");
        match decision {
            Decision::Allow => {
                tracing::debug!(
                    principal = principal_id,
                    resource = %resource,
                    operation = %operation,
                    "access granted"
                );
                Ok(())
            }
            Decision::Deny(reason) => {
                tracing::debug!(
                    principal = principal_id,
                    resource = %resource,
                    operation = %operation,
                    reason = reason.as_str(),
                    "access denied"
                );
                metrics::counter!("bastion_authz_denied_total", "reason" => reason.as_str())
                    .increment(1);
                match reason {
                    DenyReason::Unauthenticated => Err(AuthzError::Unauthenticated),
                    DenyReason::Forbidden => Err(AuthzError::Forbidden {
                        principal: principal_id.to_string(),
                        resource,
                        operation,
                    }),
                }
            }
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::standard()
    }
}
