//! Bastion authn/authz primitives shared by the roster service and its tests.
//!
//! # Purpose
//! Centralizes the role model, credential parsing, the identity provider, and
//! the static access policy that guards every roster operation.
//!
//! # How it fits
//! The roster service resolves a [`Principal`] per request through the
//! [`IdentityProvider`], then passes it explicitly to the secured store, which
//! asks the [`Policy`] for a [`Decision`] before touching any record.
//!
//! # Key invariants
//! - Rules are keyed by `(ResourceType, Operation)`; a missing rule denies.
//! - An empty required-role set means the operation is open to anyone.
//! - There is no ambient "current user"; callers always pass the principal.
//!
//! # Examples
//! ```rust
//! use bastion_authz::{Decision, Operation, Policy, Principal, ResourceType, Role};
//!
//! let policy = Policy::standard();
//! let admin = Principal::new("ollie", None, [Role::user(), Role::admin()]);
//! assert_eq!(
//!     policy.authorize(Some(&admin), ResourceType::Item, Operation::Delete),
//!     Decision::Allow
//! );
//! ```
//!
//! # Common pitfalls
//! - Forgetting to call [`SecurityContext::clear`] after an elevated block
//!   leaks administrative rights into later calls that reuse the context.

mod context;
mod credential;
mod errors;
mod identity;
mod operation;
mod policy;
mod principal;
mod resource;
mod role;

pub use context::SecurityContext;
pub use credential::Credential;
pub use errors::{AuthzError, AuthzResult};
pub use identity::{IdentityProvider, UserRecord, hash_secret};
pub use operation::Operation;
pub use policy::{Decision, DenyReason, Policy, PolicyRule};
pub use principal::Principal;
pub use resource::ResourceType;
pub use role::{ROLE_ADMIN, ROLE_USER, Role};
