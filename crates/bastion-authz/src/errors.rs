use crate::{Operation, ResourceType};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    #[error("principal {principal} may not {operation} {resource}")]
    Forbidden {
        principal: String,
        resource: ResourceType,
        operation: Operation,
    },
}

impl AuthzError {
    /// True for failures that should prompt the caller to (re)authenticate.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AuthzError::Unauthenticated | AuthzError::InvalidCredential(_)
        )
    }
}

pub type AuthzResult<T> = Result<T, AuthzError>;
