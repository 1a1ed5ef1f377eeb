//! Roster storage layer.
//!
//! # Purpose
//! [`RosterStore`] is the raw record store with no access checks.
//! [`secured::SecuredStore`] wraps it and runs the access policy in front of
//! every call; it is the only store the HTTP layer can reach.
use crate::model::{Employee, EmployeeDraft, Item, ItemDraft};
use async_trait::async_trait;
use bastion_authz::AuthzError;
use thiserror::Error;

pub mod memory;
pub mod secured;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Access(#[from] AuthzError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>>;
    async fn get_employee(&self, id: u64) -> StoreResult<Employee>;
    async fn create_employee(&self, draft: EmployeeDraft) -> StoreResult<Employee>;
    async fn update_employee(&self, id: u64, draft: EmployeeDraft) -> StoreResult<Employee>;
    async fn delete_employee(&self, id: u64) -> StoreResult<()>;

    async fn list_items(&self) -> StoreResult<Vec<Item>>;
    async fn get_item(&self, id: u64) -> StoreResult<Item>;
    async fn create_item(&self, draft: ItemDraft) -> StoreResult<Item>;
    async fn update_item(&self, id: u64, draft: ItemDraft) -> StoreResult<Item>;
    async fn delete_item(&self, id: u64) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}
