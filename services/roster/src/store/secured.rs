//! Policy-guarded access to the roster store.
//!
//! # Purpose
//! Every method takes the caller's principal explicitly, asks the [`Policy`]
//! for a decision, and only then delegates to the raw [`RosterStore`]. Method
//! callers and HTTP handlers therefore see the same decisions.
//!
//! # Key invariants
//! - The access check runs before the record lookup, so an unauthorized
//!   caller learns nothing about which ids exist.
//! - `NotFound` is only reported after the check has passed.
use super::{RosterStore, StoreResult};
use crate::model::{Employee, EmployeeDraft, Item, ItemDraft};
use bastion_authz::{Operation, Policy, Principal, ResourceType};
use std::sync::Arc;

#[derive(Clone)]
pub struct SecuredStore {
    inner: Arc<dyn RosterStore>,
    policy: Arc<Policy>,
}

impl SecuredStore {
    pub fn new(inner: Arc<dyn RosterStore>, policy: Policy) -> Self {
        Self {
            inner,
            policy: Arc::new(policy),
        }
    }

    /// Run the access check alone, without touching any record.
    pub fn check(
        &self,
        principal: Option<&Principal>,
        resource: ResourceType,
        operation: Operation,
    ) -> StoreResult<()> {
        self.policy.enforce(principal, resource, operation)?;
        Ok(())
    }

    pub async fn list_employees(&self, principal: Option<&Principal>) -> StoreResult<Vec<Employee>> {
        self.check(principal, ResourceType::Employee, Operation::Read)?;
        self.inner.list_employees().await
    }

    pub async fn get_employee(
        &self,
        principal: Option<&Principal>,
        id: u64,
    ) -> StoreResult<Employee> {
        self.check(principal, ResourceType::Employee, Operation::Read)?;
        self.inner.get_employee(id).await
    }

    pub async fn create_employee(
        &self,
        principal: Option<&Principal>,
        draft: EmployeeDraft,
    ) -> StoreResult<Employee> {
        self.check(principal, ResourceType::Employee, Operation::Write)?;
        let employee = self.inner.create_employee(draft).await?;
        tracing::info!(employee_id = employee.id, "employee created");
        Ok(employee)
    }

    pub async fn update_employee(
        &self,
        principal: Option<&Principal>,
        id: u64,
        draft: EmployeeDraft,
    ) -> StoreResult<Employee> {
        self.check(principal, ResourceType::Employee, Operation::Write)?;
        self.inner.update_employee(id, draft).await
    }

    pub async fn delete_employee(&self, principal: Option<&Principal>, id: u64) -> StoreResult<()> {
        self.check(principal, ResourceType::Employee, Operation::Delete)?;
        self.inner.delete_employee(id).await?;
        tracing::info!(employee_id = id, "employee deleted");
        Ok(())
    }

    pub async fn list_items(&self, principal: Option<&Principal>) -> StoreResult<Vec<Item>> {
        self.check(principal, ResourceType::Item, Operation::Read)?;
        self.inner.list_items().await
    }

    pub async fn get_item(&self, principal: Option<&Principal>, id: u64) -> StoreResult<Item> {
        self.check(principal, ResourceType::Item, Operation::Read)?;
        self.inner.get_item(id).await
    }

    pub async fn create_item(
        &self,
        principal: Option<&Principal>,
        draft: ItemDraft,
    ) -> StoreResult<Item> {
        self.check(principal, ResourceType::Item, Operation::Write)?;
        let item = self.inner.create_item(draft).await?;
        tracing::info!(item_id = item.id, "item created");
        Ok(item)
    }

    pub async fn update_item(
        &self,
        principal: Option<&Principal>,
        id: u64,
        draft: ItemDraft,
    ) -> StoreResult<Item> {
        self.check(principal, ResourceType::Item, Operation::Write)?;
        self.inner.update_item(id, draft).await
    }

    pub async fn delete_item(&self, principal: Option<&Principal>, id: u64) -> StoreResult<()> {
        self.check(principal, ResourceType::Item, Operation::Delete)?;
        self.inner.delete_item(id).await?;
        tracing::info!(item_id = id, "item deleted");
        Ok(())
    }

    pub async fn health_check(&self) -> StoreResult<()> {
        self.inner.health_check().await
    }

    pub fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use crate::store::memory::InMemoryStore;
    use bastion_authz::{AuthzError, Role};

    fn store() -> SecuredStore {
        SecuredStore::new(Arc::new(InMemoryStore::new()), Policy::standard())
    }

    fn admin() -> Principal {
        Principal::new("ollie", None, [Role::user(), Role::admin()])
    }

    #[tokio::test]
    async fn denial_happens_before_lookup() {
        let store = store();
        let greg = Principal::new("greg", None, [Role::user()]);
        let err = store
            .delete_item(Some(&greg), 999)
            .await
            .expect_err("forbidden");
        assert!(matches!(
            err,
            StoreError::Access(AuthzError::Forbidden { .. })
        ));

        let err = store
            .delete_item(Some(&admin()), 999)
            .await
            .expect_err("missing");
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn anonymous_may_read_employees_only() {
        let store = store();
        store
            .create_employee(Some(&admin()), EmployeeDraft::new("Bilbo", "Baggins", "thief"))
            .await
            .expect("create");

        assert_eq!(store.list_employees(None).await.expect("list").len(), 1);
        assert!(matches!(
            store.list_items(None).await,
            Err(StoreError::Access(AuthzError::Unauthenticated))
        ));
        assert!(matches!(
            store
                .create_employee(None, EmployeeDraft::new("Frodo", "Baggins", "ring bearer"))
                .await,
            Err(StoreError::Access(AuthzError::Unauthenticated))
        ));
    }

    #[tokio::test]
    async fn check_alone_does_not_touch_records() {
        let store = store();
        store
            .check(None, ResourceType::Root, Operation::Read)
            .expect("root is open");
        assert!(store
            .check(None, ResourceType::Item, Operation::Write)
            .is_err());
        assert!(store.list_items(Some(&admin())).await.expect("list").is_empty());
        assert_eq!(store.backend_name(), "memory");
    }
}
