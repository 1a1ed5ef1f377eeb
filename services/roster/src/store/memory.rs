//! In-memory implementation of the roster store.
//!
//! # Purpose
//! Keeps employees and items in `BTreeMap`s guarded by `tokio::sync::RwLock`.
//! All state is lost on restart; the seeder repopulates the fixtures.
//!
//! # Consistency
//! - Ids come from a per-collection `AtomicU64`, so concurrent creates never
//!   collide and ids are never reused within a process.
//! - Each mutation holds the collection's write lock for its whole duration;
//!   reads take the read lock. A write is visible to the next read.
//! - There are no cross-collection transactions.
//!
//! # Metrics
//! Collection sizes are published as gauges after every mutation.
use super::{RosterStore, StoreError, StoreResult};
use crate::model::{Employee, EmployeeDraft, Item, ItemDraft};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// One record collection with its own id sequence.
#[derive(Debug)]
struct Collection<T> {
    kind: &'static str,
    gauge: &'static str,
    next_id: AtomicU64,
    records: RwLock<BTreeMap<u64, T>>,
}

impl<T: Clone> Collection<T> {
    fn new(kind: &'static str, gauge: &'static str) -> Self {
        Self {
            kind,
            gauge,
            next_id: AtomicU64::new(1),
            records: RwLock::new(BTreeMap::new()),
        }
    }

    async fn list(&self) -> Vec<T> {
        self.records.read().await.values().cloned().collect()
    }

    async fn get(&self, id: u64) -> StoreResult<T> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| self.not_found(id))
    }

    async fn insert(&self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = build(id);
        let mut records = self.records.write().await;
        records.insert(id, record.clone());
        metrics::gauge!(self.gauge).set(records.len() as f64);
        record
    }

    async fn replace(&self, id: u64, build: impl FnOnce(u64) -> T) -> StoreResult<T> {
        let mut records = self.records.write().await;
        let Some(slot) = records.get_mut(&id) else {
            return Err(self.not_found(id));
        };
        *slot = build(id);
        Ok(slot.clone())
    }

    async fn remove(&self, id: u64) -> StoreResult<()> {
        let mut records = self.records.write().await;
        if records.remove(&id).is_none() {
            return Err(self.not_found(id));
        }
        metrics::gauge!(self.gauge).set(records.len() as f64);
        Ok(())
    }

    fn not_found(&self, id: u64) -> StoreError {
        StoreError::NotFound(format!("{} {id}", self.kind))
    }
}

pub struct InMemoryStore {
    employees: Collection<Employee>,
    items: Collection<Item>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            employees: Collection::new("employee", "bastion_employees_total"),
            items: Collection::new("item", "bastion_items_total"),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RosterStore for InMemoryStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.employees.list().await)
    }

    async fn get_employee(&self, id: u64) -> StoreResult<Employee> {
        self.employees.get(id).await
    }

    async fn create_employee(&self, draft: EmployeeDraft) -> StoreResult<Employee> {
        Ok(self.employees.insert(|id| draft.into_employee(id)).await)
    }

    async fn update_employee(&self, id: u64, draft: EmployeeDraft) -> StoreResult<Employee> {
        self.employees
            .replace(id, |id| draft.into_employee(id))
            .await
    }

    async fn delete_employee(&self, id: u64) -> StoreResult<()> {
        self.employees.remove(id).await
    }

    async fn list_items(&self) -> StoreResult<Vec<Item>> {
        Ok(self.items.list().await)
    }

    async fn get_item(&self, id: u64) -> StoreResult<Item> {
        self.items.get(id).await
    }

    async fn create_item(&self, draft: ItemDraft) -> StoreResult<Item> {
        Ok(self.items.insert(|id| draft.into_item(id)).await)
    }

    async fn update_item(&self, id: u64, draft: ItemDraft) -> StoreResult<Item> {
        self.items.replace(id, |id| draft.into_item(id)).await
    }

    async fn delete_item(&self, id: u64) -> StoreResult<()> {
        self.items.remove(id).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
