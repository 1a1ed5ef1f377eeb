//! Startup fixtures.
//!
//! # Purpose
//! Loads the fixed employees and items before the listener starts. Writes go
//! through the secured store like any other caller, so the seeder elevates a
//! local [`SecurityContext`] to `ROLE_ADMIN` and clears it afterwards.
//!
//! # Notes
//! Seeding is not de-duplicated; every start inserts the fixtures again into
//! the fresh in-memory store.
use crate::model::{EmployeeDraft, ItemDraft};
use crate::store::secured::SecuredStore;
use anyhow::Context;
use bastion_authz::{Role, SecurityContext};

pub const SYSTEM_PRINCIPAL: &str = "system";

pub const SEED_EMPLOYEES: [(&str, &str, &str); 3] = [
    ("Bilbo", "Baggins", "thief"),
    ("Frodo", "Baggins", "ring bearer"),
    ("Gandalf", "the Wizard", "servant of the Secret Fire"),
];

pub const SEED_ITEMS: [&str; 2] = ["Sting", "the one ring"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub employees: usize,
    pub items: usize,
}

/// Insert the fixtures as the `system` principal.
///
/// # Errors
/// - Any store failure, with the failing record named in the context. The
///   elevated principal is cleared before the error is returned.
pub async fn seed(store: &SecuredStore) -> anyhow::Result<SeedSummary> {
    let mut context = SecurityContext::anonymous();
    context.act_as(SYSTEM_PRINCIPAL, [Role::admin()]);
    let result = insert_fixtures(store, &context).await;
    context.clear();

    let summary = result?;
    tracing::info!(
        employees = summary.employees,
        items = summary.items,
        "roster seeded"
    );
    Ok(summary)
}

async fn insert_fixtures(
    store: &SecuredStore,
    context: &SecurityContext,
) -> anyhow::Result<SeedSummary> {
    let principal = context.principal();
    let mut summary = SeedSummary {
        employees: 0,
        items: 0,
    };

    for (first_name, last_name, title) in SEED_EMPLOYEES {
        store
            .create_employee(principal, EmployeeDraft::new(first_name, last_name, title))
            .await
            .with_context(|| format!("seed employee {first_name} {last_name}"))?;
        summary.employees += 1;
    }

    for name in SEED_ITEMS {
        store
            .create_item(principal, ItemDraft::new(name))
            .await
            .with_context(|| format!("seed item {name}"))?;
        summary.items += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use bastion_authz::{Operation, Policy, PolicyRule, Principal, ResourceType};
    use std::sync::Arc;

    fn admin() -> Principal {
        Principal::new("ollie", None, [Role::admin()])
    }

    #[tokio::test]
    async fn seeds_three_employees_and_two_items() {
        let store = SecuredStore::new(Arc::new(InMemoryStore::new()), Policy::standard());
        let summary = seed(&store).await.expect("seed");
        assert_eq!(
            summary,
            SeedSummary {
                employees: 3,
                items: 2
            }
        );

        let employees = store.list_employees(None).await.expect("employees");
        let names: Vec<_> = employees
            .iter()
            .map(|e| format!("{} {}", e.first_name, e.last_name))
            .collect();
        assert_eq!(names, ["Bilbo Baggins", "Frodo Baggins", "Gandalf the Wizard"]);
        assert_eq!(employees[2].title, "servant of the Secret Fire");

        let items = store.list_items(Some(&admin())).await.expect("items");
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Sting", "the one ring"]);
    }

    #[tokio::test]
    async fn reseeding_inserts_again() {
        let store = SecuredStore::new(Arc::new(InMemoryStore::new()), Policy::standard());
        seed(&store).await.expect("first");
        seed(&store).await.expect("second");
        assert_eq!(store.list_employees(None).await.expect("list").len(), 6);
    }

    #[tokio::test]
    async fn seeding_fails_when_policy_rejects_the_system_principal() {
        let policy = Policy::new(vec![PolicyRule::requires(
            ResourceType::Employee,
            Operation::Write,
            [Role::new("ROLE_ROOT")],
        )]);
        let store = SecuredStore::new(Arc::new(InMemoryStore::new()), policy);
        let err = seed(&store).await.expect_err("denied");
        assert!(err.to_string().contains("seed employee Bilbo Baggins"));
    }
}
