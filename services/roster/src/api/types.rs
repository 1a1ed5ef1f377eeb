//! HTTP API request/response types.
//!
//! # Purpose
//! Defines the HAL payload shapes served by the roster API and registered in
//! the OpenAPI document.
use crate::model::{Employee, Item};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
    pub backend: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Link relations keyed by name; ordered so responses are stable.
pub type Links = BTreeMap<String, Link>;

fn links<const N: usize>(pairs: [(&str, String); N]) -> Links {
    pairs
        .into_iter()
        .map(|(rel, href)| (rel.to_string(), Link::new(href)))
        .collect()
}

pub fn employee_href(id: u64) -> String {
    format!("/employees/{id}")
}

pub fn item_href(id: u64) -> String {
    format!("/items/{id}")
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct EmployeeResource {
    #[serde(flatten)]
    pub employee: Employee,
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

impl From<Employee> for EmployeeResource {
    fn from(employee: Employee) -> Self {
        let href = employee_href(employee.id);
        Self {
            links: links([("self", href.clone()), ("employee", href)]),
            employee,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ItemResource {
    #[serde(flatten)]
    pub item: Item,
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

impl From<Item> for ItemResource {
    fn from(item: Item) -> Self {
        let href = item_href(item.id);
        Self {
            links: links([("self", href.clone()), ("item", href)]),
            item,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct EmbeddedEmployees {
    pub employees: Vec<EmployeeResource>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct EmployeeCollection {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedEmployees,
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

impl EmployeeCollection {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            embedded: EmbeddedEmployees {
                employees: employees.into_iter().map(EmployeeResource::from).collect(),
            },
            links: links([("self", "/employees".to_string())]),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct EmbeddedItems {
    pub items: Vec<ItemResource>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ItemCollection {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedItems,
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

impl ItemCollection {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            embedded: EmbeddedItems {
                items: items.into_iter().map(ItemResource::from).collect(),
            },
            links: links([("self", "/items".to_string())]),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RootResource {
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

impl Default for RootResource {
    fn default() -> Self {
        Self {
            links: links([
                ("employees", "/employees".to_string()),
                ("items", "/items".to_string()),
                ("self", "/".to_string()),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_fields_sit_beside_links() {
        let resource = EmployeeResource::from(Employee {
            id: 2,
            first_name: "Frodo".to_string(),
            last_name: "Baggins".to_string(),
            title: "ring bearer".to_string(),
        });
        let value = serde_json::to_value(&resource).expect("encode");
        assert_eq!(value["id"], 2);
        assert_eq!(value["firstName"], "Frodo");
        assert_eq!(value["_links"]["self"]["href"], "/employees/2");
        assert_eq!(value["_links"]["employee"]["href"], "/employees/2");
    }

    #[test]
    fn collections_embed_under_plural_kind() {
        let value = serde_json::to_value(ItemCollection::new(vec![Item {
            id: 1,
            name: "Sting".to_string(),
        }]))
        .expect("encode");
        assert_eq!(value["_embedded"]["items"][0]["name"], "Sting");
        assert_eq!(value["_embedded"]["items"][0]["_links"]["item"]["href"], "/items/1");
        assert_eq!(value["_links"]["self"]["href"], "/items");

        let empty = serde_json::to_value(EmployeeCollection::new(Vec::new())).expect("encode");
        assert_eq!(empty["_embedded"]["employees"], serde_json::json!([]));
    }

    #[test]
    fn root_links_both_collections() {
        let value = serde_json::to_value(RootResource::default()).expect("encode");
        assert_eq!(value["_links"]["employees"]["href"], "/employees");
        assert_eq!(value["_links"]["items"]["href"], "/items");
        assert_eq!(value["_links"]["self"]["href"], "/");
    }
}
