//! Resource kinds covered by the access policy.
//!
//! # Purpose
//! Names the things a policy rule can protect: the root listing plus the two
//! roster collections.
//!
//! # Key invariants
//! - `as_str` values are stable; they appear in logs and metric labels.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// The API root listing of available collections.
    Root,
    Employee,
    Item,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Root => "root",
            ResourceType::Employee => "employee",
            ResourceType::Item => "item",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceType;

    #[test]
    fn resource_names() {
        assert_eq!(ResourceType::Root.as_str(), "root");
        assert_eq!(ResourceType::Employee.to_string(), "employee");
        assert_eq!(ResourceType::Item.to_string(), "item");
    }
}
