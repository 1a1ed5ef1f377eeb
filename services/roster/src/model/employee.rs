//! Employee records and drafts.
//!
//! # Purpose
//! Field names are camelCase on the wire (`firstName`, `lastName`, `title`).
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
}

/// Employee fields supplied by a client; the store assigns the id.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
}

impl EmployeeDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            title: title.into(),
        }
    }

    pub fn into_employee(self, id: u64) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            title: self.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_uses_camel_case_fields() {
        let draft: EmployeeDraft = serde_json::from_str(
            r#"{"firstName": "Saruman", "lastName": "the White", "title": "Wizard"}"#,
        )
        .expect("decode");
        assert_eq!(draft, EmployeeDraft::new("Saruman", "the White", "Wizard"));

        let employee = draft.into_employee(4);
        let value = serde_json::to_value(&employee).expect("encode");
        assert_eq!(value["id"], 4);
        assert_eq!(value["firstName"], "Saruman");
        assert_eq!(value["lastName"], "the White");
    }
}
