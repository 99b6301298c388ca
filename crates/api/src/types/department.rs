//! Department records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub department_id: i64,
    pub department_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_head: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub facility_type_id: i64,
    /// Empty from the details endpoint
    #[serde(default)]
    pub facility_type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

/// Response to a successful department delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentDeleted {
    pub message: String,
    #[serde(default)]
    pub workers_deleted: u64,
}
