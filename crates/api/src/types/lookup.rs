//! Lookup lists used to fill selection fields.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialization {
    pub specialization_id: i64,
    pub specialization_name: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityType {
    pub facility_type_id: i64,
    pub type_name: String,
    #[serde(default)]
    pub description: String,
}
