//! Request paths for the directory server
//!
//! Paths are relative to the server root and always start with `/api`.

/// Optional filters for the worker list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerFilter {
    pub department_id: Option<i64>,
    pub specialization_id: Option<i64>,
}

impl WorkerFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = self.department_id {
            query.push(("department_id", id.to_string()));
        }
        if let Some(id) = self.specialization_id {
            query.push(("specialization_id", id.to_string()));
        }
        query
    }
}

pub const WORKERS: &str = "/api/medical-workers";
pub const ALL_DEPARTMENTS: &str = "/api/all-departments";
pub const DEPARTMENTS: &str = "/api/departments";
pub const SPECIALIZATIONS: &str = "/api/specializations";
pub const FACILITY_TYPES: &str = "/api/facility-types";
pub const DOWNLOAD_REPORT: &str = "/api/download-report";

pub fn worker(id: i64) -> String {
    format!("{WORKERS}/{id}")
}

pub fn worker_image(id: i64) -> String {
    format!("{WORKERS}/{id}/image")
}

pub fn department(id: i64) -> String {
    format!("{DEPARTMENTS}/{id}")
}

pub fn department_details(id: i64) -> String {
    format!("/api/department-details/{id}")
}

/// Query for departments of one facility type
pub fn departments_query(facility_type_id: i64) -> [(&'static str, String); 1] {
    [("facility_type_id", facility_type_id.to_string())]
}

/// Join a base URL and a path without doubling the slash
pub fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
