//! Medical worker records and the create/update payloads.

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// A worker as returned by the list and detail endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalWorker {
    pub worker_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub department_id: i64,
    #[serde(default)]
    pub department_name: String,
    pub specialization_id: i64,
    #[serde(default)]
    pub specialization_name: String,
    pub hire_date: String,
    pub salary: f64,
    pub license_number: String,
    #[serde(default)]
    pub has_image: bool,
    /// Optimistic concurrency token; required when updating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

impl MedicalWorker {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Build an update payload carrying this record's row version
    pub fn to_update(&self) -> WorkerUpdate {
        WorkerUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            department_id: self.department_id,
            specialization_id: self.specialization_id,
            hire_date: self.hire_date.clone(),
            salary: self.salary,
            license_number: self.license_number.clone(),
            row_version: self.row_version.clone().unwrap_or_default(),
        }
    }
}

/// Body of `POST /api/medical-workers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMedicalWorker {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub department_id: i64,
    pub specialization_id: i64,
    pub hire_date: String,
    pub salary: f64,
    pub license_number: String,
}

impl NewMedicalWorker {
    /// Department and specialization must both be chosen
    pub fn validate(&self) -> Result<(), FormError> {
        check_selection(self.department_id, self.specialization_id)
    }
}

/// Body of `PUT /api/medical-workers/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub department_id: i64,
    pub specialization_id: i64,
    pub hire_date: String,
    pub salary: f64,
    pub license_number: String,
    pub row_version: String,
}

impl WorkerUpdate {
    /// Checks done before the request is sent
    ///
    /// An empty row version means the record was never loaded from the server,
    /// so the update could silently overwrite someone else's change.
    pub fn validate(&self) -> Result<(), FormError> {
        check_selection(self.department_id, self.specialization_id)?;
        if self.row_version.trim().is_empty() {
            return Err(FormError::MissingRowVersion);
        }
        Ok(())
    }
}

fn check_selection(department_id: i64, specialization_id: i64) -> Result<(), FormError> {
    if department_id <= 0 || specialization_id <= 0 {
        return Err(FormError::MissingSelection);
    }
    Ok(())
}

/// Response to a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerCreated {
    pub message: String,
    pub worker_id: i64,
}
