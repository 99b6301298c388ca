//! Department commands

use annotation::Confirm;
use medstaff_api::{Department, DepartmentDeleted};
use medstaff_client::DirectoryClient;
use tracing::info;

use crate::error::AppError;

/// Deleting a department also removes every worker in it
pub fn delete_prompt(department_name: &str) -> String {
    format!(
        "WARNING: This will delete the department \"{department_name}\" and ALL medical \
         workers in this department.\n\nAre you sure you want to delete this department?"
    )
}

pub async fn list(
    client: &DirectoryClient,
    facility_type: Option<i64>,
) -> Result<Vec<Department>, AppError> {
    let departments = match facility_type {
        Some(id) => client.departments_for_facility(id).await?,
        None => client.all_departments().await?,
    };
    info!("Loaded {} departments", departments.len());
    Ok(departments)
}

/// Confirm and delete a department
///
/// Returns `None` when the user declines. A delete blocked by dependent
/// records fails with the server's explanation.
pub async fn delete<C: Confirm + ?Sized>(
    client: &DirectoryClient,
    id: i64,
    confirm: &mut C,
) -> Result<Option<DepartmentDeleted>, AppError> {
    let department = client.department_details(id).await?;
    if !confirm.confirm(&delete_prompt(&department.department_name)) {
        return Ok(None);
    }
    Ok(Some(client.delete_department(id).await?))
}

/// One line of the department table
pub fn summary_line(department: &Department) -> String {
    format!(
        "{:>4}  {:<28} {:<20} {}",
        department.department_id,
        department.department_name,
        department.facility_type_name,
        department.location.as_deref().unwrap_or("-")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_prompt_names_department() {
        let prompt = delete_prompt("Radiology");
        assert!(prompt.contains("\"Radiology\" and ALL medical workers"));
        assert!(prompt.ends_with("Are you sure you want to delete this department?"));
    }

    #[test]
    fn test_summary_line_without_location() {
        let department: Department = serde_json::from_str(
            r#"{"department_id":4,"department_name":"Radiology","facility_type_id":1,"facility_type_name":"Hospital"}"#,
        )
        .unwrap();
        let line = summary_line(&department);
        assert!(line.starts_with("   4  Radiology"));
        assert!(line.ends_with(" -"));
    }
}
