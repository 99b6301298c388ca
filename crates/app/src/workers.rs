//! Worker record commands

use annotation::Confirm;
use medstaff_api::{ApiError, ApiMessage, MedicalWorker, WorkerUpdate, find_worker};
use medstaff_client::{ClientError, WorkerStore};
use tracing::{info, warn};

use crate::cli::WorkerChanges;
use crate::error::AppError;

/// Asked after the server reports a stale `row_version`
pub const RELOAD_PROMPT: &str = "Do you want to reload the current data?";

pub const DELETE_WORKER_PROMPT: &str = "Are you sure you want to delete this medical worker?";

pub const DELETE_PHOTO_PROMPT: &str = "Are you sure you want to delete the current image?";

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Saved(ApiMessage),
    /// Someone else saved first; this is their version and nothing was written
    Reloaded(MedicalWorker),
}

impl WorkerChanges {
    fn apply(&self, update: &mut WorkerUpdate) {
        if let Some(value) = &self.first_name {
            update.first_name = value.clone();
        }
        if let Some(value) = &self.last_name {
            update.last_name = value.clone();
        }
        if let Some(value) = &self.email {
            update.email = value.clone();
        }
        if let Some(value) = &self.phone {
            update.phone_number = value.clone();
        }
        if let Some(value) = self.department {
            update.department_id = value;
        }
        if let Some(value) = self.specialization {
            update.specialization_id = value;
        }
        if let Some(value) = &self.hire_date {
            update.hire_date = value.clone();
        }
        if let Some(value) = self.salary {
            update.salary = value;
        }
        if let Some(value) = &self.license {
            update.license_number = value.clone();
        }
        if let Some(value) = &self.row_version {
            update.row_version = value.clone();
        }
    }
}

/// Load a worker, apply `changes` and save
///
/// When the save hits a stale `row_version` the server's message is shown
/// with an offer to reload. Accepting returns the latest record so the
/// changes can be made again against it; declining returns the conflict.
pub async fn update<S, C>(
    store: &S,
    worker_id: i64,
    changes: &WorkerChanges,
    confirm: &mut C,
) -> Result<UpdateOutcome, AppError>
where
    S: WorkerStore,
    C: Confirm + ?Sized,
{
    let current = store.load_worker(worker_id).await?;
    let mut update = current.to_update();
    changes.apply(&mut update);
    update.validate().map_err(ClientError::from)?;

    match store.save_worker(worker_id, &update).await {
        Ok(message) => {
            info!("Updated worker {}", worker_id);
            Ok(UpdateOutcome::Saved(message))
        }
        Err(ClientError::Api(ApiError::ConcurrencyConflict { message })) => {
            warn!("Worker {} was modified by another user", worker_id);
            if confirm.confirm(&format!("{message}\n\n{RELOAD_PROMPT}")) {
                let latest = store.load_worker(worker_id).await?;
                Ok(UpdateOutcome::Reloaded(latest))
            } else {
                Err(ClientError::Api(ApiError::ConcurrencyConflict { message }).into())
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// Pick the worker a search term refers to
pub fn find(workers: &[MedicalWorker], term: &str) -> Result<MedicalWorker, AppError> {
    find_worker(workers, term)
        .cloned()
        .ok_or(AppError::WorkerNotFound)
}

/// One line of the worker table
pub fn summary_line(worker: &MedicalWorker) -> String {
    format!(
        "{:>5}  {:<24} {:<20} {:<20} {}",
        worker.worker_id,
        worker.full_name(),
        worker.department_name,
        worker.specialization_name,
        worker.email
    )
}

/// Every field, for `workers show`
pub fn details(worker: &MedicalWorker) -> String {
    let mut lines = vec![
        format!("Worker {}: {}", worker.worker_id, worker.full_name()),
        format!("  Email:          {}", worker.email),
        format!("  Phone:          {}", worker.phone_number),
        format!(
            "  Department:     {} ({})",
            worker.department_name, worker.department_id
        ),
        format!(
            "  Specialization: {} ({})",
            worker.specialization_name, worker.specialization_id
        ),
        format!("  Hire date:      {}", worker.hire_date),
        format!("  Salary:         {:.2}", worker.salary),
        format!("  License:        {}", worker.license_number),
        format!(
            "  Photo:          {}",
            if worker.has_image { "yes" } else { "no" }
        ),
    ];
    if let Some(experience) = &worker.experience {
        lines.push(format!("  Experience:     {experience}"));
    }
    if let Some(version) = &worker.row_version {
        lines.push(format!("  Row version:    {version}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use annotation::AutoConfirm;

    use super::*;

    const WORKER_JSON: &str = r#"{"worker_id":7,"first_name":"Ana","last_name":"Petrova",
        "email":"ana@example.org","phone_number":"555-0100","department_id":2,
        "department_name":"Cardiology","specialization_id":3,"specialization_name":"Surgeon",
        "hire_date":"2019-04-01","salary":5200.5,"license_number":"LIC-77",
        "row_version":"00000000000007D1"}"#;

    fn worker(version: &str) -> MedicalWorker {
        let mut worker: MedicalWorker = serde_json::from_str(WORKER_JSON).unwrap();
        worker.row_version = Some(version.into());
        worker
    }

    /// Record store that accepts only saves carrying its current version
    struct MemoryWorkers {
        record: RefCell<MedicalWorker>,
        loads: Cell<u32>,
        saved: RefCell<Vec<WorkerUpdate>>,
    }

    impl MemoryWorkers {
        fn new(record: MedicalWorker) -> Self {
            Self {
                record: RefCell::new(record),
                loads: Cell::new(0),
                saved: RefCell::new(Vec::new()),
            }
        }
    }

    impl WorkerStore for MemoryWorkers {
        async fn load_worker(&self, _worker_id: i64) -> Result<MedicalWorker, ClientError> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.record.borrow().clone())
        }

        async fn save_worker(
            &self,
            _worker_id: i64,
            update: &WorkerUpdate,
        ) -> Result<ApiMessage, ClientError> {
            if self.record.borrow().row_version.as_deref() != Some(update.row_version.as_str()) {
                return Err(ClientError::Api(ApiError::ConcurrencyConflict {
                    message: "This record has been modified by another user since you loaded it."
                        .into(),
                }));
            }
            self.saved.borrow_mut().push(update.clone());
            Ok(ApiMessage {
                message: "Medical worker updated successfully".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_update_applies_changes_to_loaded_record() {
        let store = MemoryWorkers::new(worker("00000000000007D1"));
        let changes = WorkerChanges {
            email: Some("a.petrova@example.org".into()),
            salary: Some(6100.0),
            ..Default::default()
        };

        let outcome = update(&store, 7, &changes, &mut AutoConfirm(false))
            .await
            .unwrap();
        assert!(matches!(outcome, UpdateOutcome::Saved(_)));

        let saved = store.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].email, "a.petrova@example.org");
        assert_eq!(saved[0].salary, 6100.0);
        assert_eq!(saved[0].first_name, "Ana");
        assert_eq!(saved[0].row_version, "00000000000007D1");
    }

    #[tokio::test]
    async fn test_stale_version_offers_reload() {
        let store = MemoryWorkers::new(worker("00000000000007D2"));
        let changes = WorkerChanges {
            phone: Some("555-0199".into()),
            row_version: Some("00000000000007D1".into()),
            ..Default::default()
        };
        let mut prompts = Vec::new();
        let mut accept = |prompt: &str| {
            prompts.push(prompt.to_string());
            true
        };

        let outcome = update(&store, 7, &changes, &mut accept).await.unwrap();
        let UpdateOutcome::Reloaded(latest) = outcome else {
            panic!("expected a reload");
        };
        assert_eq!(latest.row_version.as_deref(), Some("00000000000007D2"));
        assert_eq!(store.loads.get(), 2);
        assert!(store.saved.borrow().is_empty());

        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("This record has been modified by another user"));
        assert!(prompts[0].ends_with(RELOAD_PROMPT));
    }

    #[tokio::test]
    async fn test_declined_reload_keeps_conflict() {
        let store = MemoryWorkers::new(worker("00000000000007D2"));
        let changes = WorkerChanges {
            row_version: Some("00000000000007D1".into()),
            ..Default::default()
        };

        let err = update(&store, 7, &changes, &mut AutoConfirm(false))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Client(ref client) if client.is_recoverable_conflict()
        ));
        assert_eq!(store.loads.get(), 1);
    }

    #[tokio::test]
    async fn test_missing_selection_is_not_saved() {
        let store = MemoryWorkers::new(worker("00000000000007D1"));
        let changes = WorkerChanges {
            department: Some(0),
            ..Default::default()
        };

        let err = update(&store, 7, &changes, &mut AutoConfirm(true))
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Please select both department and specialization"
        );
        assert!(store.saved.borrow().is_empty());
    }

    #[test]
    fn test_find_by_id_or_name() {
        let workers = vec![worker("1")];
        assert_eq!(find(&workers, "7").unwrap().worker_id, 7);
        assert_eq!(find(&workers, "petrova").unwrap().worker_id, 7);
        let err = find(&workers, "Kolev").unwrap_err();
        assert_eq!(
            err.user_message(),
            "Worker not found. Please try a different search term."
        );
    }

    #[test]
    fn test_details_include_row_version() {
        let text = details(&worker("00000000000007D1"));
        assert!(text.starts_with("Worker 7: Ana Petrova"));
        assert!(text.contains("Cardiology (2)"));
        assert!(text.contains("Row version:    00000000000007D1"));
        assert!(summary_line(&worker("1")).contains("ana@example.org"));
    }
}
