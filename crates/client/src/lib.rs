//! HTTP client for the Worker Directory API
//!
//! [`DirectoryClient`] wraps every endpoint the admin tool uses. The photo
//! endpoints are also exposed through the [`ImageStore`] trait, and the worker
//! load/save pair through [`WorkerStore`], so the command flows can run
//! against in-memory stores in tests.

mod directory;

pub use directory::{DirectoryClient, Report};

use medstaff_api::{ApiError, ApiMessage, FormError, MedicalWorker, WorkerUpdate};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Rejected before sending
    #[error(transparent)]
    Form(#[from] FormError),
}

impl ClientError {
    /// Whether the failure is a stale `row_version` the user can reload from
    pub fn is_recoverable_conflict(&self) -> bool {
        matches!(self, ClientError::Api(err) if err.is_recoverable_conflict())
    }
}

/// Storage for worker photos
#[allow(async_fn_in_trait)]
pub trait ImageStore {
    /// Fetch the stored photo; `None` when the worker has no image
    async fn fetch_image(&self, worker_id: i64) -> Result<Option<Vec<u8>>, ClientError>;

    /// Replace the stored photo with PNG bytes
    async fn store_image(&self, worker_id: i64, png: Vec<u8>) -> Result<(), ClientError>;
}

/// Loading and saving worker records
#[allow(async_fn_in_trait)]
pub trait WorkerStore {
    /// Latest record, including its current `row_version`
    async fn load_worker(&self, worker_id: i64) -> Result<MedicalWorker, ClientError>;

    /// Save an update; a stale `row_version` is a recoverable conflict
    async fn save_worker(
        &self,
        worker_id: i64,
        update: &WorkerUpdate,
    ) -> Result<ApiMessage, ClientError>;
}
