//! Errors surfaced by the command-line tool.

use annotation::{ExportError, LoadError};
use medstaff_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid edit script: {0}")]
    Script(#[from] serde_json::Error),

    #[error("Invalid worker file: {0}")]
    WorkerFile(serde_json::Error),

    #[error("Could not open image: {0}")]
    Load(#[from] LoadError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Upload failed after {attempts} attempts: {source}")]
    Upload {
        attempts: u32,
        #[source]
        source: ClientError,
    },

    #[error("Image load was superseded")]
    Superseded,

    #[error("Worker not found. Please try a different search term.")]
    WorkerNotFound,
}

impl AppError {
    /// Text for the user rather than the log
    pub fn user_message(&self) -> String {
        match self {
            AppError::Load(err) => err.user_message().to_string(),
            AppError::Client(ClientError::Api(err)) => err.user_message(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use medstaff_api::{ApiError, CONSTRAINT_ERROR};

    use super::*;

    #[test]
    fn test_conflicts_show_server_text() {
        let blocked = AppError::Client(ClientError::Api(ApiError::Conflict {
            code: CONSTRAINT_ERROR.into(),
            message: "Cannot delete department because it has related medical workers.".into(),
        }));
        assert_eq!(
            blocked.user_message(),
            "Cannot delete department because it has related medical workers."
        );

        let stale = AppError::Client(ClientError::Api(ApiError::ConcurrencyConflict {
            message: "stale".into(),
        }));
        assert!(stale.user_message().contains("modified by another user"));
    }
}
