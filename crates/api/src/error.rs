//! Error types for directory API responses.

use tracing::debug;

use crate::types::ErrorBody;

/// Error code the server sends with a 409 when `row_version` is stale
pub const CONCURRENCY_CONFLICT: &str = "CONCURRENCY_CONFLICT";

/// Error code the server sends when dependent records block a delete
pub const CONSTRAINT_ERROR: &str = "CONSTRAINT_ERROR";

/// A non-success response from the directory server
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The record changed since it was loaded; reload and retry
    #[error("Record was modified by another user: {message}")]
    ConcurrencyConflict { message: String },

    #[error("Conflict ({code}): {message}")]
    Conflict { code: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error: {status} - {body}")]
    Status { status: u16, body: String },
}

impl ApiError {
    /// Classify a non-2xx response from its status code and body text
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = body.trim();
        match status {
            409 => match serde_json::from_str::<ErrorBody>(body) {
                Ok(err) if err.error == CONCURRENCY_CONFLICT => ApiError::ConcurrencyConflict {
                    message: err.message,
                },
                Ok(err) => ApiError::Conflict {
                    code: err.error,
                    message: err.message,
                },
                Err(parse_err) => {
                    debug!("409 body is not an error object: {}", parse_err);
                    ApiError::Conflict {
                        code: String::new(),
                        message: if body.is_empty() {
                            "Conflict occurred".to_string()
                        } else {
                            body.to_string()
                        },
                    }
                }
            },
            404 => ApiError::NotFound(body.to_string()),
            _ => ApiError::Status {
                status,
                body: body.to_string(),
            },
        }
    }

    /// Whether the caller should offer to reload the latest record
    pub fn is_recoverable_conflict(&self) -> bool {
        matches!(self, ApiError::ConcurrencyConflict { .. })
    }

    /// Text suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::ConcurrencyConflict { .. } => {
                "This record was modified by another user. Please reload the record and try again."
                    .to_string()
            }
            ApiError::Conflict { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Client-side checks on form payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please select both department and specialization")]
    MissingSelection,

    #[error("Missing version information. Please reload the worker.")]
    MissingRowVersion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_conflict_is_distinct() {
        let err = ApiError::from_response(
            409,
            r#"{"error":"CONCURRENCY_CONFLICT","message":"This record has been modified by another user since you loaded it."}"#,
        );
        assert!(err.is_recoverable_conflict());
        assert!(matches!(
            err,
            ApiError::ConcurrencyConflict { ref message } if message.starts_with("This record")
        ));
    }

    #[test]
    fn test_constraint_conflict() {
        let err = ApiError::from_response(
            409,
            r#"{"error":"CONSTRAINT_ERROR","message":"Cannot delete department because it has related medical workers."}"#,
        );
        assert!(!err.is_recoverable_conflict());
        match &err {
            ApiError::Conflict { code, message } => {
                assert_eq!(code, CONSTRAINT_ERROR);
                assert_eq!(&err.user_message(), message);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_plain_text_conflict() {
        assert_eq!(
            ApiError::from_response(409, ""),
            ApiError::Conflict {
                code: String::new(),
                message: "Conflict occurred".into()
            }
        );
    }

    #[test]
    fn test_other_statuses() {
        assert_eq!(
            ApiError::from_response(404, "Worker not found\n"),
            ApiError::NotFound("Worker not found".into())
        );
        let err = ApiError::from_response(500, "Database error\n");
        assert_eq!(err.to_string(), "Server error: 500 - Database error");
        assert!(!err.is_recoverable_conflict());
    }
}
