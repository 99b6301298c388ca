//! Type definitions for API requests and responses.

mod department;
mod lookup;
mod worker;

pub use department::*;
pub use lookup::*;
pub use worker::*;

use serde::{Deserialize, Serialize};

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// JSON error body sent with 409 responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub message: String,
}
