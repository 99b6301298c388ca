//! Worker Directory API contract
//!
//! Wire types, endpoint paths and response classification for the directory
//! server. Nothing here performs I/O; see `medstaff-client` for the HTTP side.

pub mod endpoints;
pub mod error;
pub mod report;
pub mod search;
pub mod types;

pub use error::*;
pub use report::*;
pub use search::*;
pub use types::*;
