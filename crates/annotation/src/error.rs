//! Error types for loading and exporting bitmaps.

use thiserror::Error;

use crate::constants::NO_IMAGE_MESSAGE;

/// The source bitmap could not be turned into an editing surface.
///
/// The editor stays closed; the caller should prompt for a fresh upload.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Source image is empty")]
    Empty,

    #[error("Failed to decode source image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Source image has zero size ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },

    #[error("Failed to fetch source image: {0}")]
    Fetch(String),
}

impl LoadError {
    /// Message to show the user
    pub fn user_message(&self) -> &'static str {
        NO_IMAGE_MESSAGE
    }
}

/// Encoding the visible surface failed. History is left untouched.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Surface buffer does not match its dimensions ({width}x{height})")]
    Buffer { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}
