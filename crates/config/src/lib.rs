//! Shared configuration for medstaff
//!
//! This crate is the single source of truth for the image editor's bounding
//! box and tool defaults, and for how the directory API is reached. Both the
//! engine and the CLI read from here.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Maximum editor surface width in logical pixels
pub const DEFAULT_MAX_WIDTH: u32 = 600;

/// Maximum editor surface height in logical pixels
pub const DEFAULT_MAX_HEIGHT: u32 = 400;

/// Default paint color (opaque red)
pub const DEFAULT_COLOR: [u8; 4] = [0xFF, 0x00, 0x00, 0xFF];

/// Default stroke width in pixels
pub const DEFAULT_STROKE_WIDTH: u32 = 5;

/// Default directory API location
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of upload attempts before giving up
pub const DEFAULT_UPLOAD_RETRIES: u32 = 3;

/// Image editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Bounding box width the loaded image is fitted into
    pub max_width: u32,
    /// Bounding box height the loaded image is fitted into
    pub max_height: u32,
    /// Paint color selected when the editor opens (straight RGBA)
    pub default_color: [u8; 4],
    /// Stroke width selected when the editor opens
    pub default_stroke_width: u32,
    /// Maximum number of history snapshots kept (None = unbounded)
    pub max_history: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            default_color: DEFAULT_COLOR,
            default_stroke_width: DEFAULT_STROKE_WIDTH,
            max_history: None,
        }
    }
}

impl EditorConfig {
    /// Create a config with a custom bounding box
    pub fn with_bounds(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
            ..Default::default()
        }
    }

    /// Defaults overridden by `MEDSTAFF_MAX_HISTORY`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(limit) = env_parse::<usize>("MEDSTAFF_MAX_HISTORY") {
            // A zero cap would leave no room for the current state
            config.max_history = (limit > 0).then_some(limit);
        }
        config
    }
}

/// Directory API client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, without a trailing `/api`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// How many times an edited image upload is attempted
    pub upload_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            upload_retries: DEFAULT_UPLOAD_RETRIES,
        }
    }
}

impl ApiConfig {
    /// Create a config pointing at the given server
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Defaults overridden by `MEDSTAFF_API_URL`, `MEDSTAFF_API_TIMEOUT_SECS`
    /// and `MEDSTAFF_UPLOAD_RETRIES`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("MEDSTAFF_API_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }
        if let Some(secs) = env_parse("MEDSTAFF_API_TIMEOUT_SECS") {
            config.timeout_secs = secs;
        }
        if let Some(retries) = env_parse::<u32>("MEDSTAFF_UPLOAD_RETRIES") {
            config.upload_retries = retries.max(1);
        }
        config
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL with any trailing slash removed
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
