//! medstaff annotation engine - freehand raster edits with undo/redo
//!
//! This crate turns a static bitmap into an editable surface:
//! - [`engine::AnnotationEngine`] - one open editor (surface, tools, history)
//! - [`session::EditorSession`] - idle/loading/editing lifecycle with stale-load protection
//! - [`surface`] - straight-alpha RGBA8 CPU surface and snapshots
//! - [`raster`] - round-capped segment rasterization (paint and erase)
//! - [`brush`] - tool state and stroke geometry
//! - [`history`] - linear undo/redo stack
//! - [`input`] - mouse/touch pointer events and viewport mapping

pub mod brush;
pub mod confirm;
pub mod constants;
pub mod engine;
pub mod error;
pub mod history;
pub mod input;
pub mod raster;
pub mod session;
pub mod surface;
pub mod types;
pub mod validation;

pub use brush::*;
pub use confirm::*;
pub use constants::*;
pub use engine::*;
pub use error::*;
pub use history::*;
pub use input::*;
pub use session::*;
pub use surface::*;
pub use types::*;
pub use validation::*;
