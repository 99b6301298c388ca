//! Annotation engine
//!
//! This module connects the pieces of an editing session:
//! - Loading (decode, fit to the bounding box, initial snapshot)
//! - Brush engine (tool state and stroke geometry)
//! - CPU surface (segment rasterization)
//! - History (linear undo/redo of whole-surface snapshots)
//! - Export (PNG of the visible pixels)
//!
//! The engine is driven by plain method calls or by [`PointerEvent`]s and
//! does not depend on any UI toolkit.
//!
//! [`PointerEvent`]: crate::input::PointerEvent

mod io;
mod pointer;
mod stroke;
mod undo;

use medstaff_config::EditorConfig;

use crate::brush::{BrushEngine, ToolState};
use crate::history::History;
use crate::surface::{CpuSurface, Snapshot};
use crate::types::{Color, Point, Tool};

pub use io::fit_to_bounds;

/// In-progress stroke
#[derive(Debug, Clone, Default)]
pub struct ActiveStroke {
    /// Points received so far, in surface coordinates
    pub points: Vec<Point>,
    /// Whether any segment changed pixels after the initial dot commit
    pub(crate) dirty: bool,
}

/// One open editor: surface, tool state and history
///
/// Workflow:
/// 1. `open` decodes and fits the source bitmap
/// 2. Strokes come in via `begin_stroke`, `extend_stroke`, `end_stroke`
///    (or `handle_pointer`)
/// 3. Each stroke is committed to history as a unit
/// 4. `undo`/`redo`/`reset_to_original` move through history
/// 5. `export_bitmap` produces PNG bytes for upload
pub struct AnnotationEngine {
    /// CPU surface being edited
    pub(crate) surface: CpuSurface,
    /// Tool state and stroke geometry
    pub(crate) brush: BrushEngine,
    /// Surface as loaded, used only by reset
    pub(crate) original: Snapshot,
    /// Undo/redo history
    pub(crate) history: History,
    /// Current stroke (None if not drawing)
    pub(crate) stroke: Option<ActiveStroke>,
}

impl AnnotationEngine {
    /// Build an engine around an already-sized surface
    pub(crate) fn with_surface(surface: CpuSurface, config: &EditorConfig) -> Self {
        let original = surface.snapshot();
        Self {
            history: History::with_limit(original.clone(), config.max_history),
            original,
            surface,
            brush: BrushEngine::new(ToolState::from_config(config)),
            stroke: None,
        }
    }

    /// Get the surface width
    pub fn width(&self) -> u32 {
        self.surface.width
    }

    /// Get the surface height
    pub fn height(&self) -> u32 {
        self.surface.height
    }

    /// Read access to the visible surface
    pub fn surface(&self) -> &CpuSurface {
        &self.surface
    }

    /// Get a single pixel's color
    ///
    /// Returns None if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.surface.get_pixel(x, y)
    }

    /// Snapshot taken at load time
    pub fn original(&self) -> &Snapshot {
        &self.original
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current tool settings
    pub fn tool_state(&self) -> &ToolState {
        self.brush.state()
    }

    /// Select paint or erase
    pub fn select_tool(&mut self, tool: Tool) {
        self.brush.set_tool(tool);
    }

    /// Set the paint color
    pub fn set_color(&mut self, color: Color) {
        self.brush.set_color(color);
    }

    /// Set the paint color from a hex string such as `#00FF00`
    ///
    /// Malformed input is rejected and the current color is kept.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<Color, crate::ValidationError> {
        let color = hex.parse::<Color>()?;
        self.brush.set_color(color);
        Ok(color)
    }

    /// Set the stroke width; out-of-range values are clamped
    ///
    /// Returns the width actually in effect.
    pub fn set_stroke_width(&mut self, width: i64) -> u32 {
        self.brush.set_width(width)
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Points of the stroke in progress
    pub fn stroke_points(&self) -> Option<&[Point]> {
        self.stroke.as_ref().map(|s| s.points.as_slice())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
