//! Edit scripts: recorded editor input replayed against an engine
//!
//! A script is JSON:
//!
//! ```json
//! {
//!   "rect": { "left": 0, "top": 0, "width": 600, "height": 400 },
//!   "actions": [
//!     { "action": "set_color", "color": "#00FF00" },
//!     { "action": "pointer", "x": 10, "y": 10, "phase": "down" },
//!     { "action": "pointer", "x": 80, "y": 40, "phase": "move", "kind": "touch" },
//!     { "action": "pointer", "x": 80, "y": 40, "phase": "up" },
//!     { "action": "undo" }
//!   ]
//! }
//! ```
//!
//! Pointer events without their own `rect` use the script's; without either
//! the surface is taken to be shown at its natural size at the origin.

use annotation::{
    AnnotationEngine, Confirm, PointerEvent, PointerKind, PointerPhase, Tool, ViewportRect,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditScript {
    #[serde(default)]
    pub rect: Option<ViewportRect>,
    pub actions: Vec<EditAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditAction {
    SelectTool {
        tool: Tool,
    },
    SetColor {
        color: String,
    },
    SetWidth {
        width: i64,
    },
    Pointer {
        x: f32,
        y: f32,
        phase: PointerPhase,
        #[serde(default)]
        kind: PointerKind,
        #[serde(default)]
        rect: Option<ViewportRect>,
    },
    Undo,
    Redo,
    Reset,
}

/// What happened while replaying a script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    /// Inputs the engine refused, such as malformed colors
    pub rejected: usize,
    /// Resets the user declined
    pub declined: usize,
}

impl EditScript {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Feed every action into the engine in order
    ///
    /// A stroke still open at the end of the script is ended, as if the
    /// pointer had left the surface.
    pub fn replay<C: Confirm + ?Sized>(
        &self,
        engine: &mut AnnotationEngine,
        confirm: &mut C,
    ) -> ReplaySummary {
        let mut summary = ReplaySummary::default();

        for action in &self.actions {
            match action {
                EditAction::SelectTool { tool } => engine.select_tool(*tool),
                EditAction::SetColor { color } => {
                    if let Err(err) = engine.set_color_hex(color) {
                        warn!("Skipping color change: {}", err);
                        summary.rejected += 1;
                        continue;
                    }
                }
                EditAction::SetWidth { width } => {
                    let applied = engine.set_stroke_width(*width);
                    if i64::from(applied) != *width {
                        debug!("Stroke width {} clamped to {}", width, applied);
                    }
                }
                EditAction::Pointer {
                    x,
                    y,
                    phase,
                    kind,
                    rect,
                } => {
                    let rect = rect.or(self.rect).unwrap_or_else(|| {
                        ViewportRect::at_natural_size(0.0, 0.0, engine.width(), engine.height())
                    });
                    let event = PointerEvent {
                        x: *x,
                        y: *y,
                        phase: *phase,
                        kind: *kind,
                    };
                    engine.handle_pointer(event, rect);
                }
                EditAction::Undo => {
                    engine.undo();
                }
                EditAction::Redo => {
                    engine.redo();
                }
                EditAction::Reset => {
                    if !engine.reset_to_original(confirm) {
                        summary.declined += 1;
                        continue;
                    }
                }
            }
            summary.applied += 1;
        }

        if engine.is_stroking() {
            debug!("Script ended mid-stroke; closing it");
            engine.end_stroke();
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use annotation::AutoConfirm;
    use image::{ImageFormat, RgbaImage};

    use super::*;

    fn engine(width: u32, height: u32) -> AnnotationEngine {
        let image = RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        AnnotationEngine::open(&buffer.into_inner()).unwrap()
    }

    const SCRIPT: &str = r##"{
        "actions": [
            { "action": "set_color", "color": "#00FF00" },
            { "action": "set_width", "width": 9 },
            { "action": "pointer", "x": 10, "y": 10, "phase": "down" },
            { "action": "pointer", "x": 40, "y": 10, "phase": "move", "kind": "touch" },
            { "action": "pointer", "x": 40, "y": 10, "phase": "up" },
            { "action": "select_tool", "tool": "eraser" },
            { "action": "pointer", "x": 50, "y": 50, "phase": "down" },
            { "action": "pointer", "x": 55, "y": 50, "phase": "leave" }
        ]
    }"##;

    #[test]
    fn test_replay_draws_and_erases() {
        let script = EditScript::from_json(SCRIPT).unwrap();
        let mut engine = engine(64, 64);

        let summary = script.replay(&mut engine, &mut AutoConfirm(false));
        assert_eq!(summary.applied, 8);
        assert_eq!(summary.rejected, 0);

        assert_eq!(engine.get_pixel(25, 10), Some([0, 255, 0, 255]));
        assert_eq!(engine.get_pixel(52, 50).map(|p| p[3]), Some(0));
        // Two strokes, two entries each
        assert_eq!(engine.history().len(), 5);
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let script = EditScript::from_json(
            r##"{"actions":[{"action":"set_color","color":"#GG0000"},{"action":"pointer","x":5,"y":5,"phase":"down"}]}"##,
        )
        .unwrap();
        let mut engine = engine(16, 16);

        let summary = script.replay(&mut engine, &mut AutoConfirm(true));
        assert_eq!(summary.rejected, 1);
        // Default red still active; unfinished stroke was closed
        assert_eq!(engine.get_pixel(5, 5), Some([255, 0, 0, 255]));
        assert!(!engine.is_stroking());
    }

    #[test]
    fn test_scaled_rect_from_script() {
        let script = EditScript::from_json(
            r#"{
                "rect": {"left": 100, "top": 0, "width": 32, "height": 32},
                "actions": [
                    {"action":"pointer","x":108,"y":8,"phase":"down"},
                    {"action":"pointer","x":108,"y":8,"phase":"up"}
                ]
            }"#,
        )
        .unwrap();
        let mut engine = engine(64, 64);
        script.replay(&mut engine, &mut AutoConfirm(true));
        // Shown at half size, so (8, 8) on screen is (16, 16) on the surface
        assert_eq!(engine.get_pixel(16, 16), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_declined_reset_keeps_edits() {
        let script = EditScript::from_json(
            r#"{"actions":[
                {"action":"pointer","x":5,"y":5,"phase":"down"},
                {"action":"pointer","x":5,"y":5,"phase":"up"},
                {"action":"reset"}
            ]}"#,
        )
        .unwrap();

        let mut declined = engine(16, 16);
        let summary = script.replay(&mut declined, &mut AutoConfirm(false));
        assert_eq!(summary.declined, 1);
        assert_eq!(declined.history().len(), 3);

        let mut accepted = engine(16, 16);
        script.replay(&mut accepted, &mut AutoConfirm(true));
        assert_eq!(accepted.history().len(), 1);
        assert!(accepted.surface().matches(accepted.original()));
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        assert!(EditScript::from_json(r#"{"actions":[{"action":"rotate"}]}"#).is_err());
    }
}
