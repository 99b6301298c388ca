//! Brush state and stroke geometry
//!
//! The brush engine turns pointer positions into round-capped segments.
//! It knows nothing about pixels; `raster` applies the segments to a surface.

use medstaff_config::EditorConfig;
use tracing::debug;

use crate::types::{Color, Point, Tool};
use crate::validation::clamp_stroke_width;

/// Toolbar state for one editor session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolState {
    /// Paint or erase
    pub tool: Tool,
    /// Paint color (ignored while erasing)
    pub color: Color,
    /// Stroke width in pixels, always within the accepted range
    pub width: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl ToolState {
    /// Defaults taken from the editor configuration
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            tool: Tool::Paint,
            color: Color::from(config.default_color),
            width: clamp_stroke_width(config.default_stroke_width as i64),
        }
    }

    /// Stroke radius in pixels
    #[inline]
    pub fn radius(&self) -> f32 {
        self.width as f32 / 2.0
    }
}

/// A round-capped line segment to rasterize
///
/// `from == to` describes a single dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    /// Half the stroke width
    pub radius: f32,
}

impl Segment {
    pub fn dot(at: Point, radius: f32) -> Self {
        Self {
            from: at,
            to: at,
            radius,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.from.distance_to(self.to)
    }
}

/// Brush engine that turns stroke input into segments
pub struct BrushEngine {
    /// Current tool settings
    state: ToolState,
    /// Last position (None if stroke not started)
    last_pos: Option<Point>,
}

impl BrushEngine {
    /// Create a new brush engine with the given tool state
    pub fn new(state: ToolState) -> Self {
        Self {
            state,
            last_pos: None,
        }
    }

    /// Get the current tool state
    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.state.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    /// Set the stroke width, clamped to the accepted range
    /// Returns the width actually stored.
    pub fn set_width(&mut self, width: i64) -> u32 {
        self.state.width = clamp_stroke_width(width);
        self.state.width
    }

    /// Start a new stroke, returning the initial dot
    pub fn begin_stroke(&mut self, at: Point) -> Segment {
        self.last_pos = Some(at);
        debug!(
            "BrushEngine::begin_stroke at ({:.1}, {:.1}), width={}",
            at.x, at.y, self.state.width
        );
        Segment::dot(at, self.state.radius())
    }

    /// Continue the stroke to a new position
    ///
    /// Returns None if no stroke is active or the position did not move.
    pub fn stroke_to(&mut self, to: Point) -> Option<Segment> {
        let from = self.last_pos?;

        if from.distance_to(to) < 0.001 {
            // No significant movement
            return None;
        }

        self.last_pos = Some(to);
        Some(Segment {
            from,
            to,
            radius: self.state.radius(),
        })
    }

    /// End the current stroke
    pub fn end_stroke(&mut self) {
        self.last_pos = None;
    }

    pub fn is_stroking(&self) -> bool {
        self.last_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};

    #[test]
    fn test_tool_state_default() {
        let state = ToolState::default();
        assert_eq!(state.tool, Tool::Paint);
        assert_eq!(state.color, Color::RED);
        assert_eq!(state.width, 5);
        assert!((state.radius() - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_first_segment_is_dot() {
        let mut engine = BrushEngine::new(ToolState::default());
        let dot = engine.begin_stroke(Point::new(10.0, 10.0));
        assert_eq!(dot.from, dot.to);
        assert_eq!(dot.length(), 0.0);
        assert!(engine.is_stroking());
    }

    #[test]
    fn test_stroke_to_connects_from_last_point() {
        let mut engine = BrushEngine::new(ToolState::default());
        engine.begin_stroke(Point::new(0.0, 0.0));

        let first = engine.stroke_to(Point::new(10.0, 0.0)).unwrap();
        assert_eq!(first.from, Point::new(0.0, 0.0));
        let second = engine.stroke_to(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(second.from, Point::new(10.0, 0.0));
        assert!((second.length() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_stroke_to_without_stroke_is_ignored() {
        let mut engine = BrushEngine::new(ToolState::default());
        assert!(engine.stroke_to(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_no_segment_for_zero_movement() {
        let mut engine = BrushEngine::new(ToolState::default());
        engine.begin_stroke(Point::new(3.0, 3.0));
        assert!(engine.stroke_to(Point::new(3.0, 3.0)).is_none());
    }

    #[test]
    fn test_set_width_clamps() {
        let mut engine = BrushEngine::new(ToolState::default());
        assert_eq!(engine.set_width(0), MIN_STROKE_WIDTH);
        assert_eq!(engine.set_width(-3), MIN_STROKE_WIDTH);
        assert_eq!(engine.set_width(999), MAX_STROKE_WIDTH);
        assert_eq!(engine.set_width(12), 12);
        assert_eq!(engine.state().width, 12);
    }

    #[test]
    fn test_end_stroke() {
        let mut engine = BrushEngine::new(ToolState::default());
        engine.begin_stroke(Point::new(0.0, 0.0));
        engine.end_stroke();
        assert!(!engine.is_stroking());
        assert!(engine.stroke_to(Point::new(1.0, 1.0)).is_none());
    }
}
