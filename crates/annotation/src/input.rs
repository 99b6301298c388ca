//! Pointer input abstraction for mouse and touch.
//!
//! Both device kinds produce the same [`PointerEvent`] in viewport
//! coordinates. The engine converts it to surface-local coordinates using the
//! surface's on-screen rectangle *at the time of the event*; callers pass the
//! rectangle with every event because layout can change between events.

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Phase of a pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed / finger down
    Down,
    /// Pointer moved
    Move,
    /// Button released / finger lifted
    Up,
    /// Pointer left the surface or the gesture was interrupted
    #[serde(alias = "leave")]
    Cancel,
}

/// Input device that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// A pointer event in viewport (client) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
    #[serde(default)]
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, phase: PointerPhase) -> Self {
        Self {
            x,
            y,
            phase,
            kind: PointerKind::Mouse,
        }
    }

    /// Event from the first active touch point
    pub fn touch(x: f32, y: f32, phase: PointerPhase) -> Self {
        Self {
            kind: PointerKind::Touch,
            ..Self::new(x, y, phase)
        }
    }
}

/// On-screen bounding rectangle of the surface, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle for a surface drawn at its natural size at `(left, top)`
    pub fn at_natural_size(left: f32, top: f32, surface_width: u32, surface_height: u32) -> Self {
        Self::new(left, top, surface_width as f32, surface_height as f32)
    }

    /// Map a viewport position to surface-local coordinates.
    ///
    /// When the surface is displayed scaled, the offset is rescaled to the
    /// surface's pixel grid. A degenerate (zero-sized) rectangle only
    /// subtracts the offset.
    pub fn to_surface(&self, x: f32, y: f32, surface_width: u32, surface_height: u32) -> Point {
        let local_x = x - self.left;
        let local_y = y - self.top;

        let scale_x = if self.width > 0.0 {
            surface_width as f32 / self.width
        } else {
            1.0
        };
        let scale_y = if self.height > 0.0 {
            surface_height as f32 / self.height
        } else {
            1.0
        };

        Point::new(local_x * scale_x, local_y * scale_y)
    }
}
