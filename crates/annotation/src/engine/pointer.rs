//! Pointer event dispatch for the annotation engine

use tracing::trace;

use crate::input::{PointerEvent, PointerPhase, ViewportRect};
use crate::types::Region;

use super::AnnotationEngine;

impl AnnotationEngine {
    /// Feed one mouse or touch event into the stroke state machine
    ///
    /// `rect` is the surface's on-screen rectangle when the event fired. Down
    /// begins a stroke, Move extends it, Up and Cancel (pointer left the
    /// surface) end it. Moves while no stroke is active are hover and are
    /// ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent, rect: ViewportRect) -> Option<Region> {
        let point = rect.to_surface(event.x, event.y, self.width(), self.height());
        trace!(
            "{:?} {:?} at client ({:.1}, {:.1}) -> surface ({:.1}, {:.1})",
            event.kind, event.phase, event.x, event.y, point.x, point.y
        );

        match event.phase {
            PointerPhase::Down => self.begin_stroke(point),
            PointerPhase::Move => self.extend_stroke(point),
            PointerPhase::Up | PointerPhase::Cancel => {
                self.end_stroke();
                None
            }
        }
    }
}
