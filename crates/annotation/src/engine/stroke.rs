//! Stroke handling for the annotation engine

use tracing::debug;

use crate::brush::Segment;
use crate::types::{Point, Region};

use super::{ActiveStroke, AnnotationEngine};

impl AnnotationEngine {
    /// Begin a stroke at `at` (surface coordinates)
    ///
    /// Renders a dot right away, so a click or tap alone leaves a mark, and
    /// commits it to history. If a stroke is already active it is ended
    /// first; that implicit end only commits when the previous stroke
    /// changed pixels after its own dot commit.
    pub fn begin_stroke(&mut self, at: Point) -> Option<Region> {
        if self.stroke.is_some() {
            debug!("begin_stroke: stroke already active, ending it first");
            self.close_stroke(false);
        }

        let dot = self.brush.begin_stroke(at);
        let region = self.apply_segment(&dot);

        self.stroke = Some(ActiveStroke {
            points: vec![at],
            dirty: false,
        });
        self.commit();

        region
    }

    /// Continue the active stroke to `to`
    ///
    /// Renders a connected segment from the previous point with the active
    /// tool. Does nothing if no stroke is active.
    pub fn extend_stroke(&mut self, to: Point) -> Option<Region> {
        let Some(stroke) = self.stroke.as_mut() else {
            debug!("extend_stroke: no active stroke, ignoring");
            return None;
        };
        stroke.points.push(to);

        let segment = self.brush.stroke_to(to)?;
        let region = self.apply_segment(&segment);

        if region.is_some() {
            if let Some(stroke) = self.stroke.as_mut() {
                stroke.dirty = true;
            }
        }
        region
    }

    /// End the active stroke and commit the surface to history
    ///
    /// Returns false (and commits nothing) if no stroke was active.
    pub fn end_stroke(&mut self) -> bool {
        if self.stroke.is_none() {
            return false;
        }
        self.close_stroke(true);
        true
    }

    /// Clear stroke state, committing when forced or when the stroke is dirty
    pub(crate) fn close_stroke(&mut self, always_commit: bool) {
        let Some(stroke) = self.stroke.take() else {
            return;
        };
        self.brush.end_stroke();

        if always_commit || stroke.dirty {
            self.commit();
        }

        debug!(
            "Stroke ended after {} points (history {} entries, cursor {})",
            stroke.points.len(),
            self.history.len(),
            self.history.cursor()
        );
    }

    /// Rasterize a segment with the current tool state
    pub(crate) fn apply_segment(&mut self, segment: &Segment) -> Option<Region> {
        let state = *self.brush.state();
        let result = self
            .surface
            .apply_segment(segment, state.color.to_array(), state.tool);
        if result.is_none() {
            debug!("    -> segment outside surface bounds");
        }
        result
    }

    /// Record the visible surface as a new history entry
    pub(crate) fn commit(&mut self) {
        self.history.commit(self.surface.snapshot());
    }
}
