//! Undo, redo and reset for the annotation engine

use tracing::{debug, info};

use crate::confirm::Confirm;
use crate::constants::RESET_PROMPT;

use super::AnnotationEngine;

impl AnnotationEngine {
    /// Step back one history entry
    ///
    /// An active stroke is ended (and committed) first. Returns true if the
    /// surface changed, false when already at the oldest entry.
    pub fn undo(&mut self) -> bool {
        self.close_stroke(true);

        let Some(snapshot) = self.history.undo() else {
            debug!("Undo: no entries available");
            return false;
        };
        let snapshot = snapshot.clone();
        self.surface.restore(&snapshot);

        debug!(
            "Undo: cursor now {} of {}",
            self.history.cursor(),
            self.history.len()
        );
        true
    }

    /// Step forward one history entry
    ///
    /// Returns true if the surface changed, false when already at the newest
    /// entry (including after a new edit discarded the redo entries).
    pub fn redo(&mut self) -> bool {
        self.close_stroke(true);

        let Some(snapshot) = self.history.redo() else {
            debug!("Redo: no entries available");
            return false;
        };
        let snapshot = snapshot.clone();
        self.surface.restore(&snapshot);

        debug!(
            "Redo: cursor now {} of {}",
            self.history.cursor(),
            self.history.len()
        );
        true
    }

    /// Discard every edit and return to the image as loaded
    ///
    /// Asks for confirmation first; nothing changes if the user declines.
    /// History is replaced by a single entry holding the original, so the
    /// reset itself cannot be undone.
    pub fn reset_to_original<C: Confirm + ?Sized>(&mut self, confirm: &mut C) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            debug!("Reset declined");
            return false;
        }

        if let Some(stroke) = self.stroke.take() {
            debug!("Reset drops active stroke with {} points", stroke.points.len());
            self.brush.end_stroke();
        }

        let discarded = self.history.len();
        self.surface.restore(&self.original);
        self.history.reset(self.original.clone());

        info!("Reset to original image ({discarded} history entries discarded)");
        true
    }
}
