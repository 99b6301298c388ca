/// Smallest accepted stroke width in pixels.
pub const MIN_STROKE_WIDTH: u32 = 1;

/// Largest accepted stroke width in pixels (matches the toolbar slider).
pub const MAX_STROKE_WIDTH: u32 = 50;

/// Prompt shown before discarding all edits.
pub const RESET_PROMPT: &str = "Reset to original image? All edits will be lost.";

/// Prompt shown before closing an editor that still holds edits.
pub const CLOSE_PROMPT: &str = "Close editor without saving?";

/// Shown when the source image cannot be loaded for editing.
pub const NO_IMAGE_MESSAGE: &str = "No image found to edit. Please upload an image first.";

/// Extra pixels scanned around a stroke for the anti-aliased edge.
pub const EDGE_FEATHER: f32 = 1.0;
