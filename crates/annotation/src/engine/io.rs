//! Loading and exporting bitmaps

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use medstaff_config::EditorConfig;
use tracing::{debug, info};

use crate::error::{ExportError, LoadError};
use crate::surface::CpuSurface;

use super::AnnotationEngine;

/// Compute the display size of an image inside a bounding box
///
/// Aspect ratio is preserved. The width is fitted first, then the height is
/// re-checked and fitted again if it still overflows. Images already inside
/// the box keep their size. Results are truncated to whole pixels and never
/// drop below 1.
pub fn fit_to_bounds(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let mut w = width as f64;
    let mut h = height as f64;
    let max_w = max_width.max(1) as f64;
    let max_h = max_height.max(1) as f64;

    if w > max_w {
        h = h * max_w / w;
        w = max_w;
    }
    if h > max_h {
        w = w * max_h / h;
        h = max_h;
    }

    ((w as u32).max(1), (h as u32).max(1))
}

impl AnnotationEngine {
    /// Open an encoded bitmap (PNG, JPEG, ...) with the default configuration
    pub fn open(bytes: &[u8]) -> Result<Self, LoadError> {
        Self::open_with_config(bytes, &EditorConfig::default())
    }

    /// Open an encoded bitmap with an explicit configuration
    pub fn open_with_config(bytes: &[u8], config: &EditorConfig) -> Result<Self, LoadError> {
        if bytes.is_empty() {
            return Err(LoadError::Empty);
        }
        let image = image::load_from_memory(bytes)?;
        Self::from_image(&image, config)
    }

    /// Start an editing session from a decoded image
    ///
    /// The image is scaled into the configured bounding box; the result is
    /// both the original snapshot and the first history entry. Tool state
    /// starts from the configured defaults.
    pub fn from_image(image: &DynamicImage, config: &EditorConfig) -> Result<Self, LoadError> {
        let (src_width, src_height) = (image.width(), image.height());
        if src_width == 0 || src_height == 0 {
            return Err(LoadError::ZeroSize {
                width: src_width,
                height: src_height,
            });
        }

        let (width, height) =
            fit_to_bounds(src_width, src_height, config.max_width, config.max_height);

        let rgba = image.to_rgba8();
        let fitted: RgbaImage = if (width, height) == (src_width, src_height) {
            rgba
        } else {
            image::imageops::resize(&rgba, width, height, FilterType::Triangle)
        };

        info!(
            "Opened {}x{} image as {}x{} surface",
            src_width, src_height, width, height
        );
        Ok(Self::with_surface(CpuSurface::from_image(&fitted), config))
    }

    /// Encode the visible surface as PNG
    ///
    /// The output carries exactly the pixels on screen, including the
    /// transparency left by erase strokes. History is not touched, so a
    /// failed export or upload can simply be retried.
    pub fn export_bitmap(&self) -> Result<Vec<u8>, ExportError> {
        let image = self.surface.to_image().ok_or(ExportError::Buffer {
            width: self.surface.width,
            height: self.surface.height,
        })?;

        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png)?;
        let bytes = buffer.into_inner();

        debug!(
            "Exported {}x{} surface as {} PNG bytes",
            self.surface.width,
            self.surface.height,
            bytes.len()
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, Tool};

    fn png_bytes(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, image::Rgba(pixel));
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_fit_to_bounds() {
        assert_eq!(fit_to_bounds(1200, 800, 600, 400), (600, 400));
        // Width fit leaves height too tall, second pass fixes it
        assert_eq!(fit_to_bounds(800, 1000, 600, 400), (320, 400));
        // Tall and narrow only needs the height pass
        assert_eq!(fit_to_bounds(300, 800, 600, 400), (150, 400));
        // Small images are not upscaled
        assert_eq!(fit_to_bounds(120, 90, 600, 400), (120, 90));
        assert_eq!(fit_to_bounds(1000, 300, 600, 400), (600, 180));
        // Extreme aspect ratios never collapse to zero
        assert_eq!(fit_to_bounds(100_000, 1, 600, 400), (600, 1));
    }

    #[test]
    fn test_open_scales_to_box() {
        let engine = AnnotationEngine::open(&png_bytes(1200, 800, [0, 128, 0, 255])).unwrap();
        assert_eq!((engine.width(), engine.height()), (600, 400));
        let [r, g, b, a] = engine.get_pixel(300, 200).unwrap();
        assert_eq!((r, b), (0, 0));
        assert!((g as i32 - 128).abs() <= 1);
        assert_eq!(a, 255);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history().cursor(), 0);
        assert_eq!(engine.history().current(), engine.original());
    }

    #[test]
    fn test_open_respects_configured_box() {
        let config = EditorConfig::with_bounds(100, 100);
        let engine =
            AnnotationEngine::open_with_config(&png_bytes(400, 200, [1, 2, 3, 255]), &config)
                .unwrap();
        assert_eq!((engine.width(), engine.height()), (100, 50));
    }

    #[test]
    fn test_open_rejects_bad_input() {
        assert!(matches!(AnnotationEngine::open(&[]), Err(LoadError::Empty)));
        assert!(matches!(
            AnnotationEngine::open(b"definitely not an image"),
            Err(LoadError::Decode(_))
        ));
    }

    #[test]
    fn test_open_resets_tool_state() {
        let bytes = png_bytes(10, 10, [255, 255, 255, 255]);
        let mut first = AnnotationEngine::open(&bytes).unwrap();
        first.select_tool(Tool::Erase);
        first.set_stroke_width(30);

        let second = AnnotationEngine::open(&bytes).unwrap();
        assert_eq!(second.tool_state().tool, Tool::Paint);
        assert_eq!(second.tool_state().width, 5);
    }

    #[test]
    fn test_export_is_decodable_png() {
        let mut engine = AnnotationEngine::open(&png_bytes(40, 30, [255, 255, 255, 255])).unwrap();
        engine.begin_stroke(Point::new(20.0, 15.0));
        engine.end_stroke();

        let bytes = engine.export_bitmap().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (40, 30));
        assert_eq!(decoded.get_pixel(20, 15).0, [255, 0, 0, 255]);
        // Export does not touch history
        assert_eq!(engine.history().len(), 3);
    }

    #[test]
    fn test_erase_survives_export_as_transparency() {
        let mut engine = AnnotationEngine::open(&png_bytes(40, 40, [0, 0, 255, 255])).unwrap();
        engine.select_tool(Tool::Erase);
        engine.set_stroke_width(12);
        engine.begin_stroke(Point::new(5.0, 20.0));
        engine.extend_stroke(Point::new(35.0, 20.0));
        engine.end_stroke();

        let decoded = image::load_from_memory(&engine.export_bitmap().unwrap())
            .unwrap()
            .to_rgba8();
        for x in 8..32 {
            assert_eq!(decoded.get_pixel(x, 20).0[3], 0, "alpha at ({x}, 20)");
        }
        assert_eq!(decoded.get_pixel(20, 2).0, [0, 0, 255, 255]);
    }
}
