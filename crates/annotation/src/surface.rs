//! CPU surface for annotation - straight-alpha RGBA8 storage

use std::sync::Arc;

use image::RgbaImage;
use tracing::warn;

/// An RGBA8 CPU surface
/// Stores pixels as [r, g, b, a] with straight (non-premultiplied) alpha,
/// the same layout a 2D canvas exposes through its image data.
pub struct CpuSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order
    pixels: Vec<[u8; 4]>,
}

/// Immutable copy of a surface's pixels
///
/// Cloning is cheap; the pixel buffer is shared.
#[derive(Debug, Clone)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Arc<[[u8; 4]]>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Pixel at the given coordinates, None if out of bounds
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.pixels == other.pixels
    }
}

impl Eq for Snapshot {}

impl CpuSurface {
    /// Create a new surface with the given dimensions, initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 0]; pixel_count],
        }
    }

    /// Create a surface holding a copy of an RGBA image
    pub fn from_image(image: &RgbaImage) -> Self {
        let byte_len = (image.width() as usize) * (image.height() as usize) * 4;
        Self {
            width: image.width(),
            height: image.height(),
            pixels: bytemuck::cast_slice(&image.as_raw()[..byte_len]).to_vec(),
        }
    }

    /// Clear the surface to a solid color
    pub fn clear(&mut self, color: [u8; 4]) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set a pixel at the given coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Composite a color over an existing pixel (source-over)
    /// `coverage` (0-1) scales the source alpha, for anti-aliased edges.
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4], coverage: f32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let dst = self.pixels[i];

        let src_alpha = (color[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if src_alpha <= 0.0 {
            return;
        }
        let dst_alpha = dst[3] as f32 / 255.0;
        let dst_weight = dst_alpha * (1.0 - src_alpha);
        let out_alpha = src_alpha + dst_weight;

        let channel = |s: u8, d: u8| -> u8 {
            let value = (s as f32 * src_alpha + d as f32 * dst_weight) / out_alpha;
            value.round().clamp(0.0, 255.0) as u8
        };

        self.pixels[i] = [
            channel(color[0], dst[0]),
            channel(color[1], dst[1]),
            channel(color[2], dst[2]),
            (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ];
    }

    /// Erase a pixel by reducing its alpha (destination-out)
    /// A fully erased pixel becomes transparent black, never a background color.
    #[inline]
    pub fn erase_pixel(&mut self, x: u32, y: u32, coverage: f32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let dst = self.pixels[i];

        let remaining = (1.0 - coverage.clamp(0.0, 1.0)) * dst[3] as f32;
        let alpha = remaining.round() as u8;
        self.pixels[i] = if alpha == 0 {
            [0, 0, 0, 0]
        } else {
            [dst[0], dst[1], dst[2], alpha]
        };
    }

    /// Take an immutable copy of the current pixels
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: Arc::from(self.pixels.as_slice()),
        }
    }

    /// Overwrite the surface with a snapshot of the same dimensions
    /// Returns false (and leaves the surface alone) on a size mismatch.
    pub fn restore(&mut self, snapshot: &Snapshot) -> bool {
        if snapshot.width != self.width || snapshot.height != self.height {
            warn!(
                "Refusing to restore {}x{} snapshot onto {}x{} surface",
                snapshot.width, snapshot.height, self.width, self.height
            );
            return false;
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
        true
    }

    /// Whether the surface currently shows exactly the snapshot's pixels
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        self.width == snapshot.width
            && self.height == snapshot.height
            && self.pixels[..] == snapshot.pixels[..]
    }

    /// Get raw pixel data as bytes (RGBA8, row-major)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy the surface into an `image` buffer
    pub fn to_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Get direct access to pixel data
    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }
}
