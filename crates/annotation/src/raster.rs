//! Segment rasterization for brush strokes

use tracing::debug;

use crate::brush::Segment;
use crate::constants::EDGE_FEATHER;
use crate::surface::CpuSurface;
use crate::types::{Point, Region, Tool};

impl CpuSurface {
    /// Rasterize a round-capped segment onto the surface.
    ///
    /// Every pixel whose center lies within `radius` of the segment is
    /// covered; pixels on the boundary get fractional coverage so edges are
    /// anti-aliased. Paint composites `color` source-over, erase clears alpha.
    ///
    /// # Returns
    /// Bounding box of the scanned region (x, y, width, height), or None if
    /// the segment is completely outside the surface.
    pub fn apply_segment(
        &mut self,
        segment: &Segment,
        color: [u8; 4],
        tool: Tool,
    ) -> Option<Region> {
        let radius = segment.radius;
        if radius <= 0.0 {
            debug!("  -> skipped: non-positive radius");
            return None;
        }

        let Segment { from, to, .. } = *segment;
        let reach = radius + EDGE_FEATHER;

        // Calculate bounding box
        let x_min_f = (from.x.min(to.x) - reach).floor();
        let y_min_f = (from.y.min(to.y) - reach).floor();
        let x_max_f = (from.x.max(to.x) + reach).ceil();
        let y_max_f = (from.y.max(to.y) + reach).ceil();

        // Clamp to surface bounds
        let x_min = (x_min_f.max(0.0) as u32).min(self.width);
        let y_min = (y_min_f.max(0.0) as u32).min(self.height);
        let x_max = (x_max_f.max(0.0) as u32).min(self.width);
        let y_max = (y_max_f.max(0.0) as u32).min(self.height);

        // Check if completely outside
        if x_min >= x_max || y_min >= y_max {
            return None;
        }

        for py in y_min..y_max {
            for px in x_min..x_max {
                // Distance from the pixel center to the segment
                let center = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                let distance = distance_to_segment(center, from, to);

                let coverage = edge_coverage(distance, radius);
                if coverage <= 0.0 {
                    continue;
                }

                match tool {
                    Tool::Paint => self.blend_pixel(px, py, color, coverage),
                    Tool::Erase => self.erase_pixel(px, py, coverage),
                }
            }
        }

        Some(Region::new(x_min, y_min, x_max - x_min, y_max - y_min))
    }
}

/// Shortest distance from `p` to the segment `a`-`b`
#[inline]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq <= f32::EPSILON {
        return p.distance_to(a);
    }

    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + abx * t, a.y + aby * t))
}

/// Fraction of a pixel covered by a stroke edge.
/// 1.0 inside the stroke, falling linearly to 0.0 across one pixel at the edge.
#[inline]
pub fn edge_coverage(distance: f32, radius: f32) -> f32 {
    (radius + 0.5 - distance).clamp(0.0, 1.0)
}
