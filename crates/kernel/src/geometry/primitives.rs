//! Pure planar helpers shared by the lofting and flat-pattern code:
//! rectangles, interpolation, easing, polygon area/perimeter and
//! composite-area centroids.

use super::point::{Point2d, Point3d};
use crate::default_tolerance;

/// Unit-square corner sequence. Every rectangle in the crate uses this winding.
const RECT_SEQUENCE: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Rectangle `width x height` with its first corner at `origin`.
pub fn corner_rectangle(width: f64, height: f64, origin: Point2d) -> [Point2d; 4] {
    RECT_SEQUENCE.map(|(u, v)| Point2d::new(origin.x + u * width, origin.y + v * height))
}

/// Rectangle `w x h` centered on `(cx, cy)` at elevation `z`, same winding as
/// [`corner_rectangle`].
pub fn centered_rectangle(cx: f64, cy: f64, w: f64, h: f64, z: f64) -> [Point3d; 4] {
    let hw = w / 2.0;
    let hh = h / 2.0;
    [
        Point3d::new(cx - hw, cy - hh, z),
        Point3d::new(cx + hw, cy - hh, z),
        Point3d::new(cx + hw, cy + hh, z),
        Point3d::new(cx - hw, cy + hh, z),
    ]
}

/// Linear interpolation. Returns `a` at `t = 0` and `b` at `t = 1` exactly.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Hermite smoothstep on `[0, 1]`.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Eased parameter `smoothstep(t^curvature)`. Fixes both endpoints.
pub fn eased(t: f64, curvature: f64) -> f64 {
    smoothstep(t.powf(curvature))
}

/// Polygon area via the shoelace formula. Orientation-independent.
pub fn polygon_area(points: &[Point2d]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let sum: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    sum.abs() / 2.0
}

/// Closed perimeter (last point connects back to the first).
pub fn polygon_perimeter(points: &[Point2d]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.distance_to(b))
        .sum()
}

/// Area of `outline` minus the areas of `holes`.
pub fn net_area(outline: &[Point2d], holes: &[Vec<Point2d>]) -> f64 {
    polygon_area(outline) - holes.iter().map(|h| polygon_area(h)).sum::<f64>()
}

/// Composite-area centroid of a lamina: add solid regions, subtract voids.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CentroidAccumulator {
    moment_x: f64,
    moment_y: f64,
    area: f64,
}

impl CentroidAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, area: f64, centroid: Point2d) {
        self.moment_x += area * centroid.x;
        self.moment_y += area * centroid.y;
        self.area += area;
    }

    /// Remove a void. Contributes `-area * centroid` to the moments.
    pub fn subtract(&mut self, area: f64, centroid: Point2d) {
        self.add(-area, centroid);
    }

    pub fn net_area(&self) -> f64 {
        self.area
    }

    /// `None` when the net area is not positive or is within the area
    /// tolerance of zero.
    pub fn centroid(&self) -> Option<Point2d> {
        if self.area > 0.0 && !default_tolerance().is_zero_area(self.area) {
            Some(Point2d::new(self.moment_x / self.area, self.moment_y / self.area))
        } else {
            None
        }
    }
}
