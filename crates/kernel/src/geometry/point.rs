use serde::{Deserialize, Serialize};

/// A point in 3D space. Mesh vertices are plain positions with no identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Length of the projection of `self -> other` onto the XY plane.
    pub fn horizontal_distance_to(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// A point in the plane of a flat sheet-metal part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point2d::new(1.0, 0.0);
        let b = Point2d::new(4.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_horizontal_distance_ignores_z() {
        let a = Point3d::new(0.0, 0.0, 0.0);
        let b = Point3d::new(3.0, 4.0, 100.0);
        assert!((a.horizontal_distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_midpoint() {
        let a = Point2d::new(0.0, 0.0);
        let b = Point2d::new(2.0, 4.0);
        let m = a.midpoint(&b);
        assert!((m.x - 1.0).abs() < 1e-12);
        assert!((m.y - 2.0).abs() < 1e-12);
    }
}
