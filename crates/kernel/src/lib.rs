pub mod geometry;
pub mod mesh;
pub mod operations;
pub mod parts;
pub mod validation;

// Re-export the entry points at crate root for convenience.
pub use mesh::Mesh;
pub use operations::advanced_loft::build_advanced_adapter;
pub use operations::flat_pattern::build_flat_pattern;
pub use operations::loft::build_adapter;
pub use operations::OperationError;
pub use parts::{AdapterGeometry, BendLine, FlatPart, GeometrySummary, PartLabel};
pub use validation::{validate_geometry, SlopeValidator, ValidationConfig, ValidationReport};

/// Global tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (inches).
    pub coincidence: f64,
    /// Areas smaller than this are considered zero (square inches).
    pub area: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-9,
            area: 1e-9,
        }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &geometry::point::Point2d, b: &geometry::point::Point2d) -> bool {
        a.distance_to(b) < self.coincidence
    }

    pub fn is_zero_area(&self, area: f64) -> bool {
        area.abs() < self.area
    }
}

pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
