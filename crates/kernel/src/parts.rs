use serde::{Deserialize, Serialize};

use crate::geometry::point::Point2d;
use crate::geometry::primitives::{net_area, polygon_perimeter};

/// A fold line on a flat part. `angle` is in degrees; 90 folds the flange up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendLine {
    pub p1: Point2d,
    pub p2: Point2d,
    pub angle: f64,
}

impl BendLine {
    pub fn midpoint(&self) -> Point2d {
        self.p1.midpoint(&self.p2)
    }
}

/// A text annotation etched onto a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartLabel {
    pub at: Point2d,
    pub text: String,
}

/// One unfolded sheet-metal part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatPart {
    pub name: String,
    /// Closed outline; the closing edge is implied.
    pub outline: Vec<Point2d>,
    /// Cutouts, each inside `outline`.
    #[serde(default)]
    pub holes: Vec<Vec<Point2d>>,
    #[serde(default)]
    pub bends: Vec<BendLine>,
    #[serde(default)]
    pub labels: Vec<PartLabel>,
    /// Overrides the batch gauge when estimating weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_gauge: Option<f64>,
}

impl FlatPart {
    pub fn new(name: impl Into<String>, outline: Vec<Point2d>) -> Self {
        Self {
            name: name.into(),
            outline,
            holes: Vec::new(),
            bends: Vec::new(),
            labels: Vec::new(),
            material_gauge: None,
        }
    }

    pub fn with_bend(mut self, bend: BendLine) -> Self {
        self.bends.push(bend);
        self
    }

    pub fn with_label(mut self, at: Point2d, text: impl Into<String>) -> Self {
        self.labels.push(PartLabel {
            at,
            text: text.into(),
        });
        self
    }

    /// Outline area minus hole areas.
    pub fn net_area(&self) -> f64 {
        net_area(&self.outline, &self.holes)
    }

    pub fn perimeter(&self) -> f64 {
        polygon_perimeter(&self.outline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySummary {
    pub outer_width: f64,
    pub outer_depth: f64,
    pub seat_width: f64,
    pub seat_depth: f64,
    pub height: f64,
    /// Offset of the deck's center of gravity from the deck center.
    pub center_of_gravity: Point2d,
}

/// The flat-pattern part set for one adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterGeometry {
    pub parts: Vec<FlatPart>,
    pub summary: GeometrySummary,
    /// Containment and degenerate-opening advisories.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl AdapterGeometry {
    pub fn part(&self, name: &str) -> Option<&FlatPart> {
        self.parts.iter().find(|p| p.name == name)
    }
}
