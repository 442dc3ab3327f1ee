use serde::{Deserialize, Serialize};

use crate::opening::DuctOpening;

pub const DEFAULT_LOFT_SEGMENTS: usize = 4;
pub const DEFAULT_FLARE_FACTOR: f64 = 1.25;

/// Resolution and easing controls for the advanced loft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoftOptions {
    /// Layers along the lofting axis. Floored to 2 by the advanced loft.
    #[serde(default)]
    pub segments: Option<usize>,
    /// Slope budget in degrees; steeper budgets ease the profile harder.
    #[serde(default)]
    pub max_slope: Option<f64>,
    /// Ratio of a branch duct's base size to its top size (>= 1).
    #[serde(default)]
    pub flare_factor: Option<f64>,
}

impl LoftOptions {
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = Some(segments);
        self
    }

    pub fn with_max_slope(mut self, max_slope: f64) -> Self {
        self.max_slope = Some(max_slope);
        self
    }

    pub fn with_flare(mut self, flare_factor: f64) -> Self {
        self.flare_factor = Some(flare_factor);
        self
    }
}

/// The replacement unit an advanced loft transitions into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitTarget {
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    pub supply: DuctOpening,
    #[serde(rename = "return", alias = "ret")]
    pub ret: DuctOpening,
}
