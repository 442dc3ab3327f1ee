//! Thresholds for the slope validator.

use serde::{Deserialize, Serialize};

/// Recommended slope band, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    /// Slopes above this are hard to form on a brake.
    pub max_recommended_slope: f64,
    /// A maximum slope below this means the whole part is nearly flat.
    pub min_recommended_slope: f64,
    /// Slack added to `max_recommended_slope` so a wall built at exactly the
    /// limit does not warn on rounding noise.
    pub angular_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_recommended_slope: 45.0,
            min_recommended_slope: 5.0,
            angular_tolerance: 1e-9,
        }
    }
}

impl ValidationConfig {
    /// Default band, with the upper limit tightened to the press brake's bend
    /// limit when that is lower than 45 degrees.
    pub fn with_bend_limit(bend_limit: f64) -> Self {
        let defaults = Self::default();
        let max_recommended_slope = if bend_limit.is_finite() && bend_limit > 0.0 {
            bend_limit.min(defaults.max_recommended_slope)
        } else {
            defaults.max_recommended_slope
        };
        Self {
            max_recommended_slope,
            ..defaults
        }
    }

    /// Strictest setting: any slope above `max` warns with no slack.
    pub fn strict(max: f64) -> Self {
        Self {
            max_recommended_slope: max,
            angular_tolerance: 0.0,
            ..Self::default()
        }
    }
}
