//! Result type of the slope validator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Slope statistics over every sampled mesh edge, in degrees, plus the
/// fabrication advisories derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub max_slope: f64,
    pub min_slope: f64,
    pub avg_slope: f64,
    pub edges_sampled: usize,
    /// Advisory only; a report with warnings still describes a buildable mesh.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Warnings whose text contains `needle`.
    pub fn warnings_matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.warnings.iter().filter(move |w| w.contains(needle))
    }

    pub fn exceeds_max(&self) -> bool {
        self.warnings_matching("exceeds recommended").next().is_some()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slopes over {} edges: max={:.2}° min={:.2}° avg={:.2}°",
            self.edges_sampled, self.max_slope, self.min_slope, self.avg_slope
        )?;
        for w in &self.warnings {
            write!(f, "\n  WARN {w}")?;
        }
        Ok(())
    }
}
