pub mod config;
pub mod types;

pub use config::*;
pub use types::*;

use tracing::{info, instrument, warn};

use crate::geometry::point::Point3d;
use crate::mesh::Mesh;

/// Edge slope in degrees: elevation change over horizontal run.
/// A vertical edge is 90, a horizontal one 0.
pub fn slope_between(a: &Point3d, b: &Point3d) -> f64 {
    (b.z - a.z).abs().atan2(a.horizontal_distance_to(b)).to_degrees()
}

/// Walks every face edge of a mesh and reports fabrication slope advisories.
///
/// Edges are the consecutive vertex pairs of each face, without the closing
/// edge back to the first vertex. Nothing here rejects a mesh.
pub struct SlopeValidator {
    config: ValidationConfig,
}

impl SlopeValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self, mesh), fields(faces = mesh.face_count()))]
    pub fn validate(&self, mesh: &Mesh) -> ValidationReport {
        let mut warnings = Vec::new();
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        let mut sum = 0.0;
        let mut sampled = 0usize;
        let mut skipped = 0usize;

        for face in &mesh.faces {
            for pair in face.windows(2) {
                let (Some(a), Some(b)) = (mesh.vertices.get(pair[0]), mesh.vertices.get(pair[1])) else {
                    skipped += 1;
                    continue;
                };
                let slope = slope_between(a, b);
                max = max.max(slope);
                min = min.min(slope);
                sum += slope;
                sampled += 1;
            }
        }

        if skipped > 0 {
            let msg = format!("{skipped} edges reference missing vertices and were skipped");
            warn!("{msg}");
            warnings.push(msg);
        }

        if sampled == 0 {
            let msg = "no edges sampled; mesh has no usable faces".to_string();
            warn!("{msg}");
            warnings.push(msg);
            return ValidationReport {
                warnings,
                ..ValidationReport::default()
            };
        }

        let cfg = &self.config;
        if max > cfg.max_recommended_slope + cfg.angular_tolerance {
            let msg = format!(
                "Maximum slope {max:.1}° exceeds recommended {}°; may be difficult to fabricate",
                cfg.max_recommended_slope
            );
            warn!("{msg}");
            warnings.push(msg);
        }
        if max < cfg.min_recommended_slope {
            let msg = "Very shallow slopes detected; may accumulate debris".to_string();
            warn!("{msg}");
            warnings.push(msg);
        }

        let avg = sum / sampled as f64;
        info!(
            edges = sampled,
            max_slope = max,
            min_slope = min,
            avg_slope = avg,
            warning_count = warnings.len(),
            "slope validation complete"
        );

        ValidationReport {
            max_slope: max,
            min_slope: min,
            avg_slope: avg,
            edges_sampled: sampled,
            warnings,
        }
    }
}

/// Validate with the default 5°–45° band.
pub fn validate_geometry(mesh: &Mesh) -> ValidationReport {
    SlopeValidator::new(ValidationConfig::default()).validate(mesh)
}
