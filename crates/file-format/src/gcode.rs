//! Perimeter-only CNC toolpath around the base rectangle.

use serde::{Deserialize, Serialize};

use curb_kernel::Mesh;

use crate::errors::ExportError;

/// Base corners visited in order; the last entry closes the loop.
const PERIMETER: [usize; 5] = [0, 1, 2, 3, 0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolpathConfig {
    /// Written as the leading `( ... )` comment.
    pub program_name: String,
    pub spindle_rpm: u32,
    /// Clearance height for rapids, mm.
    pub safe_z: f64,
    /// Feed for the single plunge, mm/min.
    pub plunge_feed: u32,
    /// Feed for the perimeter cut, mm/min.
    pub cut_feed: u32,
}

impl Default for ToolpathConfig {
    fn default() -> Self {
        Self {
            program_name: "CURB ADAPTER".to_string(),
            spindle_rpm: 8000,
            safe_z: 5.0,
            plunge_feed: 400,
            cut_feed: 800,
        }
    }
}

impl ToolpathConfig {
    pub fn named(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            ..Self::default()
        }
    }
}

/// Emit G-code tracing vertices 0→1→2→3→0 at Z0.
///
/// The program sets modes, starts the spindle, rapids to the first corner,
/// plunges once, cuts the four sides, retracts and ends. No pocketing,
/// tabs or lead-ins.
pub fn mesh_to_gcode(mesh: &Mesh, config: &ToolpathConfig) -> Result<String, ExportError> {
    if mesh.vertex_count() < 4 {
        return Err(ExportError::InsufficientVertices {
            required: 4,
            provided: mesh.vertex_count(),
        });
    }

    let corners: Vec<_> = PERIMETER.iter().map(|&i| mesh.vertices[i]).collect();
    let safe_z = config.safe_z;

    let mut lines = vec![
        format!("({})", config.program_name.replace(['(', ')'], "")),
        "G21".to_string(),
        "G90".to_string(),
        "G17".to_string(),
        format!("M3 S{}", config.spindle_rpm),
        format!("G0 Z{safe_z}"),
        format!("G0 X{:.3} Y{:.3}", corners[0].x, corners[0].y),
        format!("G1 Z0 F{}", config.plunge_feed),
    ];
    for p in &corners[1..] {
        lines.push(format!("G1 X{:.3} Y{:.3} F{}", p.x, p.y, config.cut_feed));
    }
    lines.push(format!("G0 Z{safe_z}"));
    lines.push("M5".to_string());
    lines.push("M30".to_string());

    let mut program = lines.join("\n");
    program.push('\n');
    Ok(program)
}
