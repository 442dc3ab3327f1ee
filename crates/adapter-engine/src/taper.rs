use serde::{Deserialize, Serialize};

use adapter_types::AdapterSpec;

/// Wall inclination from vertical caused by the taper, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaperAngles {
    pub along_length: f64,
    pub along_width: f64,
    pub average: f64,
}

/// `atan((base - top) / (2H))` per axis. A straight box is all zeros; a top
/// wider than the base gives negative angles.
pub fn taper_angles(spec: &AdapterSpec) -> TaperAngles {
    let rise = 2.0 * spec.height;
    let along_length = (spec.length - spec.top_length()).atan2(rise).to_degrees();
    let along_width = (spec.width - spec.top_width()).atan2(rise).to_degrees();
    TaperAngles {
        along_length,
        along_width,
        average: (along_length + along_width) / 2.0,
    }
}
