use serde::{Deserialize, Serialize};

use adapter_types::{AdapterSpec, DuctKind, FlatPatternSpec, Opening, TopOpen};

/// Seat ledge width when the request leaves it out, inches.
pub const DEFAULT_TOP_BASE: f64 = 2.5;
/// Support bar width when the request leaves it out, inches.
pub const DEFAULT_SUPPORT_BAR: f64 = 3.0;

/// Flat-pattern inputs that an `AdapterSpec` does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlatOptions {
    /// Seat margin around the top opening, inches.
    pub top_base: f64,
    /// Support bar strip width, inches.
    pub support_bar: f64,
}

impl Default for FlatOptions {
    fn default() -> Self {
        Self {
            top_base: DEFAULT_TOP_BASE,
            support_bar: DEFAULT_SUPPORT_BAR,
        }
    }
}

/// Derive the flat-pattern inputs from an adapter spec.
///
/// The top opening is the top footprint. Duct positions, measured from the
/// base origin, become offsets from the footprint center; the top is
/// centered over the base so both share that center.
pub fn flat_pattern_spec(spec: &AdapterSpec, options: &FlatOptions) -> FlatPatternSpec {
    let (cx, cy) = spec.base_footprint().center();
    let offset = |kind: DuctKind| {
        let opening = spec.duct(kind).to_opening(kind, 0.0);
        Opening {
            x: opening.x - cx,
            y: opening.y - cy,
            ..opening
        }
    };

    FlatPatternSpec {
        top_open: TopOpen {
            w: spec.top_length(),
            h: spec.top_width(),
        },
        supply: offset(DuctKind::Supply),
        ret: offset(DuctKind::Return),
        top_base: options.top_base,
        flange: spec.flange_height,
        height: spec.height,
        support_bar: options.support_bar,
        steel_gauge: Some(spec.steel_gauge),
    }
}
