use adapter_types::{
    DuctKind, DuctOpening, Footprint, LoftOptions, UnitTarget, DEFAULT_FLARE_FACTOR,
    DEFAULT_LOFT_SEGMENTS,
};
use tracing::{info, instrument};

use crate::geometry::point::Point3d;
use crate::geometry::primitives::{centered_rectangle, lerp, smoothstep};
use crate::mesh::Mesh;
use crate::operations::loft::{loft_quad, LoftStage};
use crate::operations::{require_finite, require_positive, OperationError};

/// Lowest segment count the advanced loft will build with.
pub const MIN_ADVANCED_SEGMENTS: usize = 2;
/// Largest top footprint as a fraction of the curb footprint.
pub const MAX_TOP_FRACTION: f64 = 0.98;
/// Top footprint fraction used when the target omits its size.
pub const DEFAULT_TOP_FRACTION: f64 = 0.8;
/// Ducts ease slightly less than the outer shell.
pub const DUCT_CURVATURE_RATIO: f64 = 0.9;
/// Spine start positions across the curb width, supply then return.
const SPINE_START: (f64, f64) = (0.35, 0.65);

/// Curvature exponent for a slope budget: `max(0.6, 45 / max_slope)`, or 1.0
/// when no budget is given.
pub fn curvature_for(max_slope: Option<f64>) -> Result<f64, OperationError> {
    match max_slope {
        Some(slope) => {
            let slope = require_positive("max_slope", slope)?;
            Ok((45.0 / slope).max(0.6))
        }
        None => Ok(1.0),
    }
}

/// Build the segmented adapter: eased outer shell, flared supply and return
/// ducts, and an internal spine web between the two duct centers.
///
/// The shell runs from the full curb footprint at `z = 0` to the target
/// footprint (capped at 98% of the curb) at `z = height`, both centered on the
/// curb. Duct bases are the target openings scaled by the flare factor and
/// clamped into the curb footprint; duct tops are the exact target openings.
/// The clamp uses the curb bounds, not the shell's intermediate sections, so
/// a flared duct may poke outside the shell between the end layers.
#[instrument(skip(curb, target, options))]
pub fn build_advanced_adapter(
    curb: &Footprint,
    target: Option<&UnitTarget>,
    height: f64,
    options: &LoftOptions,
) -> Result<Mesh, OperationError> {
    let target = target.ok_or(OperationError::MissingTarget)?;
    let length = require_positive("curb_length", curb.length)?;
    let width = require_positive("curb_width", curb.width)?;
    let height = require_positive("height", height)?;

    let segments = options
        .segments
        .unwrap_or(DEFAULT_LOFT_SEGMENTS)
        .max(MIN_ADVANCED_SEGMENTS);
    let flare = options.flare_factor.unwrap_or(DEFAULT_FLARE_FACTOR);
    if !flare.is_finite() || flare < 1.0 {
        return Err(OperationError::BelowMinimum {
            parameter: "flare_factor",
            min: 1.0,
            value: flare,
        });
    }
    let curvature = curvature_for(options.max_slope)?;

    let (cx, cy) = curb.center();
    let top_length = target
        .length
        .map(|l| require_positive("target_length", l))
        .transpose()?
        .unwrap_or(length * DEFAULT_TOP_FRACTION)
        .min(length * MAX_TOP_FRACTION);
    let top_width = target
        .width
        .map(|w| require_positive("target_width", w))
        .transpose()?
        .unwrap_or(width * DEFAULT_TOP_FRACTION)
        .min(width * MAX_TOP_FRACTION);

    let mut mesh = Mesh::with_capacity(14 * (segments + 1), 26 * segments + 4);

    let base_outer = centered_rectangle(cx, cy, length, width, 0.0);
    let top_outer = centered_rectangle(cx, cy, top_length, top_width, height);
    loft_quad(
        &base_outer,
        &top_outer,
        &mut mesh,
        LoftStage {
            segments,
            curvature,
            cap_bottom: true,
            cap_top: true,
        },
    );

    for (kind, duct) in [(DuctKind::Supply, &target.supply), (DuctKind::Return, &target.ret)] {
        let (bottom, top) = duct_profiles(kind, duct, curb, height, flare)?;
        loft_quad(
            &bottom,
            &top,
            &mut mesh,
            LoftStage {
                segments,
                curvature: curvature * DUCT_CURVATURE_RATIO,
                cap_bottom: false,
                cap_top: false,
            },
        );
    }

    build_spine(&mut mesh, curb, target, height, segments);

    info!(
        segments,
        curvature,
        flare,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "advanced loft built"
    );
    Ok(mesh)
}

/// Bottom (flared, clamped into the curb) and top (exact) rectangles of a duct.
fn duct_profiles(
    kind: DuctKind,
    duct: &DuctOpening,
    curb: &Footprint,
    height: f64,
    flare: f64,
) -> Result<([Point3d; 4], [Point3d; 4]), OperationError> {
    let (w, h) = duct.size(kind);
    let (w_name, h_name, x_name, y_name) = match kind {
        DuctKind::Supply => ("supply_w", "supply_h", "supply_x", "supply_y"),
        DuctKind::Return => ("return_w", "return_h", "return_x", "return_y"),
    };
    let w = require_positive(w_name, w)?;
    let h = require_positive(h_name, h)?;
    let x = require_finite(x_name, duct.x)?;
    let y = require_finite(y_name, duct.y)?;

    let bottom = centered_rectangle(x, y, w * flare, h * flare, 0.0).map(|p| {
        Point3d::new(
            p.x.clamp(0.0, curb.length),
            p.y.clamp(0.0, curb.width),
            p.z,
        )
    });
    let top = centered_rectangle(x, y, w, h, height);
    Ok((bottom, top))
}

/// Two points per layer tracking the evolving supply and return centers,
/// joined layer to layer by two triangles.
fn build_spine(mesh: &mut Mesh, curb: &Footprint, target: &UnitTarget, height: f64, segments: usize) {
    let supply_start = (curb.length / 2.0, curb.width * SPINE_START.0);
    let return_start = (curb.length / 2.0, curb.width * SPINE_START.1);

    let mut rings: Vec<[usize; 2]> = Vec::with_capacity(segments + 1);
    for layer in 0..=segments {
        let t = layer as f64 / segments as f64;
        let e = smoothstep(t);
        let z = lerp(0.0, height, t);
        let s = mesh.push_vertex(Point3d::new(
            lerp(supply_start.0, target.supply.x, e),
            lerp(supply_start.1, target.supply.y, e),
            z,
        ));
        let r = mesh.push_vertex(Point3d::new(
            lerp(return_start.0, target.ret.x, e),
            lerp(return_start.1, target.ret.y, e),
            z,
        ));
        rings.push([s, r]);
    }

    for pair in rings.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        mesh.push_triangle(lower[0], upper[0], upper[1]);
        mesh.push_triangle(lower[0], upper[1], lower[1]);
    }
}
