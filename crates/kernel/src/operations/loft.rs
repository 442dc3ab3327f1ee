use adapter_types::AdapterSpec;
use tracing::{debug, instrument};

use crate::geometry::point::Point3d;
use crate::geometry::primitives::{eased, lerp};
use crate::mesh::Mesh;
use crate::operations::{require_positive, OperationError};

/// Triangles of the simple box loft: base cap, top cap, then two per wall.
const BOX_FACES: [[usize; 3]; 12] = [
    [0, 1, 2],
    [0, 2, 3],
    [4, 5, 6],
    [4, 6, 7],
    [0, 1, 5],
    [0, 5, 4],
    [1, 2, 6],
    [1, 6, 5],
    [2, 3, 7],
    [2, 7, 6],
    [3, 0, 4],
    [3, 4, 7],
];

/// Build the 8-vertex adapter solid.
///
/// The base `L1 x W1` rectangle sits at `z = 0` with its first corner on the
/// origin. The top `L2 x W2` rectangle sits at `z = H`, centered over the base
/// so any taper is symmetric. Vertices 0-3 are the base corners and 4-7 the
/// top corners, both wound counter-clockwise from the minimum corner.
#[instrument(skip(spec), fields(model = ?spec.model))]
pub fn build_adapter(spec: &AdapterSpec) -> Result<Mesh, OperationError> {
    let l1 = require_positive("length", spec.length)?;
    let w1 = require_positive("width", spec.width)?;
    let l2 = require_positive("top_length", spec.top_length())?;
    let w2 = require_positive("top_width", spec.top_width())?;
    let h = require_positive("height", spec.height)?;

    let mut mesh = Mesh::with_capacity(8, BOX_FACES.len());
    for p in [
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(l1, 0.0, 0.0),
        Point3d::new(l1, w1, 0.0),
        Point3d::new(0.0, w1, 0.0),
        Point3d::new((l1 - l2) / 2.0, (w1 - w2) / 2.0, h),
        Point3d::new((l1 + l2) / 2.0, (w1 - w2) / 2.0, h),
        Point3d::new((l1 + l2) / 2.0, (w1 + w2) / 2.0, h),
        Point3d::new((l1 - l2) / 2.0, (w1 + w2) / 2.0, h),
    ] {
        mesh.push_vertex(p);
    }
    for [a, b, c] in BOX_FACES {
        mesh.push_triangle(a, b, c);
    }

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        tapered = spec.is_tapered(),
        "simple loft built"
    );
    Ok(mesh)
}

/// Parameters of one quad-strip loft stage.
#[derive(Debug, Clone, Copy)]
pub struct LoftStage {
    /// Segments along the lofting axis, floored to 1.
    pub segments: usize,
    /// Exponent applied to `t` before smoothstep; 1.0 is a plain S-curve.
    pub curvature: f64,
    pub cap_bottom: bool,
    pub cap_top: bool,
}

/// Loft between two quadrilaterals, appending to `mesh`.
///
/// X/Y follow the eased parameter while Z stays linear in the layer index,
/// so easing reshapes the cross-section but not the elevation. Returns the
/// vertex indices of each ring, bottom first.
pub fn loft_quad(
    bottom: &[Point3d; 4],
    top: &[Point3d; 4],
    mesh: &mut Mesh,
    stage: LoftStage,
) -> Vec<[usize; 4]> {
    let segments = stage.segments.max(1);
    let mut rings: Vec<[usize; 4]> = Vec::with_capacity(segments + 1);

    for layer in 0..=segments {
        let t = layer as f64 / segments as f64;
        let e = eased(t, stage.curvature);
        let ring = std::array::from_fn(|i| {
            let (b, p) = (bottom[i], top[i]);
            mesh.push_vertex(Point3d::new(lerp(b.x, p.x, e), lerp(b.y, p.y, e), lerp(b.z, p.z, t)))
        });
        rings.push(ring);
    }

    for pair in rings.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        for i in 0..4 {
            let next = (i + 1) % 4;
            mesh.push_triangle(lower[i], lower[next], upper[next]);
            mesh.push_triangle(lower[i], upper[next], upper[i]);
        }
    }

    if stage.cap_bottom {
        let b = rings[0];
        mesh.push_triangle(b[0], b[1], b[2]);
        mesh.push_triangle(b[0], b[2], b[3]);
    }
    if stage.cap_top {
        let t = rings[rings.len() - 1];
        mesh.push_triangle(t[0], t[2], t[1]);
        mesh.push_triangle(t[0], t[3], t[2]);
    }

    rings
}
