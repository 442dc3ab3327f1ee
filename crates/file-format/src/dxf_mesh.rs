//! DXF export of a lofted mesh as 3DFACE entities.

use curb_kernel::geometry::point::Point3d;
use curb_kernel::Mesh;

use crate::errors::ExportError;

/// Layer all mesh faces are placed on.
pub const MESH_LAYER: &str = "CURB";

/// Serialize a triangle mesh to a minimal DXF entities section.
///
/// Each triangle becomes a `3DFACE` whose fourth corner repeats the third.
/// Coordinates are written as `x,y,z` with Rust's shortest round-trip float
/// formatting. Faces that are not triangles are rejected; call
/// [`Mesh::triangulated`] first for quad meshes.
pub fn mesh_to_dxf(mesh: &Mesh) -> Result<String, ExportError> {
    let vertex_count = mesh.vertex_count();
    let mut out = String::with_capacity(64 + mesh.face_count() * 96);
    out.push_str("0\nSECTION\n2\nENTITIES\n");

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        if face.len() != 3 {
            return Err(ExportError::NonTriangularFace {
                face: face_idx,
                arity: face.len(),
            });
        }
        let mut corners = [Point3d::ORIGIN; 3];
        for (slot, &index) in corners.iter_mut().zip(face) {
            *slot = *mesh.vertices.get(index).ok_or(ExportError::InvalidIndex {
                face: face_idx,
                index,
                vertex_count,
            })?;
        }

        let [a, b, c] = corners;
        out.push_str(&format!(
            "0\n3DFACE\n8\n{MESH_LAYER}\n10\n{}\n11\n{}\n12\n{}\n13\n{}\n",
            coords(&a),
            coords(&b),
            coords(&c),
            coords(&c)
        ));
    }

    out.push_str("0\nENDSEC\n0\nEOF\n");
    Ok(out)
}

fn coords(p: &Point3d) -> String {
    format!("{},{},{}", p.x, p.y, p.z)
}
