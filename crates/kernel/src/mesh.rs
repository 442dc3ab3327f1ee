use serde::{Deserialize, Serialize};

use crate::geometry::point::Point3d;
use crate::operations::OperationError;

/// An indexed polygon mesh.
///
/// Faces are index lists into `vertices`. The lofting code only emits
/// triangles; faces with more than three indices are read as triangle fans
/// from their first vertex. Duplicate vertices are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<Vec<usize>>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// A mesh without faces is valid but encloses nothing.
    pub fn is_degenerate(&self) -> bool {
        self.faces.is_empty()
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, p: Point3d) -> usize {
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    pub fn push_triangle(&mut self, i0: usize, i1: usize, i2: usize) {
        self.faces.push(vec![i0, i1, i2]);
    }

    /// Append another mesh, offsetting its face indices.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.iter().map(|&i| i + offset).collect()),
        );
    }

    /// Verify every face index refers to an existing vertex.
    pub fn check_indices(&self) -> Result<(), OperationError> {
        let vertex_count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(OperationError::InvalidIndex {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Same vertices, every face of arity > 3 split into a triangle fan.
    /// Faces with fewer than three indices are dropped.
    pub fn triangulated(&self) -> Mesh {
        let mut faces = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            if face.len() < 3 {
                continue;
            }
            for i in 1..face.len() - 1 {
                faces.push(vec![face[0], face[i], face[i + 1]]);
            }
        }
        Mesh {
            vertices: self.vertices.clone(),
            faces,
        }
    }
}
