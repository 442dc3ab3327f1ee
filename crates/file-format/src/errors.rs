use std::path::PathBuf;

/// Errors raised while serializing or writing fabrication artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("face {face} has {arity} vertices; mesh DXF export expects triangles")]
    NonTriangularFace { face: usize, arity: usize },

    #[error("face {face} references vertex {index}, mesh has {vertex_count} vertices")]
    InvalidIndex {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("toolpath needs at least {required} vertices, mesh has {provided}")]
    InsufficientVertices { required: usize, provided: usize },

    #[error("steel gauge must be positive, got {0}")]
    InvalidGauge(f64),

    #[error("fastener spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    #[error("export batch lists {0} more than once")]
    DuplicateArtifact(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Manifest(String),
}
