pub mod bom;
pub mod dxf_mesh;
pub mod dxf_parts;
pub mod errors;
pub mod gcode;
pub mod write;

pub use bom::{bom_to_csv, build_bom, BomConfig, BomItem, BomSummary};
pub use dxf_mesh::mesh_to_dxf;
pub use dxf_parts::{part_to_dxf, parts_to_dxf};
pub use errors::ExportError;
pub use gcode::{mesh_to_gcode, ToolpathConfig};
pub use write::{write_export_batch, Artifact, ExportBatch, ExportManifest, ManifestEntry, MANIFEST_FILE};
