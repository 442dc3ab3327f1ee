//! The end-to-end pipeline: spec in, models and fabrication artifacts out.

use std::borrow::Cow;

use serde::Serialize;
use tracing::{info, instrument};

use adapter_types::AdapterSpec;
use curb_kernel::{
    build_adapter, build_advanced_adapter, build_flat_pattern, GeometrySummary, Mesh, SlopeValidator,
    ValidationReport,
};
use fab_export::{bom_to_csv, build_bom, mesh_to_dxf, mesh_to_gcode, parts_to_dxf, BomSummary, ExportBatch};

use crate::airflow::{analyze_airflow, AirflowAnalysis};
use crate::flatten::flat_pattern_spec;
use crate::resolve::validate_spec;
use crate::taper::{taper_angles, TaperAngles};
use crate::types::{DesignBundle, DesignRequest, EngineError, LoftMode};

pub const MESH_DXF_FILE: &str = "adapter.dxf";
pub const GCODE_FILE: &str = "adapter.nc";
pub const BOM_FILE: &str = "bom.csv";
pub const REPORT_FILE: &str = "report.json";
/// Part drawings go under this subdirectory of the batch.
pub const PARTS_DIR: &str = "parts";

/// Run every stage for one adapter.
///
/// Stages, in order: spec check, mesh, slope validation, flat pattern, BOM,
/// airflow, taper, then the four serialized artifacts. Any stage error aborts
/// the run; advisories from every stage are gathered into
/// [`DesignBundle::advisories`].
#[instrument(skip(request), fields(model = ?request.spec.model, mode = ?request.mode))]
pub fn design(request: &DesignRequest) -> Result<DesignBundle, EngineError> {
    let spec = &request.spec;
    validate_spec(spec)?;

    let mesh = match &request.mode {
        LoftMode::Simple => build_adapter(spec)?,
        LoftMode::Advanced { target, options } => {
            build_advanced_adapter(&spec.base_footprint(), target.as_ref(), spec.height, options)?
        }
    };
    let validation = SlopeValidator::new(request.validation_config()).validate(&mesh);

    let geometry = build_flat_pattern(&flat_pattern_spec(spec, &request.flat))?;
    let bom = build_bom(&geometry.parts, &request.bom_config())?;
    let airflow = analyze_airflow(spec, &request.cfm)?;
    let taper = taper_angles(spec);

    let mesh_dxf = mesh_to_dxf(&export_mesh(&mesh))?;
    // The first four vertices are the curb rectangle in both loft modes.
    let gcode = mesh_to_gcode(&mesh, &request.toolpath)?;
    let part_dxfs = parts_to_dxf(&geometry.parts);
    let bom_csv = bom_to_csv(&bom);

    let advisories: Vec<String> = validation
        .warnings
        .iter()
        .chain(&geometry.warnings)
        .chain(&bom.warnings)
        .chain(&airflow.warnings)
        .cloned()
        .collect();

    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        parts = geometry.parts.len(),
        max_slope = validation.max_slope,
        advisories = advisories.len(),
        "design complete"
    );

    Ok(DesignBundle {
        spec: spec.clone(),
        mesh,
        validation,
        geometry,
        bom,
        airflow,
        taper,
        mesh_dxf,
        part_dxfs,
        gcode,
        bom_csv,
        advisories,
    })
}

/// Lofts only emit triangles; anything else is fan-split before export.
fn export_mesh(mesh: &Mesh) -> Cow<'_, Mesh> {
    if mesh.faces.iter().all(|f| f.len() == 3) {
        Cow::Borrowed(mesh)
    } else {
        Cow::Owned(mesh.triangulated())
    }
}

/// Machine-readable summary written alongside the artifacts.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DesignReport<'a> {
    spec: &'a AdapterSpec,
    validation: &'a ValidationReport,
    summary: &'a GeometrySummary,
    bom: &'a BomSummary,
    airflow: &'a AirflowAnalysis,
    taper: &'a TaperAngles,
    advisories: &'a [String],
}

impl DesignBundle {
    /// Every artifact as a batch ready for `write_export_batch`.
    pub fn to_export_batch(&self) -> Result<ExportBatch, EngineError> {
        let mut batch = ExportBatch::new();
        if let Some(model) = &self.spec.model {
            batch = batch.with_label(model.clone());
        }

        batch.push(MESH_DXF_FILE, self.mesh_dxf.clone());
        for (name, dxf) in &self.part_dxfs {
            batch.push(format!("{PARTS_DIR}/{name}"), dxf.clone());
        }
        batch.push(GCODE_FILE, self.gcode.clone());
        batch.push(BOM_FILE, self.bom_csv.clone());

        let report = DesignReport {
            spec: &self.spec,
            validation: &self.validation,
            summary: &self.geometry.summary,
            bom: &self.bom,
            airflow: &self.airflow,
            taper: &self.taper,
            advisories: &self.advisories,
        };
        batch.push(REPORT_FILE, serde_json::to_string_pretty(&report)?);
        Ok(batch)
    }
}
