use serde::{Deserialize, Serialize};

use adapter_types::{AdapterSpec, LoftOptions, UnitTarget};
use curb_kernel::{AdapterGeometry, Mesh, OperationError, ValidationConfig, ValidationReport};
use fab_export::{BomConfig, BomSummary, ExportError, ToolpathConfig};

use crate::airflow::{AirflowAnalysis, CfmOverrides};
use crate::flatten::FlatOptions;
use crate::taper::TaperAngles;

/// Errors from the adapter engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{field} must be positive and finite, got {value}")]
    InvalidField { field: &'static str, value: f64 },

    #[error("division by zero computing {quantity}")]
    DivisionByZero { quantity: &'static str },

    #[error("geometry error: {0}")]
    Operation(#[from] OperationError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),

    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}

/// Which lofting engine builds the 3D mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum LoftMode {
    /// 8-vertex box between base and top footprints.
    #[default]
    Simple,
    /// Segmented loft from the base footprint into `target`, with ducts and spine.
    Advanced {
        #[serde(default)]
        target: Option<UnitTarget>,
        #[serde(default)]
        options: LoftOptions,
    },
}

/// Everything `design` needs for one adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignRequest {
    pub spec: AdapterSpec,
    pub mode: LoftMode,
    pub flat: FlatOptions,
    /// `None` derives the band from the spec's bend limit.
    pub validation: Option<ValidationConfig>,
    pub toolpath: ToolpathConfig,
    /// `None` takes gauge and fastener spacing from the spec.
    pub bom: Option<BomConfig>,
    pub cfm: CfmOverrides,
}

impl DesignRequest {
    pub fn new(spec: AdapterSpec) -> Self {
        Self {
            spec,
            mode: LoftMode::Simple,
            flat: FlatOptions::default(),
            validation: None,
            toolpath: ToolpathConfig::default(),
            bom: None,
            cfm: CfmOverrides::default(),
        }
    }

    pub fn with_mode(mut self, mode: LoftMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validation_config(&self) -> ValidationConfig {
        self.validation
            .unwrap_or_else(|| ValidationConfig::with_bend_limit(self.spec.bend_limit))
    }

    pub fn bom_config(&self) -> BomConfig {
        self.bom.unwrap_or_else(|| {
            BomConfig::default()
                .with_gauge(self.spec.steel_gauge)
                .with_fastener_spacing(self.spec.fastener_spacing)
        })
    }
}

/// Output of the design pipeline: models, analyses and the four artifacts.
#[derive(Debug, Clone)]
pub struct DesignBundle {
    pub spec: AdapterSpec,
    pub mesh: Mesh,
    pub validation: ValidationReport,
    pub geometry: AdapterGeometry,
    pub bom: BomSummary,
    pub airflow: AirflowAnalysis,
    pub taper: TaperAngles,
    pub mesh_dxf: String,
    /// `(file name, contents)` per flat part.
    pub part_dxfs: Vec<(String, String)>,
    pub gcode: String,
    pub bom_csv: String,
    /// Every advisory raised along the way, in pipeline order.
    pub advisories: Vec<String>,
}
