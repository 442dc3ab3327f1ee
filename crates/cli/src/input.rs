//! The JSON spec file and how command-line overrides fold into it.

use serde::Deserialize;

use adapter_engine::{resolve_spec, CfmOverrides, DesignRequest, EngineError, FlatOptions, LoftMode};
use adapter_types::{AdapterSpec, LoftOptions, PartialAdapterSpec, UnitTarget};
use curb_kernel::ValidationConfig;
use fab_export::{BomConfig, ToolpathConfig};

/// Dimensions at the top level, optional tuning blocks beside them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecFile {
    #[serde(flatten)]
    pub spec: PartialAdapterSpec,
    #[serde(default)]
    pub validation: Option<ValidationConfig>,
    #[serde(default)]
    pub toolpath: Option<ToolpathConfig>,
    #[serde(default)]
    pub bom: Option<BomConfig>,
    #[serde(default)]
    pub flat: Option<FlatOptions>,
    #[serde(default)]
    pub target: Option<UnitTarget>,
    #[serde(default)]
    pub loft: Option<LoftOptions>,
    #[serde(default)]
    pub cfm: Option<CfmOverrides>,
}

/// Values given on the command line. Each one beats the file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub advanced: bool,
    pub segments: Option<usize>,
    pub max_slope: Option<f64>,
    pub flare: Option<f64>,
    pub height: Option<f64>,
    pub gauge: Option<f64>,
}

impl Overrides {
    fn as_source(&self) -> PartialAdapterSpec {
        PartialAdapterSpec {
            height: self.height,
            steel_gauge: self.gauge,
            ..PartialAdapterSpec::default()
        }
    }

    fn loft_options(&self, file: Option<LoftOptions>) -> LoftOptions {
        let file = file.unwrap_or_default();
        LoftOptions {
            segments: self.segments.or(file.segments),
            max_slope: self.max_slope.or(file.max_slope),
            flare_factor: self.flare.or(file.flare_factor),
        }
    }
}

/// Without an explicit target the adapter transitions into its own top
/// footprint with the spec's duct positions.
fn target_from_spec(spec: &AdapterSpec) -> UnitTarget {
    UnitTarget {
        length: Some(spec.top_length()),
        width: Some(spec.top_width()),
        supply: spec.supply,
        ret: spec.ret,
    }
}

/// Resolve the spec (overrides first, then the file) and assemble the request.
pub fn build_request(file: SpecFile, overrides: &Overrides) -> Result<DesignRequest, EngineError> {
    let spec = resolve_spec(&[overrides.as_source(), file.spec])?;

    let loft_requested = file.loft.is_some() || file.target.is_some();
    let mode = if overrides.advanced || loft_requested {
        LoftMode::Advanced {
            target: Some(file.target.unwrap_or_else(|| target_from_spec(&spec))),
            options: overrides.loft_options(file.loft),
        }
    } else {
        LoftMode::Simple
    };

    let toolpath = match (file.toolpath, &spec.model) {
        (Some(toolpath), _) => toolpath,
        (None, Some(model)) => ToolpathConfig::named(model.clone()),
        (None, None) => ToolpathConfig::default(),
    };

    let mut request = DesignRequest::new(spec).with_mode(mode);
    request.flat = file.flat.unwrap_or_default();
    request.validation = file.validation;
    request.toolpath = toolpath;
    request.bom = file.bom;
    request.cfm = file.cfm.unwrap_or_default();
    Ok(request)
}
