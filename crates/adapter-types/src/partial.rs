use serde::{Deserialize, Serialize};

/// A duct position where every field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialDuct {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub w: Option<f64>,
    #[serde(default)]
    pub h: Option<f64>,
}

/// One candidate source of adapter dimensions (catalog record, user form,
/// command-line overrides, ...). Any field may be absent; sources are merged
/// field by field in priority order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialAdapterSpec {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub top_length: Option<f64>,
    #[serde(default)]
    pub top_width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub flange_height: Option<f64>,
    #[serde(default)]
    pub supply: PartialDuct,
    #[serde(default, rename = "return", alias = "ret")]
    pub ret: PartialDuct,
    #[serde(default)]
    pub steel_gauge: Option<f64>,
    #[serde(default)]
    pub fastener_spacing: Option<f64>,
    #[serde(default)]
    pub bend_limit: Option<f64>,
}
