//! Bill of materials: per-part area and weight, fasteners, sheet estimate.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use curb_kernel::FlatPart;

use crate::errors::ExportError;

const SQ_IN_PER_SQ_FT: f64 = 144.0;
/// Waste above this share of purchased sheet area raises an advisory.
pub const WASTE_WARNING_PERCENT: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BomConfig {
    /// Sheet weight at `reference_gauge`, lb/ft².
    pub weight_per_sq_ft: f64,
    pub reference_gauge: f64,
    /// Gauge for parts without their own `material_gauge`.
    pub default_gauge: f64,
    /// Inches between fasteners along part outlines.
    pub fastener_spacing: f64,
    /// Purchased sheet size; 32 ft² is a 4×8 sheet.
    pub sheet_area_sq_ft: f64,
}

impl Default for BomConfig {
    fn default() -> Self {
        Self {
            weight_per_sq_ft: 2.0,
            reference_gauge: 18.0,
            default_gauge: 18.0,
            fastener_spacing: 6.0,
            sheet_area_sq_ft: 32.0,
        }
    }
}

impl BomConfig {
    pub fn with_gauge(mut self, gauge: f64) -> Self {
        self.default_gauge = gauge;
        self
    }

    pub fn with_fastener_spacing(mut self, spacing: f64) -> Self {
        self.fastener_spacing = spacing;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomItem {
    pub part: String,
    pub area_sq_in: f64,
    pub area_sq_ft: f64,
    pub weight_lb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomSummary {
    pub items: Vec<BomItem>,
    pub fasteners: u32,
    pub total_weight_lb: f64,
    /// Sum of outline perimeters, inches. Holes are not seams.
    pub total_perimeter_in: f64,
    pub sheets_required: u32,
    pub material_waste_percent: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl BomSummary {
    pub fn total_area_sq_ft(&self) -> f64 {
        self.items.iter().map(|i| i.area_sq_ft).sum()
    }
}

/// Weight scales inversely with gauge number: lower gauge, thicker sheet.
fn gauge_factor(reference: f64, gauge: f64) -> Result<f64, ExportError> {
    if gauge.is_finite() && gauge > 0.0 {
        Ok(reference / gauge)
    } else {
        Err(ExportError::InvalidGauge(gauge))
    }
}

/// Estimate material for a set of flat parts.
pub fn build_bom(parts: &[FlatPart], config: &BomConfig) -> Result<BomSummary, ExportError> {
    let spacing = config.fastener_spacing;
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(ExportError::InvalidSpacing(spacing));
    }

    let mut items = Vec::with_capacity(parts.len());
    let mut total_weight_lb = 0.0;
    let mut total_perimeter_in = 0.0;

    for part in parts {
        let gauge = part.material_gauge.unwrap_or(config.default_gauge);
        let factor = gauge_factor(config.reference_gauge, gauge)?;
        let area_sq_in = part.net_area();
        let area_sq_ft = area_sq_in / SQ_IN_PER_SQ_FT;
        let weight_lb = area_sq_ft * config.weight_per_sq_ft * factor;

        total_weight_lb += weight_lb;
        total_perimeter_in += part.perimeter();
        items.push(BomItem {
            part: part.name.clone(),
            area_sq_in,
            area_sq_ft,
            weight_lb,
        });
    }

    let fasteners = ((total_perimeter_in / spacing).ceil() as u32).max(4);

    let mut summary = BomSummary {
        items,
        fasteners,
        total_weight_lb,
        total_perimeter_in,
        sheets_required: 0,
        material_waste_percent: 0.0,
        warnings: Vec::new(),
    };

    let total_sq_ft = summary.total_area_sq_ft();
    if total_sq_ft > 0.0 && config.sheet_area_sq_ft > 0.0 {
        let sheets = (total_sq_ft / config.sheet_area_sq_ft).ceil();
        let purchased = sheets * config.sheet_area_sq_ft;
        summary.sheets_required = sheets as u32;
        summary.material_waste_percent = (purchased - total_sq_ft) / purchased * 100.0;
    }

    if summary.material_waste_percent > WASTE_WARNING_PERCENT {
        let msg = format!(
            "Material waste {:.1}% across {} sheets; consider nesting parts",
            summary.material_waste_percent, summary.sheets_required
        );
        warn!("{msg}");
        summary.warnings.push(msg);
    }

    debug!(
        parts = summary.items.len(),
        fasteners,
        total_weight_lb,
        total_sq_ft,
        sheets_required = summary.sheets_required,
        "bom built"
    );

    Ok(summary)
}

/// CSV rendering: header, one row per part, fastener row, total row.
pub fn bom_to_csv(summary: &BomSummary) -> String {
    let mut lines = vec!["Part,Area (sq in),Area (sq ft),Weight (lb)".to_string()];
    for item in &summary.items {
        lines.push(format!(
            "{},{:.2},{:.3},{:.2}",
            item.part, item.area_sq_in, item.area_sq_ft, item.weight_lb
        ));
    }
    lines.push(format!("Fasteners,{},,", summary.fasteners));
    lines.push(format!("Total,,,{:.2}", summary.total_weight_lb));
    lines.join("\n")
}
