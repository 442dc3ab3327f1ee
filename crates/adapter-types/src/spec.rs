use serde::{Deserialize, Serialize};

use crate::opening::{DuctKind, DuctOpening, Footprint, Opening};

/// Dimensions of a curb adapter.
///
/// The base footprint is the existing curb; the optional top footprint is the
/// replacement unit's base. When the top is omitted the adapter is a
/// straight-walled box. Duct positions are measured from the base origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub length: f64,
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_width: Option<f64>,
    pub height: f64,
    pub flange_height: f64,
    pub supply: DuctOpening,
    #[serde(rename = "return", alias = "ret")]
    pub ret: DuctOpening,
    pub steel_gauge: f64,
    pub fastener_spacing: f64,
    pub bend_limit: f64,
}

impl AdapterSpec {
    /// A straight box with the given base and height. Remaining fields take
    /// typical 18 ga values; callers override what they need.
    pub fn straight(length: f64, width: f64, height: f64) -> Self {
        Self {
            model: None,
            length,
            width,
            top_length: None,
            top_width: None,
            height,
            flange_height: 3.0,
            supply: DuctOpening::at(length * 0.25, width * 0.5),
            ret: DuctOpening::at(length * 0.75, width * 0.5),
            steel_gauge: 18.0,
            fastener_spacing: 4.0,
            bend_limit: 80.0,
        }
    }

    pub fn with_top(mut self, top_length: f64, top_width: f64) -> Self {
        self.top_length = Some(top_length);
        self.top_width = Some(top_width);
        self
    }

    pub fn top_length(&self) -> f64 {
        self.top_length.unwrap_or(self.length)
    }

    pub fn top_width(&self) -> f64 {
        self.top_width.unwrap_or(self.width)
    }

    pub fn base_footprint(&self) -> Footprint {
        Footprint::new(self.length, self.width)
    }

    pub fn top_footprint(&self) -> Footprint {
        Footprint::new(self.top_length(), self.top_width())
    }

    pub fn is_tapered(&self) -> bool {
        self.top_length() != self.length || self.top_width() != self.width
    }

    pub fn duct(&self, kind: DuctKind) -> &DuctOpening {
        match kind {
            DuctKind::Supply => &self.supply,
            DuctKind::Return => &self.ret,
        }
    }

    /// Fields that must be strictly positive and finite but are not.
    pub fn invalid_fields(&self) -> Vec<(&'static str, f64)> {
        let mut positive = vec![
            ("length", self.length),
            ("width", self.width),
            ("topLength", self.top_length()),
            ("topWidth", self.top_width()),
            ("height", self.height),
            ("flangeHeight", self.flange_height),
            ("steelGauge", self.steel_gauge),
            ("fastenerSpacing", self.fastener_spacing),
            ("bendLimit", self.bend_limit),
        ];
        for (kind, duct) in [(DuctKind::Supply, &self.supply), (DuctKind::Return, &self.ret)] {
            let (w, h) = duct.size(kind);
            let (w_name, h_name) = match kind {
                DuctKind::Supply => ("supply.w", "supply.h"),
                DuctKind::Return => ("return.w", "return.h"),
            };
            positive.push((w_name, w));
            positive.push((h_name, h));
        }

        let mut invalid: Vec<(&'static str, f64)> = positive
            .into_iter()
            .filter(|(_, v)| !(v.is_finite() && *v > 0.0))
            .collect();

        for (name, v) in [
            ("supply.x", self.supply.x),
            ("supply.y", self.supply.y),
            ("return.x", self.ret.x),
            ("return.y", self.ret.y),
        ] {
            if !v.is_finite() {
                invalid.push((name, v));
            }
        }
        invalid
    }
}

/// Clear opening of the new unit's curb, in plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopOpen {
    pub w: f64,
    pub h: f64,
}

/// Inputs to the flat-pattern generator.
///
/// Opening `x`/`y` are offsets from the adapter center, not absolute positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatPatternSpec {
    pub top_open: TopOpen,
    pub supply: Opening,
    #[serde(rename = "return", alias = "ret")]
    pub ret: Opening,
    /// Seat margin around the top opening.
    pub top_base: f64,
    pub flange: f64,
    pub height: f64,
    /// Width of the support bar strip.
    pub support_bar: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steel_gauge: Option<f64>,
}
