//! Plenum sizing and a coarse flow-regime check.

use serde::{Deserialize, Serialize};
use tracing::debug;

use adapter_types::AdapterSpec;

use crate::types::EngineError;

pub const SUPPLY_VELOCITY_FPM: f64 = 1200.0;
pub const RETURN_VELOCITY_FPM: f64 = 900.0;
/// Smallest plenum area used for sizing, ft².
pub const MIN_PLENUM_AREA_SQ_FT: f64 = 0.5;
/// Kinematic viscosity of air at 70°F, ft²/s.
pub const AIR_KINEMATIC_VISCOSITY: f64 = 1.6e-4;
/// Pressure drop above this raises an advisory, in. w.c.
pub const PRESSURE_DROP_LIMIT_INWC: f64 = 0.3;

/// Caller-supplied airflow in place of the area-derived estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfmOverrides {
    #[serde(default)]
    pub supply: Option<f64>,
    #[serde(default, rename = "return", alias = "ret")]
    pub ret: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlenumSizing {
    pub cfm_supply: f64,
    pub cfm_return: f64,
    pub pressure_drop_inwc: f64,
    pub supply_velocity_fpm: f64,
    pub return_velocity_fpm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

/// Reynolds number thresholds: above 4000 turbulent, above 2300 transitional.
pub fn flow_regime(reynolds: f64) -> FlowRegime {
    if reynolds > 4000.0 {
        FlowRegime::Turbulent
    } else if reynolds > 2300.0 {
        FlowRegime::Transitional
    } else {
        FlowRegime::Laminar
    }
}

/// Airflow at design velocities through the base footprint.
///
/// `A = max(0.5, L·W / 864)` ft², `cfm = round(A·v)` unless overridden, and
/// `ΔP = 0.08·(cfm_supply/1000)²` rounded to three decimals.
pub fn size_plenum(spec: &AdapterSpec, overrides: &CfmOverrides) -> PlenumSizing {
    let area_sq_ft = (spec.length * spec.width / (144.0 * 6.0)).max(MIN_PLENUM_AREA_SQ_FT);
    let cfm_supply = overrides
        .supply
        .unwrap_or_else(|| (area_sq_ft * SUPPLY_VELOCITY_FPM).round());
    let cfm_return = overrides
        .ret
        .unwrap_or_else(|| (area_sq_ft * RETURN_VELOCITY_FPM).round());
    let pressure_drop_inwc = round3(0.08 * (cfm_supply / 1000.0).powi(2));

    PlenumSizing {
        cfm_supply,
        cfm_return,
        pressure_drop_inwc,
        supply_velocity_fpm: SUPPLY_VELOCITY_FPM,
        return_velocity_fpm: RETURN_VELOCITY_FPM,
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Hydraulic diameter of an `L × W` inch rectangle, in feet.
pub fn hydraulic_diameter_ft(length: f64, width: f64) -> Result<f64, EngineError> {
    let perimeter_half = length + width;
    if perimeter_half == 0.0 {
        return Err(EngineError::DivisionByZero {
            quantity: "hydraulic diameter",
        });
    }
    Ok(2.0 * (length * width / perimeter_half) / 12.0)
}

/// `Re = V·D/ν` with `V` in fpm and `D` in feet.
pub fn reynolds_number(velocity_fpm: f64, diameter_ft: f64) -> f64 {
    (velocity_fpm / 60.0) * diameter_ft / AIR_KINEMATIC_VISCOSITY
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirflowAnalysis {
    pub sizing: PlenumSizing,
    pub hydraulic_diameter_ft: f64,
    pub reynolds_number: f64,
    pub regime: FlowRegime,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Sizing plus regime, with advisories for high pressure drop and
/// non-turbulent flow.
pub fn analyze_airflow(spec: &AdapterSpec, overrides: &CfmOverrides) -> Result<AirflowAnalysis, EngineError> {
    let sizing = size_plenum(spec, overrides);
    let diameter = hydraulic_diameter_ft(spec.length, spec.width)?;
    let avg_velocity = (sizing.supply_velocity_fpm + sizing.return_velocity_fpm) / 2.0;
    let reynolds = reynolds_number(avg_velocity, diameter);
    let regime = flow_regime(reynolds);

    let mut warnings = Vec::new();
    if sizing.pressure_drop_inwc > PRESSURE_DROP_LIMIT_INWC {
        warnings.push(format!(
            "Pressure drop {:.2} in.wc exceeds {PRESSURE_DROP_LIMIT_INWC} in.wc; expect an energy penalty",
            sizing.pressure_drop_inwc
        ));
    }
    match regime {
        FlowRegime::Laminar => warnings.push("Laminar flow detected; distribution may be uneven".to_string()),
        FlowRegime::Transitional => warnings.push("Transitional flow; performance may be unstable".to_string()),
        FlowRegime::Turbulent => {}
    }
    debug!(
        cfm_supply = sizing.cfm_supply,
        cfm_return = sizing.cfm_return,
        reynolds,
        ?regime,
        "airflow analyzed"
    );

    Ok(AirflowAnalysis {
        sizing,
        hydraulic_diameter_ft: diameter,
        reynolds_number: reynolds,
        regime,
        warnings,
    })
}
