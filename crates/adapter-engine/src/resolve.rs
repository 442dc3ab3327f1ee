//! Merging partial dimension sources into one complete `AdapterSpec`.

use adapter_types::{AdapterSpec, DuctOpening, PartialAdapterSpec, PartialDuct};
use tracing::debug;

use crate::types::EngineError;

/// First defined value of a field across sources in priority order.
fn first<T>(sources: &[PartialAdapterSpec], field: impl Fn(&PartialAdapterSpec) -> Option<T>) -> Option<T> {
    sources.iter().find_map(field)
}

fn first_duct(
    sources: &[PartialAdapterSpec],
    duct: impl Fn(&PartialAdapterSpec) -> &PartialDuct,
) -> PartialDuct {
    PartialDuct {
        x: first(sources, |s| duct(s).x),
        y: first(sources, |s| duct(s).y),
        w: first(sources, |s| duct(s).w),
        h: first(sources, |s| duct(s).h),
    }
}

/// Resolve sources (highest priority first) into a validated spec.
///
/// Every field takes the first value any source defines. Required fields
/// are checked once after merging and all missing ones are reported
/// together. Optional fields fall back to: `supply.y`/`return.y` 0, top
/// footprint equal to the base, duct sizes to the per-kind defaults.
pub fn resolve_spec(sources: &[PartialAdapterSpec]) -> Result<AdapterSpec, EngineError> {
    let supply = first_duct(sources, |s| &s.supply);
    let ret = first_duct(sources, |s| &s.ret);

    let length = first(sources, |s| s.length);
    let width = first(sources, |s| s.width);
    let height = first(sources, |s| s.height);
    let flange_height = first(sources, |s| s.flange_height);
    let steel_gauge = first(sources, |s| s.steel_gauge);
    let fastener_spacing = first(sources, |s| s.fastener_spacing);
    let bend_limit = first(sources, |s| s.bend_limit);

    let required = [
        ("length", length),
        ("width", width),
        ("height", height),
        ("flangeHeight", flange_height),
        ("supply.x", supply.x),
        ("return.x", ret.x),
        ("steelGauge", steel_gauge),
        ("fastenerSpacing", fastener_spacing),
        ("bendLimit", bend_limit),
    ];
    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::MissingFields(missing));
    }

    // All required values are present past this point.
    let [length, width, height, flange_height, supply_x, ret_x, steel_gauge, fastener_spacing, bend_limit] =
        required.map(|(_, v)| v.unwrap_or_default());

    let spec = AdapterSpec {
        model: first(sources, |s| s.model.clone()),
        length,
        width,
        top_length: first(sources, |s| s.top_length),
        top_width: first(sources, |s| s.top_width),
        height,
        flange_height,
        supply: DuctOpening {
            x: supply_x,
            y: supply.y.unwrap_or(0.0),
            w: supply.w,
            h: supply.h,
        },
        ret: DuctOpening {
            x: ret_x,
            y: ret.y.unwrap_or(0.0),
            w: ret.w,
            h: ret.h,
        },
        steel_gauge,
        fastener_spacing,
        bend_limit,
    };
    validate_spec(&spec)?;

    debug!(sources = sources.len(), model = ?spec.model, "spec resolved");
    Ok(spec)
}

/// Reject the first non-positive or non-finite dimension.
pub fn validate_spec(spec: &AdapterSpec) -> Result<(), EngineError> {
    match spec.invalid_fields().first() {
        Some(&(field, value)) => Err(EngineError::InvalidField { field, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> PartialAdapterSpec {
        PartialAdapterSpec {
            length: Some(90.0),
            width: Some(50.0),
            height: Some(18.0),
            flange_height: Some(2.0),
            supply: PartialDuct {
                x: Some(25.0),
                ..PartialDuct::default()
            },
            ret: PartialDuct {
                x: Some(65.0),
                y: Some(25.0),
                ..PartialDuct::default()
            },
            steel_gauge: Some(18.0),
            fastener_spacing: Some(4.0),
            bend_limit: Some(80.0),
            ..PartialAdapterSpec::default()
        }
    }

    #[test]
    fn test_single_complete_source() {
        let spec = resolve_spec(&[full()]).unwrap();
        assert_eq!(spec.length, 90.0);
        assert_eq!(spec.supply.y, 0.0);
        assert_eq!(spec.ret.y, 25.0);
        assert_eq!(spec.top_length(), 90.0);
        assert_eq!(spec.supply.w, None);
    }

    #[test]
    fn test_first_source_wins_per_field() {
        let overrides = PartialAdapterSpec {
            height: Some(24.0),
            supply: PartialDuct {
                y: Some(10.0),
                ..PartialDuct::default()
            },
            ..PartialAdapterSpec::default()
        };
        let spec = resolve_spec(&[overrides, full()]).unwrap();
        assert_eq!(spec.height, 24.0);
        assert_eq!(spec.supply.x, 25.0);
        assert_eq!(spec.supply.y, 10.0);
        assert_eq!(spec.length, 90.0);
    }

    #[test]
    fn test_all_missing_fields_reported_together() {
        let mut partial = full();
        partial.width = None;
        partial.ret.x = None;
        partial.bend_limit = None;
        match resolve_spec(&[partial]) {
            Err(EngineError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["width", "return.x", "bendLimit"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_sources_miss_everything() {
        match resolve_spec(&[]) {
            Err(EngineError::MissingFields(fields)) => assert_eq!(fields.len(), 9),
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_value_rejected() {
        let mut partial = full();
        partial.height = Some(f64::NAN);
        assert!(matches!(
            resolve_spec(&[partial]),
            Err(EngineError::InvalidField { field: "height", .. })
        ));

        let mut partial = full();
        partial.steel_gauge = Some(0.0);
        assert!(matches!(
            resolve_spec(&[partial]),
            Err(EngineError::InvalidField { field: "steelGauge", .. })
        ));
    }
}
