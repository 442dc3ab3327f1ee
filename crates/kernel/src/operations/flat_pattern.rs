use adapter_types::{DuctKind, FlatPatternSpec, Opening};
use tracing::{info, instrument, warn};

use crate::geometry::point::Point2d;
use crate::geometry::primitives::{corner_rectangle, CentroidAccumulator};
use crate::operations::{require_finite, require_non_negative, require_positive, OperationError};
use crate::parts::{AdapterGeometry, BendLine, FlatPart, GeometrySummary};

/// Flange bend angle on every wall, degrees.
pub const FLANGE_BEND_ANGLE: f64 = 90.0;

/// Unfold the adapter into its sheet-metal parts.
///
/// Produces the deck (outline with seat, supply and return cutouts), two long
/// and two short walls each with a flange bend, and the support bar. The
/// summary's center of gravity treats the deck as a lamina with holes and is
/// reported relative to the deck center.
///
/// Deck holes never overlap. The seat is always cut; an opening only adds
/// the part of itself that lies on deck material outside the seat and any
/// earlier opening, so an opening wholly inside the seat cuts nothing extra.
///
/// Openings are not rejected for poor placement. An opening that leaves the
/// deck, crosses the seat edge or overlaps the other opening is reported in
/// [`AdapterGeometry::warnings`]; a zero-size opening is skipped and reported.
#[instrument(skip(spec))]
pub fn build_flat_pattern(spec: &FlatPatternSpec) -> Result<AdapterGeometry, OperationError> {
    let open_w = require_positive("top_open.w", spec.top_open.w)?;
    let open_h = require_positive("top_open.h", spec.top_open.h)?;
    let top_base = require_non_negative("top_base", spec.top_base)?;
    let flange = require_non_negative("flange", spec.flange)?;
    let height = require_positive("height", spec.height)?;
    let support_bar = require_positive("support_bar", spec.support_bar)?;
    for (name, v) in [
        ("supply.x", spec.supply.x),
        ("supply.y", spec.supply.y),
        ("return.x", spec.ret.x),
        ("return.y", spec.ret.y),
    ] {
        require_finite(name, v)?;
    }

    let outer_width = open_w + 2.0 * (top_base + flange);
    let outer_depth = open_h + 2.0 * (top_base + flange);
    let seat_width = open_w + 2.0 * top_base;
    let seat_depth = open_h + 2.0 * top_base;
    let center = Point2d::new(outer_width / 2.0, outer_depth / 2.0);

    let mut warnings = Vec::new();

    // Seat and openings in deck coordinates.
    let seat = Opening::new(center.x, center.y, seat_width, seat_depth);
    let placed: Vec<(&str, Opening)> = [(DuctKind::Supply, &spec.supply), (DuctKind::Return, &spec.ret)]
        .into_iter()
        .map(|(kind, o)| (kind.label(), Opening::new(center.x + o.x, center.y + o.y, o.w, o.h)))
        .collect();
    let usable = check_openings(&placed, &seat, outer_width, outer_depth, &mut warnings);
    let outline = Opening::new(center.x, center.y, outer_width, outer_depth);
    let cutouts = deck_cutouts(&outline, &seat, &usable);

    let mut deck = FlatPart::new("DECK", corner_rectangle(outer_width, outer_depth, Point2d::ORIGIN).to_vec())
        .with_label(center, "DECK")
        .with_label(
            Point2d::new(outer_width / 2.0, outer_depth - flange / 2.0),
            format!("FLANGE {flange:.2}\""),
        );
    deck.holes.extend(cutouts.iter().map(opening_outline));

    let wall_height = height + flange;
    let wall = |name: &str, length: f64| {
        FlatPart::new(name, corner_rectangle(length, wall_height, Point2d::ORIGIN).to_vec()).with_bend(BendLine {
            p1: Point2d::new(0.0, flange),
            p2: Point2d::new(length, flange),
            angle: FLANGE_BEND_ANGLE,
        })
    };

    let support = FlatPart::new("SUPPORT_BAR", corner_rectangle(seat_width, support_bar, Point2d::ORIGIN).to_vec())
        .with_label(Point2d::new(seat_width / 2.0, support_bar / 2.0), "SUPPORT");

    let center_of_gravity = deck_center_of_gravity(center, &outline, &cutouts)?;

    let mut parts = vec![
        deck,
        wall("WALL_LONG_A", outer_width),
        wall("WALL_LONG_B", outer_width),
        wall("WALL_SHORT_A", outer_depth),
        wall("WALL_SHORT_B", outer_depth),
        support,
    ];
    if let Some(gauge) = spec.steel_gauge {
        for part in &mut parts {
            part.material_gauge = Some(gauge);
        }
    }

    info!(
        parts = parts.len(),
        outer_width,
        outer_depth,
        cog_x = center_of_gravity.x,
        cog_y = center_of_gravity.y,
        warnings = warnings.len(),
        "flat pattern built"
    );

    Ok(AdapterGeometry {
        parts,
        summary: GeometrySummary {
            outer_width,
            outer_depth,
            seat_width,
            seat_depth,
            height,
            center_of_gravity,
        },
        warnings,
    })
}

/// Containment checks. Returns the non-degenerate openings, in order.
fn check_openings<'a>(
    placed: &[(&'a str, Opening)],
    seat: &Opening,
    outer_width: f64,
    outer_depth: f64,
    warnings: &mut Vec<String>,
) -> Vec<(&'a str, Opening)> {
    let mut usable: Vec<(&str, Opening)> = Vec::with_capacity(placed.len());

    for &(name, opening) in placed {
        if opening.is_degenerate() {
            let msg = format!(
                "{name} opening is degenerate ({} x {}); cutout omitted",
                opening.w, opening.h
            );
            warn!("{msg}");
            warnings.push(msg);
            continue;
        }

        let (x0, y0, x1, y1) = opening.bounds();
        if x0 < 0.0 || y0 < 0.0 || x1 > outer_width || y1 > outer_depth {
            let msg = format!("{name} opening extends outside the deck outline");
            warn!("{msg}");
            warnings.push(msg);
        }
        if opening.overlaps(seat) && !seat.contains(&opening) {
            let msg = format!("{name} opening crosses the seat cutout edge");
            warn!("{msg}");
            warnings.push(msg);
        }
        for (other_name, other) in &usable {
            if opening.overlaps(other) {
                let msg = format!("{name} opening overlaps the {other_name} opening");
                warn!("{msg}");
                warnings.push(msg);
            }
        }
        usable.push((name, opening));
    }
    usable
}

fn opening_outline(opening: &Opening) -> Vec<Point2d> {
    let origin = Point2d::new(opening.x - opening.w / 2.0, opening.y - opening.h / 2.0);
    corner_rectangle(opening.w, opening.h, origin).to_vec()
}

/// Seat first, then each opening clipped to the deck and reduced to the
/// pieces not already removed. The result is pairwise disjoint.
fn deck_cutouts(outline: &Opening, seat: &Opening, openings: &[(&str, Opening)]) -> Vec<Opening> {
    let mut cutouts = vec![*seat];
    for (_, opening) in openings {
        let Some(on_deck) = opening.intersection(outline) else {
            continue;
        };
        let mut pieces = vec![on_deck];
        for cut in &cutouts {
            pieces = pieces.iter().flat_map(|p| p.difference(cut)).collect();
        }
        cutouts.extend(pieces);
    }
    cutouts
}

/// Composite centroid of the deck lamina relative to its own center.
fn deck_center_of_gravity(
    center: Point2d,
    outline: &Opening,
    cutouts: &[Opening],
) -> Result<Point2d, OperationError> {
    let mut acc = CentroidAccumulator::new();
    acc.add(outline.area(), center);
    for cut in cutouts {
        acc.subtract(cut.area(), Point2d::new(cut.x, cut.y));
    }

    let cog = acc.centroid().ok_or(OperationError::DegenerateLamina {
        net_area: acc.net_area(),
    })?;
    Ok(Point2d::new(cog.x - center.x, cog.y - center.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::polygon_area;
    use adapter_types::TopOpen;
    use approx::assert_abs_diff_eq;

    /// Deck 67 x 37 with a 64 x 34 seat: a 1.5 band of material around it.
    fn spec() -> FlatPatternSpec {
        FlatPatternSpec {
            top_open: TopOpen { w: 60.0, h: 30.0 },
            supply: Opening::new(-15.0, 0.0, 12.0, 8.0),
            ret: Opening::new(15.0, 0.0, 12.0, 8.0),
            top_base: 2.0,
            flange: 1.5,
            height: 18.0,
            support_bar: 3.0,
            steel_gauge: None,
        }
    }

    /// Openings crossing the left and right seat edges, mirrored.
    fn straddling() -> FlatPatternSpec {
        FlatPatternSpec {
            supply: Opening::new(-32.0, 0.0, 2.0, 8.0),
            ret: Opening::new(32.0, 0.0, 2.0, 8.0),
            ..spec()
        }
    }

    fn deck_area(geo: &AdapterGeometry) -> f64 {
        geo.part("DECK").unwrap().net_area()
    }

    #[test]
    fn test_summary_dimensions() {
        let geo = build_flat_pattern(&spec()).unwrap();
        let s = geo.summary;
        assert_eq!(s.outer_width, 67.0);
        assert_eq!(s.outer_depth, 37.0);
        assert_eq!(s.seat_width, 64.0);
        assert_eq!(s.seat_depth, 34.0);
        assert_eq!(s.height, 18.0);
    }

    #[test]
    fn test_part_set() {
        let geo = build_flat_pattern(&spec()).unwrap();
        let names: Vec<&str> = geo.parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["DECK", "WALL_LONG_A", "WALL_LONG_B", "WALL_SHORT_A", "WALL_SHORT_B", "SUPPORT_BAR"]
        );

        let deck = geo.part("DECK").unwrap();
        assert_eq!(deck.labels[1].text, "FLANGE 1.50\"");

        let long = geo.part("WALL_LONG_A").unwrap();
        assert_eq!(polygon_area(&long.outline), 67.0 * 19.5);
        assert_eq!(long.bends.len(), 1);
        assert_eq!(long.bends[0].p1, Point2d::new(0.0, 1.5));
        assert_eq!(long.bends[0].p2, Point2d::new(67.0, 1.5));
        assert_eq!(long.bends[0].angle, 90.0);

        let short = geo.part("WALL_SHORT_B").unwrap();
        assert_eq!(short.bends[0].p2.x, 37.0);

        let bar = geo.part("SUPPORT_BAR").unwrap();
        assert_eq!(polygon_area(&bar.outline), 64.0 * 3.0);
    }

    #[test]
    fn test_openings_inside_seat_cut_nothing_extra() {
        let geo = build_flat_pattern(&spec()).unwrap();
        assert!(geo.warnings.is_empty(), "{:?}", geo.warnings);
        assert_eq!(geo.part("DECK").unwrap().holes.len(), 1);
        assert_abs_diff_eq!(deck_area(&geo), 67.0 * 37.0 - 64.0 * 34.0, epsilon = 1e-9);

        let cog = geo.summary.center_of_gravity;
        assert_abs_diff_eq!(cog.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cog.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_straddling_openings_cut_only_the_band() {
        let geo = build_flat_pattern(&straddling()).unwrap();
        let deck = geo.part("DECK").unwrap();
        assert_eq!(deck.holes.len(), 3);
        // Each opening removes a 1 x 8 strip of the band.
        assert_abs_diff_eq!(deck_area(&geo), 67.0 * 37.0 - 64.0 * 34.0 - 16.0, epsilon = 1e-9);
        for hole in &deck.holes[1..] {
            assert_abs_diff_eq!(polygon_area(hole), 8.0, epsilon = 1e-9);
        }
        assert!(geo
            .warnings
            .iter()
            .any(|w| w == "supply opening crosses the seat cutout edge"));

        let cog = geo.summary.center_of_gravity;
        assert_abs_diff_eq!(cog.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cog.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_openings_over_top_edge_shift_centroid_down() {
        let mut s = spec();
        s.supply = Opening::new(-20.0, 17.0, 12.0, 2.0);
        s.ret = Opening::new(20.0, 17.0, 12.0, 2.0);
        let cog = build_flat_pattern(&s).unwrap().summary.center_of_gravity;
        assert_abs_diff_eq!(cog.x, 0.0, epsilon = 1e-9);
        assert!(cog.y < 0.0);
    }

    #[test]
    fn test_supply_moved_right_pulls_centroid_left() {
        let mut s = straddling();
        s.supply.x += 0.5;
        let geo = build_flat_pattern(&s).unwrap();
        assert!(geo.summary.center_of_gravity.x < 0.0);
    }

    #[test]
    fn test_overlapping_openings_are_flagged() {
        let mut s = spec();
        s.supply = Opening::new(-5.0, 0.0, 12.0, 8.0);
        s.ret = Opening::new(5.0, 0.0, 12.0, 8.0);
        let geo = build_flat_pattern(&s).unwrap();
        assert_eq!(geo.warnings, vec!["return opening overlaps the supply opening".to_string()]);
    }

    #[test]
    fn test_overlapping_openings_on_the_band_cut_once() {
        let mut s = spec();
        s.supply = Opening::new(-2.0, 17.0, 6.0, 2.0);
        s.ret = Opening::new(2.0, 17.0, 6.0, 2.0);
        let geo = build_flat_pattern(&s).unwrap();
        assert!(geo
            .warnings
            .iter()
            .any(|w| w == "return opening overlaps the supply opening"));
        // Band strip y in [17, 18] relative to center, x in [-5, 5].
        assert_abs_diff_eq!(deck_area(&geo), 67.0 * 37.0 - 64.0 * 34.0 - 10.0, epsilon = 1e-9);
        assert_eq!(geo.part("DECK").unwrap().holes.len(), 3);
    }

    #[test]
    fn test_opening_outside_deck_is_flagged() {
        let mut s = spec();
        s.ret = Opening::new(40.0, 0.0, 12.0, 8.0);
        let geo = build_flat_pattern(&s).unwrap();
        assert!(geo.warnings.iter().any(|w| w.contains("return opening extends outside")));
        // Nothing of it lands on the deck.
        assert_eq!(geo.part("DECK").unwrap().holes.len(), 1);
    }

    #[test]
    fn test_degenerate_opening_skipped() {
        let mut s = straddling();
        s.ret.w = 0.0;
        let geo = build_flat_pattern(&s).unwrap();
        assert_eq!(geo.part("DECK").unwrap().holes.len(), 2);
        assert!(geo.warnings.iter().any(|w| w.contains("degenerate")));
    }

    #[test]
    fn test_steel_gauge_stamped_on_parts() {
        let geo = build_flat_pattern(&spec()).unwrap();
        assert!(geo.parts.iter().all(|p| p.material_gauge.is_none()));

        let mut s = spec();
        s.steel_gauge = Some(16.0);
        let geo = build_flat_pattern(&s).unwrap();
        assert!(geo.parts.iter().all(|p| p.material_gauge == Some(16.0)));
    }

    #[test]
    fn test_invalid_dimensions_fail() {
        let mut s = spec();
        s.height = -1.0;
        assert!(build_flat_pattern(&s).is_err());

        let mut s = spec();
        s.top_open.w = 0.0;
        assert!(matches!(
            build_flat_pattern(&s),
            Err(OperationError::InvalidDimension { parameter: "top_open.w", .. })
        ));
    }
}
