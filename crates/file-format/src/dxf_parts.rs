//! One DXF drawing per flat part: CUT polylines, BEND lines, ETCH text.

use curb_kernel::geometry::point::Point2d;
use curb_kernel::{default_tolerance, FlatPart};

pub const LAYER_CUT: &str = "CUT";
pub const LAYER_BEND: &str = "BEND";
pub const LAYER_ETCH: &str = "ETCH";

/// Etched text height, drawing units.
pub const TEXT_HEIGHT: f64 = 0.25;

/// Shared header: `$INSUNITS = 1` (inches).
const HEADER: &str = "0\nSECTION\n2\nHEADER\n9\n$INSUNITS\n70\n1\n0\nENDSEC\n";

/// Serialize one part. Coordinates are fixed at four decimals.
pub fn part_to_dxf(part: &FlatPart) -> String {
    let mut entities = String::new();

    polyline(&mut entities, &part.outline, LAYER_CUT);
    for hole in &part.holes {
        polyline(&mut entities, hole, LAYER_CUT);
    }

    for bend in &part.bends {
        line(&mut entities, &bend.p1, &bend.p2, LAYER_BEND);
        text(
            &mut entities,
            &bend.midpoint(),
            &format!("{:.0} deg", bend.angle.round()),
            LAYER_ETCH,
        );
    }

    for label in &part.labels {
        text(&mut entities, &label.at, &label.text, LAYER_ETCH);
    }

    format!("{HEADER}0\nSECTION\n2\nENTITIES\n{entities}0\nENDSEC\n0\nEOF\n")
}

/// `(file name, contents)` for every part, in input order.
pub fn parts_to_dxf(parts: &[FlatPart]) -> Vec<(String, String)> {
    parts
        .iter()
        .map(|part| (format!("{}.dxf", part.name), part_to_dxf(part)))
        .collect()
}

/// Closed LWPOLYLINE. The first point is repeated when the ring is open.
fn polyline(out: &mut String, points: &[Point2d], layer: &str) {
    let Some(first) = points.first() else {
        return;
    };
    let already_closed = points
        .last()
        .is_some_and(|last| points.len() > 1 && default_tolerance().points_coincident(last, first));
    let count = if already_closed { points.len() } else { points.len() + 1 };

    out.push_str(&format!("0\nLWPOLYLINE\n8\n{layer}\n90\n{count}\n70\n1\n"));
    let closing = (!already_closed).then_some(first);
    for p in points.iter().chain(closing) {
        out.push_str(&format!("10\n{:.4}\n20\n{:.4}\n", p.x, p.y));
    }
}

fn line(out: &mut String, a: &Point2d, b: &Point2d, layer: &str) {
    out.push_str(&format!(
        "0\nLINE\n8\n{layer}\n10\n{:.4}\n20\n{:.4}\n11\n{:.4}\n21\n{:.4}\n",
        a.x, a.y, b.x, b.y
    ));
}

fn text(out: &mut String, at: &Point2d, value: &str, layer: &str) {
    out.push_str(&format!(
        "0\nTEXT\n8\n{layer}\n10\n{:.4}\n20\n{:.4}\n40\n{TEXT_HEIGHT}\n1\n{}\n",
        at.x,
        at.y,
        collapse_whitespace(value)
    ));
}

/// Each run of whitespace becomes a single space. Nothing is trimmed, so a
/// label with leading or trailing blanks keeps one.
fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for c in value.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
