use serde::{Deserialize, Serialize};

/// Default supply duct size (w, h) when a target leaves it unspecified.
pub const DEFAULT_SUPPLY_SIZE: (f64, f64) = (20.0, 16.0);
/// Default return duct size (w, h) when a target leaves it unspecified.
pub const DEFAULT_RETURN_SIZE: (f64, f64) = (24.0, 20.0);

/// An axis-aligned rectangular opening, centered on `(x, y)` at elevation `z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub z: f64,
}

impl Opening {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h, z: 0.0 }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// True when either side is zero, negative or not a number.
    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0) || !self.w.is_finite() || !self.h.is_finite()
    }

    /// Bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let hw = self.w / 2.0;
        let hh = self.h / 2.0;
        (self.x - hw, self.y - hh, self.x + hw, self.y + hh)
    }

    /// Whether the interiors of two openings intersect. Touching edges do not count.
    pub fn overlaps(&self, other: &Opening) -> bool {
        let (ax0, ay0, ax1, ay1) = self.bounds();
        let (bx0, by0, bx1, by1) = other.bounds();
        ax0 < bx1 && bx0 < ax1 && ay0 < by1 && by0 < ay1
    }

    /// Opening spanning `(min_x, min_y)` to `(max_x, max_y)` at `z = 0`.
    pub fn from_bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(
            (min_x + max_x) / 2.0,
            (min_y + max_y) / 2.0,
            max_x - min_x,
            max_y - min_y,
        )
    }

    /// Whether `other` lies entirely within this opening, edges included.
    pub fn contains(&self, other: &Opening) -> bool {
        let (ax0, ay0, ax1, ay1) = self.bounds();
        let (bx0, by0, bx1, by1) = other.bounds();
        ax0 <= bx0 && ay0 <= by0 && bx1 <= ax1 && by1 <= ay1
    }

    /// Shared region of two openings, `None` unless the interiors overlap.
    pub fn intersection(&self, other: &Opening) -> Option<Opening> {
        if !self.overlaps(other) {
            return None;
        }
        let (ax0, ay0, ax1, ay1) = self.bounds();
        let (bx0, by0, bx1, by1) = other.bounds();
        Some(Opening {
            z: self.z,
            ..Opening::from_bounds(ax0.max(bx0), ay0.max(by0), ax1.min(bx1), ay1.min(by1))
        })
    }

    /// The part of this opening outside `other`, as at most four disjoint
    /// rectangles: full-height strips left and right of the overlap, then
    /// the pieces below and above it.
    pub fn difference(&self, other: &Opening) -> Vec<Opening> {
        let Some(cut) = self.intersection(other) else {
            return vec![*self];
        };
        let (ax0, ay0, ax1, ay1) = self.bounds();
        let (cx0, cy0, cx1, cy1) = cut.bounds();

        let mut pieces = Vec::with_capacity(4);
        if cx0 > ax0 {
            pieces.push(Opening::from_bounds(ax0, ay0, cx0, ay1));
        }
        if ax1 > cx1 {
            pieces.push(Opening::from_bounds(cx1, ay0, ax1, ay1));
        }
        if cy0 > ay0 {
            pieces.push(Opening::from_bounds(cx0, ay0, cx1, cy0));
        }
        if ay1 > cy1 {
            pieces.push(Opening::from_bounds(cx0, cy1, cx1, ay1));
        }
        for piece in &mut pieces {
            piece.z = self.z;
        }
        pieces
    }
}

/// A rectangular footprint anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub length: f64,
    pub width: f64,
}

impl Footprint {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.length / 2.0, self.width / 2.0)
    }
}

/// Which duct an opening feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuctKind {
    Supply,
    Return,
}

impl DuctKind {
    pub fn default_size(self) -> (f64, f64) {
        match self {
            DuctKind::Supply => DEFAULT_SUPPLY_SIZE,
            DuctKind::Return => DEFAULT_RETURN_SIZE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DuctKind::Supply => "supply",
            DuctKind::Return => "return",
        }
    }
}

/// A duct opening position with optional size overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuctOpening {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
}

impl DuctOpening {
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, w: None, h: None }
    }

    pub fn sized(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: Some(w),
            h: Some(h),
        }
    }

    /// Resolved `(w, h)`, falling back to the default size for `kind`.
    pub fn size(&self, kind: DuctKind) -> (f64, f64) {
        let (dw, dh) = kind.default_size();
        (self.w.unwrap_or(dw), self.h.unwrap_or(dh))
    }

    /// Full opening rectangle at elevation `z`.
    pub fn to_opening(&self, kind: DuctKind, z: f64) -> Opening {
        let (w, h) = self.size(kind);
        Opening {
            x: self.x,
            y: self.y,
            w,
            h,
            z,
        }
    }
}
