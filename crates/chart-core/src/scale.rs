// File: crates/chart-core/src/scale.rs
// Summary: Data-to-pixel transforms for linear and log10 axes.

use crate::axis::ScaleKind;

const LOG_FLOOR: f64 = 1e-300;

/// Maps data values onto a pixel span. `v0` lands on `px0` and `v1` on `px1`,
/// so an inverted axis is expressed by passing `v0 > v1`.
#[derive(Clone, Copy, Debug)]
pub struct AxisScale {
    pub v0: f64,
    pub v1: f64,
    pub px0: f32,
    pub px1: f32,
    pub kind: ScaleKind,
    // cached transformed endpoints
    t0: f64,
    t1: f64,
}

impl AxisScale {
    pub fn new(v0: f64, v1: f64, px0: f32, px1: f32, kind: ScaleKind) -> Self {
        let mut s = Self { v0, v1, px0, px1, kind, t0: 0.0, t1: 0.0 };
        s.t0 = s.forward(v0);
        s.t1 = s.forward(v1);
        if (s.t1 - s.t0).abs() < 1e-12 {
            s.t1 = s.t0 + 1.0;
        }
        s
    }

    #[inline]
    fn forward(&self, v: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => v,
            ScaleKind::Log10 => v.max(LOG_FLOOR).log10(),
        }
    }

    #[inline]
    fn inverse(&self, t: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => t,
            ScaleKind::Log10 => 10f64.powf(t),
        }
    }

    /// Whether `v` can be placed on this axis (log axes reject non-positive values).
    #[inline]
    pub fn accepts(&self, v: f64) -> bool {
        v.is_finite() && (self.kind == ScaleKind::Linear || v > 0.0)
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let frac = (self.forward(v) - self.t0) / (self.t1 - self.t0);
        self.px0 + frac as f32 * (self.px1 - self.px0)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> f64 {
        let span = (self.px1 - self.px0) as f64;
        let frac = if span.abs() < 1e-9 { 0.0 } else { (px - self.px0) as f64 / span };
        self.inverse(self.t0 + frac * (self.t1 - self.t0))
    }

    /// Smaller and larger data bound, regardless of orientation.
    pub fn bounds(&self) -> (f64, f64) {
        (self.v0.min(self.v1), self.v0.max(self.v1))
    }

    /// Whether `v` lies inside the visible range.
    pub fn contains(&self, v: f64) -> bool {
        let (lo, hi) = self.bounds();
        let eps = (hi - lo).abs() * 1e-9;
        v >= lo - eps && v <= hi + eps
    }
}
