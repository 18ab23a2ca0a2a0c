// File: crates/chart-core/src/view.rs
// Visible data ranges: autoscale from the series, fixed limits, and pan/zoom helpers.

use crate::axis::{Axis, ScaleKind};
use crate::geometry::RectF;
use crate::scale::AxisScale;
use crate::series::Series;
use crate::Chart;

/// Fraction of the data span added on each side of lines and scatters.
pub const MARGIN: f64 = 0.05;

/// Data values at the four edges of the axes box. `left > right` or
/// `bottom > top` means the axis is inverted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

#[derive(Clone, Copy, Debug)]
struct Bounds {
    lo: f64,
    hi: f64,
}

impl Bounds {
    const EMPTY: Bounds = Bounds { lo: f64::INFINITY, hi: f64::NEG_INFINITY };

    fn add(&mut self, v: f64, kind: ScaleKind) {
        if !v.is_finite() || (kind == ScaleKind::Log10 && v <= 0.0) {
            return;
        }
        self.lo = self.lo.min(v);
        self.hi = self.hi.max(v);
    }

    fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    fn union(self, other: Bounds) -> Bounds {
        Bounds { lo: self.lo.min(other.lo), hi: self.hi.max(other.hi) }
    }

    /// Pad by `MARGIN` of the span; a collapsed range is widened first.
    fn with_margin(self, kind: ScaleKind) -> Bounds {
        match kind {
            ScaleKind::Linear => {
                let (mut lo, mut hi) = (self.lo, self.hi);
                if hi - lo < 1e-12 * lo.abs().max(1.0) {
                    let d = if lo == 0.0 { 0.05 } else { lo.abs() * 0.05 };
                    lo -= d;
                    hi += d;
                }
                let m = (hi - lo) * MARGIN;
                Bounds { lo: lo - m, hi: hi + m }
            }
            ScaleKind::Log10 => {
                let (mut lo, mut hi) = (self.lo.log10(), self.hi.log10());
                if hi - lo < 1e-12 {
                    lo -= 0.05;
                    hi += 0.05;
                }
                let m = (hi - lo) * MARGIN;
                Bounds { lo: 10f64.powf(lo - m), hi: 10f64.powf(hi + m) }
            }
        }
    }
}

/// Resolve one axis: margined data, exact image bounds, then explicit limits.
fn resolve(margined: Bounds, exact: Bounds, inverted: bool, axis: &Axis) -> (f64, f64) {
    let auto = match (margined.is_empty(), exact.is_empty()) {
        (false, true) => margined.with_margin(axis.kind),
        (false, false) => margined.with_margin(axis.kind).union(exact),
        (true, false) => exact,
        (true, true) => match axis.kind {
            ScaleKind::Linear => Bounds { lo: 0.0, hi: 1.0 },
            ScaleKind::Log10 => Bounds { lo: 1.0, hi: 10.0 },
        },
    };
    let (a, b) = if inverted { (auto.hi, auto.lo) } else { (auto.lo, auto.hi) };
    (axis.min.unwrap_or(a), axis.max.unwrap_or(b))
}

impl ViewState {
    pub fn from_chart(chart: &Chart) -> Self {
        let (xk, yk) = (chart.x_axis.kind, chart.y_axis.kind);
        let mut x = Bounds::EMPTY;
        let mut y = Bounds::EMPTY;
        let mut x_exact = Bounds::EMPTY;
        let mut y_exact = Bounds::EMPTY;
        let mut x_inverted = false;
        let mut y_inverted = false;

        for s in &chart.series {
            match s {
                Series::Line(l) => {
                    for (px, py) in l.points() {
                        x.add(px, xk);
                        y.add(py, yk);
                    }
                }
                Series::Scatter(sc) => {
                    for (px, py) in sc.x.iter().zip(&sc.y) {
                        x.add(*px, xk);
                        y.add(*py, yk);
                    }
                }
                Series::VLine(v) => x.add(v.x, xk),
                Series::Image(img) => {
                    if img.cols() == 0 {
                        continue;
                    }
                    let [l, r, b, t] = img.effective_extent();
                    x_exact.add(l, xk);
                    x_exact.add(r, xk);
                    y_exact.add(b, yk);
                    y_exact.add(t, yk);
                    x_inverted |= l > r;
                    y_inverted |= b > t;
                }
            }
        }

        let (left, right) = resolve(x, x_exact, x_inverted, &chart.x_axis);
        let (bottom, top) = resolve(y, y_exact, y_inverted, &chart.y_axis);
        Self { left, right, bottom, top }
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = Some(self.left);
        chart.x_axis.max = Some(self.right);
        chart.y_axis.min = Some(self.bottom);
        chart.y_axis.max = Some(self.top);
    }

    pub fn x_scale(&self, plot: &RectF, kind: ScaleKind) -> AxisScale {
        AxisScale::new(self.left, self.right, plot.left, plot.right, kind)
    }

    pub fn y_scale(&self, plot: &RectF, kind: ScaleKind) -> AxisScale {
        AxisScale::new(self.bottom, self.top, plot.bottom, plot.top, kind)
    }

    /// Shift the view by a drag of `(dx, dy)` pixels inside `plot`.
    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32, plot: &RectF, kinds: (ScaleKind, ScaleKind)) {
        let xs = self.x_scale(plot, kinds.0);
        let ys = self.y_scale(plot, kinds.1);
        self.left = xs.from_px(plot.left - dx);
        self.right = xs.from_px(plot.right - dx);
        self.bottom = ys.from_px(plot.bottom - dy);
        self.top = ys.from_px(plot.top - dy);
    }

    /// Zoom around the pixel `(cx, cy)`; `scroll > 0` zooms in.
    pub fn zoom_at_pixel(&mut self, scroll: f32, cx: f32, cy: f32, plot: &RectF, kinds: (ScaleKind, ScaleKind)) {
        let factor = (1.0 - scroll).clamp(0.1, 10.0);
        let cx = cx.clamp(plot.left, plot.right);
        let cy = cy.clamp(plot.top, plot.bottom);
        let xs = self.x_scale(plot, kinds.0);
        let ys = self.y_scale(plot, kinds.1);
        self.left = xs.from_px(cx + (plot.left - cx) * factor);
        self.right = xs.from_px(cx + (plot.right - cx) * factor);
        self.bottom = ys.from_px(cy + (plot.bottom - cy) * factor);
        self.top = ys.from_px(cy + (plot.top - cy) * factor);
    }
}
