// File: crates/chart-core/src/legend.rs
// Summary: Legend box in the upper-right corner of the axes with one handle per labelled series.

use skia_safe as skia;

use crate::chart::{fill_paint, stroke_paint, RenderOptions};
use crate::color::TAB10;
use crate::geometry::RectF;
use crate::marker::Marker;
use crate::series::{Dash, PointColors, Series};
use crate::text::{HAlign, TextShaper, VAlign};

// Sizes in units of the font size.
const BORDER_PAD: f32 = 0.5;
const AXES_PAD: f32 = 0.5;
const HANDLE_LEN: f32 = 2.0;
const HANDLE_GAP: f32 = 0.8;
const ROW_HEIGHT: f32 = 1.3;

/// Size of the legend box for `entries`, in pixels.
pub fn legend_size(entries: &[&Series], opts: &RenderOptions, shaper: Option<&TextShaper>) -> (f32, f32) {
    let em = opts.pt(opts.font_size);
    let text_w = shaper
        .map(|s| {
            entries
                .iter()
                .filter_map(|e| e.label())
                .map(|l| s.measure(l, em).0)
                .fold(0.0f32, f32::max)
        })
        .unwrap_or(0.0);
    let w = em * (2.0 * BORDER_PAD + HANDLE_LEN + HANDLE_GAP) + text_w;
    let h = em * (2.0 * BORDER_PAD + ROW_HEIGHT * entries.len() as f32);
    (w, h)
}

pub fn draw_legend(
    canvas: &skia::Canvas,
    plot: &RectF,
    entries: &[&Series],
    opts: &RenderOptions,
    shaper: Option<&TextShaper>,
) {
    let em = opts.pt(opts.font_size);
    let (w, h) = legend_size(entries, opts, shaper);
    let right = plot.right - em * AXES_PAD;
    let top = plot.top + em * AXES_PAD;
    let frame = skia::Rect::from_ltrb(right - w, top, right, top + h);
    let radius = em * 0.2;

    let mut bg = skia::Paint::default();
    bg.set_anti_alias(true);
    bg.set_color(opts.theme.legend_background);
    canvas.draw_round_rect(frame, radius, radius, &bg);
    let mut border = skia::Paint::default();
    border.set_anti_alias(true);
    border.set_style(skia::paint::Style::Stroke);
    border.set_stroke_width(opts.pt(0.8).max(1.0));
    border.set_color(opts.theme.legend_frame);
    canvas.draw_round_rect(frame, radius, radius, &border);

    let hx0 = frame.left() + em * BORDER_PAD;
    let hx1 = hx0 + em * HANDLE_LEN;
    for (i, entry) in entries.iter().enumerate() {
        let cy = frame.top() + em * (BORDER_PAD + ROW_HEIGHT * (i as f32 + 0.5));
        draw_handle(canvas, entry, hx0, hx1, cy, opts);
        if let (Some(shaper), Some(label)) = (shaper, entry.label()) {
            let tx = hx1 + em * HANDLE_GAP;
            shaper.draw(canvas, label, tx, cy, em, opts.theme.axis_label, HAlign::Left, VAlign::Middle);
        }
    }
}

fn draw_handle(canvas: &skia::Canvas, entry: &Series, x0: f32, x1: f32, cy: f32, opts: &RenderOptions) {
    let mid = (x0 + x1) * 0.5;
    match entry {
        Series::Line(l) => {
            let color = l.color.unwrap_or(TAB10[0]);
            if l.dash != Dash::Hidden {
                let stroke = stroke_paint(color, l.alpha, l.width, l.dash, opts);
                canvas.draw_line((x0, cy), (x1, cy), &stroke);
            }
            if l.marker != Marker::None {
                let fill = fill_paint(color.with_alpha(l.alpha));
                l.marker.draw(canvas, mid, cy, opts.pt(l.marker_size), &fill, None);
            }
        }
        Series::Scatter(s) => {
            let color = match &s.colors {
                PointColors::Uniform(c) => c.unwrap_or(TAB10[0]),
                PointColors::Mapped { cmap, .. } => cmap.sample(0.5),
            };
            let fill = fill_paint(color.with_alpha(s.alpha));
            let edge = s.edge_color.map(|c| stroke_paint(c, s.alpha, s.edge_width, Dash::Solid, opts));
            let diameter = opts.pt(s.size_at(0).max(0.0).sqrt() as f32);
            s.marker.draw(canvas, mid, cy, diameter, &fill, edge.as_ref());
        }
        Series::VLine(v) => {
            let stroke = stroke_paint(v.color.unwrap_or(TAB10[0]), v.alpha, v.width, v.dash, opts);
            canvas.draw_line((x0, cy), (x1, cy), &stroke);
        }
        Series::Image(img) => {
            let fill = fill_paint(img.cmap.sample(0.5).with_alpha(img.alpha));
            let half = opts.pt(opts.font_size) * 0.4;
            canvas.draw_rect(skia::Rect::from_ltrb(mid - half, cy - half, mid + half, cy + half), &fill);
        }
    }
}
