// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and headless rendering pipeline (PNG file, PNG bytes, RGBA) on Skia CPU raster surfaces.

use anyhow::Result;
use log::debug;
use skia_safe as skia;

use crate::color::{Color, TAB10};
use crate::colormap::Normalize;
use crate::geometry::RectF;
use crate::grid::{nice_ticks, format_tick, ticks, Tick};
use crate::legend;
use crate::scale::AxisScale;
use crate::series::{Aspect, Dash, ImageSeries, LineSeries, Origin, PointColors, ScatterSeries, Series, VLine};
use crate::text::{HAlign, TextShaper, VAlign};
use crate::theme::Theme;
use crate::types::{pixels, Insets, FIG_HEIGHT_IN, FIG_WIDTH_IN, FONT_SIZE_PT, POINTS_PER_INCH, SCREEN_DPI};
use crate::view::ViewState;
use crate::Axis;

/// Points reserved right of the axes for each colorbar (gap, bar, tick labels).
const COLORBAR_SLOT_PT: f32 = 84.0;
const COLORBAR_GAP_PT: f32 = 14.0;
const COLORBAR_WIDTH_PT: f32 = 16.0;
const TICK_LEN_PT: f32 = 3.5;
const TICK_PAD_PT: f32 = 3.5;
const MAX_TICKS: usize = 8;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    /// Pixels per typographic point (dpi / 72).
    pub scale: f32,
    pub insets: Insets,
    pub theme: Theme,
    /// Base font size in points.
    pub font_size: f32,
    pub draw_labels: bool,
}

impl RenderOptions {
    /// Options for a `width_in` x `height_in` inch figure rendered at `dpi`.
    pub fn for_figure(width_in: f32, height_in: f32, dpi: f32) -> Self {
        Self {
            width: pixels(width_in, dpi),
            height: pixels(height_in, dpi),
            scale: dpi / POINTS_PER_INCH,
            insets: Insets::default(),
            theme: Theme::default(),
            font_size: FONT_SIZE_PT,
            draw_labels: true,
        }
    }

    /// Convert points to pixels.
    #[inline]
    pub fn pt(&self, points: f32) -> f32 {
        points * self.scale
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::for_figure(FIG_WIDTH_IN, FIG_HEIGHT_IN, SCREEN_DPI)
    }
}

/// Pixel rectangles of the axes box and of each colorbar.
#[derive(Clone, Debug)]
pub struct Layout {
    pub plot: RectF,
    pub colorbars: Vec<RectF>,
}

#[derive(Clone, Debug, Default)]
pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub title: Option<String>,
    /// Draw a legend of the labelled series.
    pub legend: bool,
    cycle: usize,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series; lines and uniform scatters without a colour take the next cycle colour.
    pub fn add_series(&mut self, series: impl Into<Series>) {
        let mut series = series.into();
        match &mut series {
            Series::Line(LineSeries { color: c @ None, .. })
            | Series::Scatter(ScatterSeries { colors: PointColors::Uniform(c @ None), .. }) => {
                *c = Some(self.next_color());
            }
            _ => {}
        }
        self.series.push(series);
    }

    fn next_color(&mut self) -> Color {
        let c = TAB10[self.cycle % TAB10.len()];
        self.cycle += 1;
        c
    }

    pub fn show_legend(&mut self) {
        self.legend = true;
    }

    /// Series that get a legend entry, in insertion order.
    pub fn legend_entries(&self) -> Vec<&Series> {
        self.series
            .iter()
            .filter(|s| !matches!(s, Series::Image(_)) && s.label().is_some_and(|l| !l.is_empty()))
            .collect()
    }

    fn colorbar_images(&self) -> Vec<&ImageSeries> {
        self.series
            .iter()
            .filter_map(|s| match s {
                Series::Image(img) if img.colorbar => Some(img),
                _ => None,
            })
            .collect()
    }

    /// Visible ranges after autoscaling and fixed limits.
    pub fn view(&self) -> ViewState {
        ViewState::from_chart(self)
    }

    /// Place the axes box and colorbars for `opts`.
    pub fn layout(&self, opts: &RenderOptions) -> Layout {
        let (w, h) = (opts.width as f32, opts.height as f32);
        let ins = opts.insets;
        let bars = self.colorbar_images().len() as f32;
        let mut plot = RectF::from_ltrb(
            opts.pt(ins.left as f32),
            opts.pt(ins.top as f32),
            w - opts.pt(ins.right as f32) - opts.pt(COLORBAR_SLOT_PT) * bars,
            h - opts.pt(ins.bottom as f32),
        );
        if plot.width() < 1.0 || plot.height() < 1.0 {
            plot = RectF::from_ltwh(0.0, 0.0, w.max(1.0), h.max(1.0));
        }

        // the last image decides the box aspect, as a later imshow overrides an earlier one
        let aspect = self.series.iter().rev().find_map(|s| match s {
            Series::Image(img) => Some(img.aspect),
            _ => None,
        });
        let ratio = match aspect {
            Some(Aspect::Equal) => Some(1.0),
            Some(Aspect::Ratio(r)) if r > 0.0 => Some(r),
            _ => None,
        };
        if let Some(ratio) = ratio {
            let v = self.view();
            let dw = transformed_span(v.left, v.right, &self.x_axis);
            let dh = transformed_span(v.bottom, v.top, &self.y_axis);
            if dw > 0.0 && dh > 0.0 {
                let want = (ratio * dh / dw) as f32;
                let have = plot.height() / plot.width();
                plot = if have > want {
                    plot.shrink_centered(plot.width(), plot.width() * want)
                } else {
                    plot.shrink_centered(plot.height() / want, plot.height())
                };
            }
        }

        let colorbars = (0..bars as usize)
            .map(|i| {
                let x0 = plot.right + opts.pt(COLORBAR_GAP_PT) + opts.pt(COLORBAR_SLOT_PT) * i as f32;
                RectF::from_ltwh(x0, plot.top, opts.pt(COLORBAR_WIDTH_PT), plot.height())
            })
            .collect();
        Layout { plot, colorbars }
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Render and encode as PNG in memory.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.rasterize(opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to unpremultiplied RGBA8 pixels. Returns `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = self.rasterize(opts)?;
        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = opts.width as usize * 4;
        let mut pixels = vec![0u8; stride * opts.height as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("reading back raster pixels failed");
        }
        Ok((pixels, opts.width, opts.height, stride))
    }

    fn rasterize(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.draw(surface.canvas(), opts);
        Ok(surface)
    }

    /// Draw the whole figure onto `canvas`.
    pub fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        let layout = self.layout(opts);
        let plot = layout.plot;
        let view = self.view();
        let xs = view.x_scale(&plot, self.x_axis.kind);
        let ys = view.y_scale(&plot, self.y_axis.kind);
        let x_ticks = visible_ticks(&xs);
        let y_ticks = visible_ticks(&ys);
        let shaper = opts.draw_labels.then(TextShaper::new);
        debug!(
            "rendering {} series into {}x{} px, view {:?}",
            self.series.len(),
            opts.width,
            opts.height,
            view
        );

        canvas.clear(theme.background);
        let mut face = skia::Paint::default();
        face.set_color(theme.plot_background);
        canvas.draw_rect(plot.to_skia(), &face);

        if theme.show_grid {
            draw_grid(canvas, &plot, &xs, &ys, &x_ticks, &y_ticks, theme);
        }

        // Series, back to front
        let mut order: Vec<&Series> = self.series.iter().collect();
        order.sort_by(|a, b| a.zorder().total_cmp(&b.zorder()));
        canvas.save();
        canvas.clip_rect(plot.to_skia(), None, Some(true));
        for s in order {
            match s {
                Series::Line(l) => draw_line_series(canvas, &xs, &ys, l, opts),
                Series::Scatter(sc) => draw_scatter_series(canvas, &xs, &ys, sc, opts),
                Series::VLine(v) => draw_vline(canvas, &plot, &xs, v, opts),
                Series::Image(img) => draw_image(canvas, &xs, &ys, img),
            }
        }
        canvas.restore();

        draw_axes(canvas, &plot, opts);
        draw_ticks(canvas, &plot, &xs, &ys, &x_ticks, &y_ticks, opts, shaper.as_ref());
        if let Some(shaper) = &shaper {
            draw_labels(canvas, &plot, &self.x_axis, &self.y_axis, self.title.as_deref(), &y_ticks, opts, shaper);
        }

        if self.legend {
            let entries = self.legend_entries();
            if !entries.is_empty() {
                legend::draw_legend(canvas, &plot, &entries, opts, shaper.as_ref());
            }
        }

        for (img, rect) in self.colorbar_images().into_iter().zip(&layout.colorbars) {
            draw_colorbar(canvas, rect, img, opts, shaper.as_ref());
        }
    }
}

fn transformed_span(a: f64, b: f64, axis: &Axis) -> f64 {
    if axis.is_log() {
        (b.max(1e-300).log10() - a.max(1e-300).log10()).abs()
    } else {
        (b - a).abs()
    }
}

fn visible_ticks(scale: &AxisScale) -> Vec<Tick> {
    ticks(scale.v0, scale.v1, scale.kind, MAX_TICKS)
        .into_iter()
        .filter(|t| scale.accepts(t.value) && scale.contains(t.value))
        .collect()
}

/// Stroke paint for a line of `width_pt` points with the given dash.
pub(crate) fn stroke_paint(color: Color, alpha: f32, width_pt: f32, dash: Dash, opts: &RenderOptions) -> skia::Paint {
    let width = opts.pt(width_pt).max(0.5);
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_stroke_join(skia::paint::Join::Round);
    paint.set_color(color.with_alpha(alpha).to_skia());
    if let Some(intervals) = dash.intervals() {
        let scaled: Vec<f32> = intervals.iter().map(|i| i * width).collect();
        paint.set_path_effect(skia::PathEffect::dash(&scaled, 0.0));
    }
    paint
}

pub(crate) fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color.to_skia());
    paint
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(
    canvas: &skia::Canvas,
    plot: &RectF,
    xs: &AxisScale,
    ys: &AxisScale,
    x_ticks: &[Tick],
    y_ticks: &[Tick],
    theme: &Theme,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    for t in x_ticks {
        let x = xs.to_px(t.value);
        canvas.draw_line((x, plot.top), (x, plot.bottom), &paint);
    }
    for t in y_ticks {
        let y = ys.to_px(t.value);
        canvas.draw_line((plot.left, y), (plot.right, y), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, plot: &RectF, opts: &RenderOptions) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(opts.theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_style(skia::paint::Style::Stroke);
    axis_paint.set_stroke_width(opts.pt(0.8).max(1.0));
    canvas.draw_rect(plot.to_skia(), &axis_paint);
}

#[allow(clippy::too_many_arguments)]
fn draw_ticks(
    canvas: &skia::Canvas,
    plot: &RectF,
    xs: &AxisScale,
    ys: &AxisScale,
    x_ticks: &[Tick],
    y_ticks: &[Tick],
    opts: &RenderOptions,
    shaper: Option<&TextShaper>,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(opts.theme.tick);
    paint.set_anti_alias(true);
    paint.set_stroke_width(opts.pt(0.8).max(1.0));
    let len = opts.pt(TICK_LEN_PT);
    let pad = len + opts.pt(TICK_PAD_PT);
    let size = opts.pt(opts.font_size);

    for t in x_ticks {
        let x = xs.to_px(t.value);
        canvas.draw_line((x, plot.bottom), (x, plot.bottom + len), &paint);
        if let Some(shaper) = shaper {
            shaper.draw(canvas, &t.label, x, plot.bottom + pad, size, opts.theme.axis_label, HAlign::Center, VAlign::Top);
        }
    }
    for t in y_ticks {
        let y = ys.to_px(t.value);
        canvas.draw_line((plot.left - len, y), (plot.left, y), &paint);
        if let Some(shaper) = shaper {
            shaper.draw(canvas, &t.label, plot.left - pad, y, size, opts.theme.axis_label, HAlign::Right, VAlign::Middle);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_labels(
    canvas: &skia::Canvas,
    plot: &RectF,
    x: &Axis,
    y: &Axis,
    title: Option<&str>,
    y_ticks: &[Tick],
    opts: &RenderOptions,
    shaper: &TextShaper,
) {
    let size = opts.pt(opts.font_size);
    let color = opts.theme.axis_label;
    let tick_block = opts.pt(TICK_LEN_PT + TICK_PAD_PT);
    let (cx, cy) = plot.center();

    if !x.label.is_empty() {
        let y_pos = plot.bottom + tick_block + size * 1.3 + opts.pt(4.0);
        shaper.draw(canvas, &x.label, cx, y_pos, size, color, HAlign::Center, VAlign::Top);
    }
    if !y.label.is_empty() {
        let widest = y_ticks
            .iter()
            .map(|t| shaper.measure(&t.label, size).0)
            .fold(0.0f32, f32::max);
        let x_pos = plot.left - tick_block - widest - opts.pt(4.0) - size * 0.6;
        shaper.draw_vertical(canvas, &y.label, x_pos, cy, size, color);
    }
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        shaper.draw(canvas, title, cx, plot.top - opts.pt(6.0), size * 1.2, color, HAlign::Center, VAlign::Bottom);
    }
}

fn draw_line_series(canvas: &skia::Canvas, xs: &AxisScale, ys: &AxisScale, series: &LineSeries, opts: &RenderOptions) {
    let color = series.color.unwrap_or(TAB10[0]);

    if series.dash != Dash::Hidden {
        // NaN and out-of-domain points split the line
        let mut path = skia::Path::new();
        let mut pen_down = false;
        let mut segments = 0usize;
        for (x, y) in series.points() {
            if !xs.accepts(x) || !ys.accepts(y) {
                pen_down = false;
                continue;
            }
            let p = (xs.to_px(x), ys.to_px(y));
            if pen_down {
                path.line_to(p);
                segments += 1;
            } else {
                path.move_to(p);
                pen_down = true;
            }
        }
        if segments > 0 {
            let stroke = stroke_paint(color, series.alpha, series.width, series.dash, opts);
            canvas.draw_path(&path, &stroke);
        }
    }

    if series.marker != crate::marker::Marker::None {
        let fill = fill_paint(color.with_alpha(series.alpha));
        let size = opts.pt(series.marker_size);
        for (x, y) in series.points() {
            if xs.accepts(x) && ys.accepts(y) {
                series.marker.draw(canvas, xs.to_px(x), ys.to_px(y), size, &fill, None);
            }
        }
    }
}

fn draw_scatter_series(canvas: &skia::Canvas, xs: &AxisScale, ys: &AxisScale, series: &ScatterSeries, opts: &RenderOptions) {
    let norm = series.effective_norm().unwrap_or(Normalize::new(0.0, 1.0));
    let edge = series.edge_color.map(|c| stroke_paint(c, series.alpha, series.edge_width, Dash::Solid, opts));

    for (i, (&x, &y)) in series.x.iter().zip(&series.y).enumerate() {
        if !xs.accepts(x) || !ys.accepts(y) {
            continue;
        }
        let color = match &series.colors {
            PointColors::Uniform(c) => c.unwrap_or(TAB10[0]),
            PointColors::Mapped { values, cmap, .. } => {
                let v = values.get(i).copied().unwrap_or(f64::NAN);
                cmap.sample(norm.apply(v))
            }
        };
        let fill = fill_paint(color.with_alpha(series.alpha));
        let diameter = opts.pt(series.size_at(i).max(0.0).sqrt() as f32);
        series.marker.draw(canvas, xs.to_px(x), ys.to_px(y), diameter, &fill, edge.as_ref());
    }
}

fn draw_vline(canvas: &skia::Canvas, plot: &RectF, xs: &AxisScale, line: &VLine, opts: &RenderOptions) {
    if !xs.accepts(line.x) {
        return;
    }
    let x = xs.to_px(line.x);
    let y0 = plot.bottom - line.ymin as f32 * plot.height();
    let y1 = plot.bottom - line.ymax as f32 * plot.height();
    let stroke = stroke_paint(line.color.unwrap_or(TAB10[0]), line.alpha, line.width, line.dash, opts);
    if line.dash != Dash::Hidden {
        canvas.draw_line((x, y0), (x, y1), &stroke);
    }
}

fn draw_image(canvas: &skia::Canvas, xs: &AxisScale, ys: &AxisScale, img: &ImageSeries) {
    let rows = img.rows();
    let cols = img.cols();
    if rows == 0 || cols == 0 {
        return;
    }
    let [l, r, b, t] = img.effective_extent();
    let norm = img.effective_norm();
    let mut paint = skia::Paint::default();
    // neighbouring cells must not leave hairline seams
    paint.set_anti_alias(false);
    paint.set_style(skia::paint::Style::Fill);

    for (i, row) in img.data.iter().enumerate() {
        let (ya, yb) = match img.origin {
            Origin::Upper => (t + (b - t) * i as f64 / rows as f64, t + (b - t) * (i + 1) as f64 / rows as f64),
            Origin::Lower => (b + (t - b) * i as f64 / rows as f64, b + (t - b) * (i + 1) as f64 / rows as f64),
        };
        let (py0, py1) = (ys.to_px(ya), ys.to_px(yb));
        for (j, &v) in row.iter().enumerate() {
            let color = img.cmap.sample(norm.apply(v));
            if color.a == 0 {
                continue;
            }
            let xa = l + (r - l) * j as f64 / cols as f64;
            let xb = l + (r - l) * (j + 1) as f64 / cols as f64;
            let (px0, px1) = (xs.to_px(xa), xs.to_px(xb));
            paint.set_color(color.with_alpha(img.alpha).to_skia());
            let rect = skia::Rect::from_ltrb(px0.min(px1), py0.min(py1), px0.max(px1), py0.max(py1));
            canvas.draw_rect(rect, &paint);
        }
    }
}

fn draw_colorbar(canvas: &skia::Canvas, rect: &RectF, img: &ImageSeries, opts: &RenderOptions, shaper: Option<&TextShaper>) {
    const STEPS: usize = 256;
    let norm = img.effective_norm();
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(false);
    let step_h = rect.height() / STEPS as f32;
    for k in 0..STEPS {
        let t = (k as f64 + 0.5) / STEPS as f64;
        paint.set_color(img.cmap.sample(t).to_skia());
        let bottom = rect.bottom - step_h * k as f32;
        canvas.draw_rect(skia::Rect::from_ltrb(rect.left, bottom - step_h - 0.5, rect.right, bottom), &paint);
    }

    let mut frame = skia::Paint::default();
    frame.set_color(opts.theme.axis_line);
    frame.set_anti_alias(true);
    frame.set_style(skia::paint::Style::Stroke);
    frame.set_stroke_width(opts.pt(0.8).max(1.0));
    canvas.draw_rect(rect.to_skia(), &frame);

    let scale = AxisScale::new(norm.vmin, norm.vmax, rect.bottom, rect.top, crate::axis::ScaleKind::Linear);
    let (values, step) = nice_ticks(norm.vmin, norm.vmax, MAX_TICKS);
    let len = opts.pt(TICK_LEN_PT);
    let size = opts.pt(opts.font_size);
    for v in values.into_iter().filter(|v| scale.contains(*v)) {
        let y = scale.to_px(v);
        canvas.draw_line((rect.right, y), (rect.right + len, y), &frame);
        if let Some(shaper) = shaper {
            let label = format_tick(v, step);
            let x = rect.right + len + opts.pt(TICK_PAD_PT);
            shaper.draw(canvas, &label, x, y, size, opts.theme.axis_label, HAlign::Left, VAlign::Middle);
        }
    }
}
