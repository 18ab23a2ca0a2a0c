// File: crates/chart-core/src/series.rs
// Summary: Series model for lines, scatters, vertical reference lines and image heatmaps.

use crate::color::Color;
use crate::colormap::{Colormap, Normalize};
use crate::marker::Marker;

/// Stroke dash pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Dash {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// No stroke at all (markers only).
    Hidden,
}

impl Dash {
    /// Parse the short (`-`, `--`, `:`, `-.`) or long (`dashed`, ...) form.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "-" | "solid" => Some(Dash::Solid),
            "--" | "dashed" => Some(Dash::Dashed),
            ":" | "dotted" => Some(Dash::Dotted),
            "-." | "dashdot" => Some(Dash::DashDot),
            "" | " " | "None" | "none" => Some(Dash::Hidden),
            _ => None,
        }
    }

    /// On/off interval lengths in units of the line width.
    pub fn intervals(&self) -> Option<&'static [f32]> {
        match self {
            Dash::Dashed => Some(&[3.7, 1.6]),
            Dash::Dotted => Some(&[1.0, 1.65]),
            Dash::DashDot => Some(&[6.4, 1.6, 1.0, 1.6]),
            Dash::Solid | Dash::Hidden => None,
        }
    }
}

/// Polyline through (x, y) with optional markers at each vertex.
#[derive(Clone, Debug)]
pub struct LineSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// `None` takes the next colour of the cycle when added to a chart.
    pub color: Option<Color>,
    /// Width in points.
    pub width: f32,
    pub dash: Dash,
    pub marker: Marker,
    /// Marker diameter in points.
    pub marker_size: f32,
    pub alpha: f32,
    pub label: Option<String>,
    pub zorder: f32,
}

impl LineSeries {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            color: None,
            width: 1.5,
            dash: Dash::Solid,
            marker: Marker::None,
            marker_size: 6.0,
            alpha: 1.0,
            label: None,
            zorder: 2.0,
        }
    }

    /// Paired points; the longer axis is truncated to the shorter one.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// How scatter points are coloured.
#[derive(Clone, Debug, PartialEq)]
pub enum PointColors {
    /// One colour for every point; `None` takes the next cycle colour.
    Uniform(Option<Color>),
    /// Per-point values mapped through a colormap.
    Mapped { values: Vec<f64>, cmap: Colormap, norm: Option<Normalize> },
}

#[derive(Clone, Debug)]
pub struct ScatterSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub colors: PointColors,
    /// Marker areas in points²; one value applies to every point.
    pub sizes: Vec<f64>,
    pub marker: Marker,
    pub alpha: f32,
    pub edge_color: Option<Color>,
    pub edge_width: f32,
    pub label: Option<String>,
    pub zorder: f32,
}

impl ScatterSeries {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            colors: PointColors::Uniform(None),
            sizes: vec![36.0],
            marker: Marker::Circle,
            alpha: 1.0,
            edge_color: None,
            edge_width: 1.0,
            label: None,
            zorder: 1.0,
        }
    }

    /// Area of point `i`, cycling through `sizes`.
    pub fn size_at(&self, i: usize) -> f64 {
        if self.sizes.is_empty() { 36.0 } else { self.sizes[i % self.sizes.len()] }
    }

    /// Normalisation for mapped colours: explicit, or the range of the values.
    pub fn effective_norm(&self) -> Option<Normalize> {
        match &self.colors {
            PointColors::Mapped { values, norm, .. } => norm.or_else(|| Normalize::from_values(values)),
            PointColors::Uniform(_) => None,
        }
    }
}

/// Vertical line across the axes at data position `x`.
#[derive(Clone, Debug)]
pub struct VLine {
    pub x: f64,
    pub color: Option<Color>,
    pub width: f32,
    pub dash: Dash,
    pub alpha: f32,
    /// Vertical extent as fractions of the axes height.
    pub ymin: f64,
    pub ymax: f64,
    pub label: Option<String>,
    pub zorder: f32,
}

impl VLine {
    pub fn new(x: f64) -> Self {
        Self {
            x,
            color: None,
            width: 1.5,
            dash: Dash::Solid,
            alpha: 1.0,
            ymin: 0.0,
            ymax: 1.0,
            label: None,
            zorder: 2.0,
        }
    }
}

/// Row the first data row is placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Upper,
    Lower,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Aspect {
    /// Square cells: the axes box shrinks so one x unit equals one y unit.
    #[default]
    Equal,
    /// Fill the axes box.
    Auto,
    /// Height/width ratio of one data unit.
    Ratio(f64),
}

/// 2-D array drawn as coloured cells.
#[derive(Clone, Debug)]
pub struct ImageSeries {
    /// Rows of values; rows may differ in length.
    pub data: Vec<Vec<f64>>,
    /// `[left, right, bottom, top]` in data coordinates.
    pub extent: Option<[f64; 4]>,
    pub norm: Option<Normalize>,
    pub cmap: Colormap,
    pub alpha: f32,
    pub aspect: Aspect,
    pub origin: Origin,
    pub label: Option<String>,
    pub zorder: f32,
    /// Draw a colorbar for this image beside the axes.
    pub colorbar: bool,
}

impl ImageSeries {
    pub fn new(data: Vec<Vec<f64>>) -> Self {
        Self {
            data,
            extent: None,
            norm: None,
            cmap: Colormap::default(),
            alpha: 1.0,
            aspect: Aspect::Equal,
            origin: Origin::Upper,
            label: None,
            zorder: 0.0,
            colorbar: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Width of the widest row.
    pub fn cols(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Extent in use: explicit or the cell-centred default for the origin.
    pub fn effective_extent(&self) -> [f64; 4] {
        if let Some(e) = self.extent {
            return e;
        }
        let w = self.cols() as f64 - 0.5;
        let h = self.rows() as f64 - 0.5;
        match self.origin {
            Origin::Upper => [-0.5, w, h, -0.5],
            Origin::Lower => [-0.5, w, -0.5, h],
        }
    }

    /// Normalisation in use: explicit, or the range of the finite cell values.
    pub fn effective_norm(&self) -> Normalize {
        self.norm
            .or_else(|| Normalize::from_values(self.data.iter().flatten()))
            .unwrap_or(Normalize::new(0.0, 1.0))
    }
}

#[derive(Clone, Debug)]
pub enum Series {
    Line(LineSeries),
    Scatter(ScatterSeries),
    VLine(VLine),
    Image(ImageSeries),
}

impl Series {
    pub fn label(&self) -> Option<&str> {
        match self {
            Series::Line(s) => s.label.as_deref(),
            Series::Scatter(s) => s.label.as_deref(),
            Series::VLine(s) => s.label.as_deref(),
            Series::Image(s) => s.label.as_deref(),
        }
    }

    pub fn zorder(&self) -> f32 {
        match self {
            Series::Line(s) => s.zorder,
            Series::Scatter(s) => s.zorder,
            Series::VLine(s) => s.zorder,
            Series::Image(s) => s.zorder,
        }
    }
}

impl From<LineSeries> for Series {
    fn from(s: LineSeries) -> Self { Series::Line(s) }
}

impl From<ScatterSeries> for Series {
    fn from(s: ScatterSeries) -> Self { Series::Scatter(s) }
}

impl From<VLine> for Series {
    fn from(s: VLine) -> Self { Series::VLine(s) }
}

impl From<ImageSeries> for Series {
    fn from(s: ImageSeries) -> Self { Series::Image(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_names() {
        assert_eq!(Dash::from_name("--"), Some(Dash::Dashed));
        assert_eq!(Dash::from_name("dotted"), Some(Dash::Dotted));
        assert_eq!(Dash::from_name("None"), Some(Dash::Hidden));
        assert_eq!(Dash::from_name("~"), None);
    }

    #[test]
    fn image_default_extent_follows_origin() {
        let mut img = ImageSeries::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]]);
        assert_eq!(img.cols(), 3);
        assert_eq!(img.effective_extent(), [-0.5, 2.5, 1.5, -0.5]);
        img.origin = Origin::Lower;
        assert_eq!(img.effective_extent(), [-0.5, 2.5, -0.5, 1.5]);
        assert_eq!(img.effective_norm(), Normalize::new(1.0, 5.0));
    }
}
