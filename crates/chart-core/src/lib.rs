// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports public API for chart construction and rendering.

pub mod chart;
pub mod series;
pub mod axis;
pub mod color;
pub mod colormap;
pub mod grid;
pub mod legend;
pub mod marker;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;
pub mod text;

pub use chart::{Chart, Layout, RenderOptions};
pub use series::{Aspect, Dash, ImageSeries, LineSeries, Origin, PointColors, ScatterSeries, Series, VLine};
pub use axis::{Axis, ScaleKind};
pub use color::{Color, ColorError};
pub use colormap::{Colormap, ColormapKind, Normalize};
pub use marker::Marker;
pub use view::ViewState;
pub use theme::Theme;
pub use text::TextShaper;
