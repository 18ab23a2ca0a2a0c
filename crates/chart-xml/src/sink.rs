// File: crates/chart-xml/src/sink.rs
// Summary: Output side of a render: PNG path derivation, high-resolution save, and figure viewers.

use std::path::{Path, PathBuf};

use chart_core::types::{FIG_HEIGHT_IN, FIG_WIDTH_IN};
use chart_core::{Chart, RenderOptions, Theme};
use log::{info, warn};

use crate::error::{Error, Result};

/// Resolution of saved figures.
pub const SAVE_DPI: f32 = 300.0;

/// PNG path for an input file: the file name up to its first `.`, plus `.png`,
/// in the same directory (`res/plot2.xml` gives `res/plot2.png`).
pub fn save_path(input: impl AsRef<Path>) -> Result<PathBuf> {
    let input = input.as_ref();
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy())
        .ok_or_else(|| Error::NoExtension(input.to_path_buf()))?;
    let stem = name
        .split_once('.')
        .map(|(stem, _)| stem)
        .ok_or_else(|| Error::NoExtension(input.to_path_buf()))?;
    Ok(input.with_file_name(format!("{stem}.png")))
}

/// Render `chart` as an 8 x 6 in figure at `dpi` and write it to `path`.
pub fn save_png(chart: &Chart, path: &Path, dpi: f32, theme: Theme) -> Result<()> {
    let mut opts = RenderOptions::for_figure(FIG_WIDTH_IN, FIG_HEIGHT_IN, dpi);
    opts.theme = theme;
    let bytes = chart.render_to_png_bytes(&opts).map_err(Error::Render)?;
    std::fs::write(path, bytes).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    info!("saved {} ({}x{} px)", path.display(), opts.width, opts.height);
    Ok(())
}

/// Something that can present a finished figure to the user.
pub trait FigureViewer {
    /// Show `chart`, blocking until the user is done with it.
    fn show(&mut self, chart: &Chart, title: &str) -> anyhow::Result<()>;
}

/// Viewer for environments without a display; showing is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl FigureViewer for Headless {
    fn show(&mut self, _chart: &Chart, title: &str) -> anyhow::Result<()> {
        warn!("no window support; not showing '{title}'");
        Ok(())
    }
}

#[cfg(feature = "window")]
impl FigureViewer for chart_window::Viewer {
    fn show(&mut self, chart: &Chart, title: &str) -> anyhow::Result<()> {
        chart_window::Viewer::show(self, chart, title)
    }
}
