// File: crates/chart-xml/src/lib.rs
// Summary: XML figure documents rendered with chart-core, saved as PNG and/or shown in a window.
//
// A document is a root element whose attributes configure the axes, holding
// named `data`/`data2D` arrays and drawing elements (`plot`, `scatter`,
// `axvline`, `imshow`) that reference them by name:
//
// <figure title="Growth" xscale="log">
//     <data name="n"> 10,100,1000 </data>
//     <data name="t"> 1,4,9 </data>
//     <plot x="n" y="t" color="tab:blue" ls="--" marker="o" label="trend"/>
// </figure>

pub mod array;
pub mod axes;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod options;
pub mod sink;
pub mod value;
pub mod writer;

use std::path::{Path, PathBuf};

use chart_core::Theme;
use log::debug;

pub use axes::AxesConfig;
pub use dispatch::{render_document, resolve_xy};
pub use document::{DataSeries, DataTable, Document, ElementKind, LoadOptions, PlotElement};
pub use error::{Error, Result};
pub use sink::{save_path, FigureViewer, Headless, SAVE_DPI};
pub use value::{Attribute, Attributes, Value};
pub use writer::DocumentWriter;

/// How one document is rendered and where it goes.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// Block on a window showing the figure.
    pub show: bool,
    /// Write `<stem>.png` next to the input.
    pub save: bool,
    pub dpi: f32,
    pub strict_arrays: bool,
    pub theme: Theme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { show: true, save: false, dpi: SAVE_DPI, strict_arrays: false, theme: Theme::default() }
    }
}

/// What a render produced.
#[derive(Clone, Debug, Default)]
pub struct RenderOutcome {
    pub saved: Option<PathBuf>,
    pub shown: bool,
}

/// Load, draw and output the document at `path`. The figure is saved before
/// it is shown, and dropped when this returns.
pub fn render_file(path: impl AsRef<Path>, cfg: &RenderConfig, viewer: &mut dyn FigureViewer) -> Result<RenderOutcome> {
    let path = path.as_ref();
    let doc = Document::load(path, &LoadOptions { strict_arrays: cfg.strict_arrays })?;
    debug!("{}: {} data series, {} elements", path.display(), doc.data.len(), doc.elements.len());
    let chart = render_document(&doc)?;

    let mut outcome = RenderOutcome::default();
    if cfg.save {
        let out = save_path(path)?;
        sink::save_png(&chart, &out, cfg.dpi, cfg.theme)?;
        outcome.saved = Some(out);
    }
    if cfg.show {
        let title = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        viewer.show(&chart, &title).map_err(Error::Display)?;
        outcome.shown = true;
    }
    Ok(outcome)
}

/// Render the document at `path`, optionally showing it in a window and/or saving it as PNG at 300 DPI.
pub fn plot(path: impl AsRef<Path>, show: bool, save: bool) -> Result<()> {
    let cfg = RenderConfig { show, save, ..RenderConfig::default() };
    if show {
        let mut viewer = default_viewer(cfg.theme);
        render_file(path, &cfg, viewer.as_mut())?;
    } else {
        render_file(path, &cfg, &mut Headless)?;
    }
    Ok(())
}

/// A window viewer drawing with `theme` when built with the `window` feature,
/// otherwise [`Headless`].
pub fn default_viewer(theme: Theme) -> Box<dyn FigureViewer> {
    #[cfg(feature = "window")]
    {
        Box::new(chart_window::Viewer::new().with_theme(theme))
    }
    #[cfg(not(feature = "window"))]
    {
        let _ = theme;
        Box::new(Headless)
    }
}
