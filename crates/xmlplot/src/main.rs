// File: crates/xmlplot/src/main.rs
// Summary: Renders each XML figure document given on the command line, saving and/or showing it.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chart_core::{theme, Theme};
use chart_xml::{render_file, FigureViewer, Headless, RenderConfig};
use clap::Parser;
use env_logger::Env;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "xmlplot", version, about = "Render XML figure documents to PNG or a window")]
struct Cli {
    /// Figure documents to render, in order
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Save <stem>.png next to each input
    #[arg(long)]
    save: bool,

    /// Do not open a window
    #[arg(long)]
    no_show: bool,

    /// Save resolution
    #[arg(long, default_value_t = chart_xml::SAVE_DPI)]
    dpi: f32,

    /// Fail on malformed data arrays instead of degrading them to empty
    #[arg(long)]
    strict: bool,

    /// light | dark | solarized-light | solarized-dark | high-contrast-dark
    #[arg(long, default_value = "light", value_parser = parse_theme)]
    theme: Theme,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_theme(name: &str) -> Result<Theme, String> {
    theme::find(name).ok_or_else(|| {
        let known: Vec<&str> = theme::presets().iter().map(|t| t.name).collect();
        format!("unknown theme '{name}' (expected one of: {})", known.join(", "))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::new().filter_or("XMLPLOT_LOG", "warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if !(cli.dpi.is_finite() && cli.dpi > 0.0) {
        bail!("--dpi must be a positive number, got {}", cli.dpi);
    }

    let cfg = RenderConfig {
        show: !cli.no_show,
        save: cli.save,
        dpi: cli.dpi,
        strict_arrays: cli.strict,
        theme: cli.theme,
    };
    if !cfg.show && !cfg.save {
        info!("neither showing nor saving; documents are only checked");
    }

    // one window for every document; created only when something is shown
    let mut viewer: Box<dyn FigureViewer> = if cfg.show { chart_xml::default_viewer(cfg.theme) } else { Box::new(Headless) };

    let mut failed = 0usize;
    for file in &cli.files {
        let result = render_file(file, &cfg, viewer.as_mut()).with_context(|| format!("failed to render '{}'", file.display()));
        match result {
            Ok(outcome) => {
                if let Some(png) = outcome.saved {
                    println!("Wrote {}", png.display());
                }
            }
            Err(e) => {
                eprintln!("error: {e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} documents failed", cli.files.len());
    }
    Ok(())
}
