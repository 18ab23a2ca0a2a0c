// File: crates/chart-xml/tests/end_to_end.rs
// Purpose: File in, PNG out: save path, resolution, and viewer invocation order.

use chart_core::Chart;
use chart_xml::{render_file, Error, FigureViewer, RenderConfig};
use std::path::PathBuf;

#[derive(Default)]
struct Recorder {
    titles: Vec<String>,
    series: Vec<usize>,
}

impl FigureViewer for Recorder {
    fn show(&mut self, chart: &Chart, title: &str) -> anyhow::Result<()> {
        self.titles.push(title.to_string());
        self.series.push(chart.series.len());
        Ok(())
    }
}

struct Failing;

impl FigureViewer for Failing {
    fn show(&mut self, _chart: &Chart, _title: &str) -> anyhow::Result<()> {
        anyhow::bail!("no display")
    }
}

fn scratch_copy(fixture: &str, as_name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(format!("e2e-{as_name}"));
    std::fs::create_dir_all(&dir).expect("scratch dir");
    let src = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(fixture);
    let dst = dir.join(as_name);
    std::fs::copy(src, &dst).expect("copy fixture");
    dst
}

#[test]
fn save_writes_a_300_dpi_png_next_to_the_input() {
    let input = scratch_copy("population.xml", "population.v1.xml");
    let cfg = RenderConfig { show: false, save: true, ..RenderConfig::default() };
    let outcome = render_file(&input, &cfg, &mut Recorder::default()).expect("render");

    let saved = outcome.saved.expect("saved path");
    assert_eq!(saved, input.with_file_name("population.png"));
    let img = image::open(&saved).expect("decode saved png").to_rgba8();
    assert_eq!(img.dimensions(), (2400, 1800));
    assert!(!outcome.shown);
}

#[test]
fn show_hands_the_chart_to_the_viewer() {
    let input = scratch_copy("heatmap.xml", "heatmap.xml");
    let mut viewer = Recorder::default();
    let cfg = RenderConfig { show: true, save: false, ..RenderConfig::default() };
    let outcome = render_file(&input, &cfg, &mut viewer).expect("render");
    assert!(outcome.shown);
    assert!(outcome.saved.is_none());
    assert_eq!(viewer.titles, vec!["heatmap.xml".to_string()]);
    assert_eq!(viewer.series, vec![3]);
}

#[test]
fn viewer_failure_is_reported() {
    let input = scratch_copy("simple.xml", "simple.xml");
    let cfg = RenderConfig { show: true, save: false, ..RenderConfig::default() };
    let err = render_file(&input, &cfg, &mut Failing).unwrap_err();
    assert!(matches!(err, Error::Display(_)));
}

#[test]
fn input_without_dot_cannot_be_saved() {
    let input = scratch_copy("simple.xml", "simple");
    let cfg = RenderConfig { show: false, save: true, ..RenderConfig::default() };
    let err = render_file(&input, &cfg, &mut Recorder::default()).unwrap_err();
    assert!(matches!(err, Error::NoExtension(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let cfg = RenderConfig { show: false, ..RenderConfig::default() };
    let err = render_file("does/not/exist.xml", &cfg, &mut Recorder::default()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn strict_mode_fails_on_bad_arrays() {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("e2e-strict");
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("bad.xml");
    std::fs::write(&input, r#"<figure><data name="a">1,x</data><plot x="" y="a"/></figure>"#).unwrap();

    let lenient = RenderConfig { show: false, ..RenderConfig::default() };
    assert!(render_file(&input, &lenient, &mut Recorder::default()).is_ok());
    let strict = RenderConfig { strict_arrays: true, ..lenient };
    assert!(matches!(render_file(&input, &strict, &mut Recorder::default()), Err(Error::Array { .. })));
}
