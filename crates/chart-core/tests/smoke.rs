// File: crates/chart-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use chart_core::{Axis, Chart, ImageSeries, LineSeries, RenderOptions, ScatterSeries, VLine};

#[test]
fn render_smoke_png() {
    // Minimal data: tiny line series
    let mut chart = Chart::new();
    chart.x_axis = Axis::with_limits("X", 0.0, 4.0);
    chart.y_axis = Axis::with_limits("Y", 0.0, 4.0);
    chart.add_series(LineSeries::new(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![0.0, 2.0, 1.0, 3.5, 2.5]));

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();

    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn render_every_series_kind_with_legend() {
    let mut chart = Chart::new();
    chart.title = Some("All kinds".into());
    chart.x_axis.label = "$x$".into();
    chart.y_axis.label = "y".into();

    let mut line = LineSeries::new(vec![0.0, 1.0, f64::NAN, 3.0], vec![1.0, 2.0, 3.0, 1.0]);
    line.label = Some("line".into());
    chart.add_series(line);
    let mut sc = ScatterSeries::new(vec![0.5, 1.5, 2.5], vec![1.5, 2.5, 0.5]);
    sc.label = Some("points".into());
    chart.add_series(sc);
    chart.add_series(VLine::new(2.0));
    let mut img = ImageSeries::new(vec![vec![0.0, 1.0], vec![2.0, f64::NAN]]);
    img.colorbar = true;
    chart.add_series(img);
    chart.show_legend();
    assert_eq!(chart.legend_entries().len(), 2);

    let bytes = chart.render_to_png_bytes(&RenderOptions::default()).expect("render bytes");
    let decoded = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(decoded.dimensions(), (800, 600));
}

#[test]
fn cycle_colours_are_assigned_in_order() {
    let mut chart = Chart::new();
    chart.add_series(LineSeries::new(vec![0.0], vec![0.0]));
    chart.add_series(ScatterSeries::new(vec![0.0], vec![0.0]));
    let colors: Vec<_> = chart
        .series
        .iter()
        .map(|s| match s {
            chart_core::Series::Line(l) => l.color,
            chart_core::Series::Scatter(s) => match &s.colors {
                chart_core::PointColors::Uniform(c) => *c,
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(colors, vec![Some(chart_core::color::TAB10[0]), Some(chart_core::color::TAB10[1])]);
}
