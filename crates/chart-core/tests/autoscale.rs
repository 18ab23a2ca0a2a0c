// File: crates/chart-core/tests/autoscale.rs
// Purpose: Validate autoscale over mixed series types and explicit limits.

use chart_core::{Axis, Chart, ImageSeries, LineSeries, ScaleKind, ScatterSeries, VLine};

#[test]
fn autoscale_pads_lines_and_scatters() {
    let mut chart = Chart::new();
    chart.add_series(LineSeries::new(vec![0.0, 5.0], vec![1.0, 3.0]));
    chart.add_series(ScatterSeries::new(vec![2.0, 3.0], vec![-1.0, 6.0]));

    let v = chart.view();
    // 5% of the 0..5 span on each side
    assert!((v.left - -0.25).abs() < 1e-9);
    assert!((v.right - 5.25).abs() < 1e-9);
    // y spans -1..6 from the scatter
    assert!((v.bottom - -1.35).abs() < 1e-9);
    assert!((v.top - 6.35).abs() < 1e-9);
}

#[test]
fn axvline_contributes_its_x() {
    let mut chart = Chart::new();
    chart.add_series(LineSeries::new(vec![0.0, 1.0], vec![0.0, 1.0]));
    chart.add_series(VLine::new(3.0));
    let v = chart.view();
    assert!(v.right > 3.0);
    assert!(v.left < 0.0);
}

#[test]
fn image_extent_is_tight_and_inverted_for_upper_origin() {
    let mut chart = Chart::new();
    chart.add_series(ImageSeries::new(vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]));
    let v = chart.view();
    assert_eq!((v.left, v.right), (-0.5, 2.5));
    // row 0 on top: the y axis runs downwards
    assert_eq!((v.bottom, v.top), (1.5, -0.5));
}

#[test]
fn explicit_limits_override_autoscale() {
    let mut chart = Chart::new();
    chart.x_axis = Axis::with_limits("x", -10.0, 10.0);
    chart.add_series(LineSeries::new(vec![0.0, 1.0], vec![0.0, 1.0]));
    let v = chart.view();
    assert_eq!((v.left, v.right), (-10.0, 10.0));
    assert!(v.bottom < 0.0 && v.top > 1.0);
}

#[test]
fn log_axis_ignores_non_positive_values() {
    let mut chart = Chart::new();
    chart.x_axis.kind = ScaleKind::Log10;
    chart.add_series(LineSeries::new(vec![-1.0, 0.0, 10.0, 1000.0], vec![1.0, 2.0, 3.0, 4.0]));
    let v = chart.view();
    assert!(v.left > 0.0 && v.left < 10.0);
    assert!(v.right > 1000.0);
}

#[test]
fn empty_chart_has_unit_view() {
    let v = Chart::new().view();
    assert_eq!((v.left, v.right, v.bottom, v.top), (0.0, 1.0, 0.0, 1.0));
}
