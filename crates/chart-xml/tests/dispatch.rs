// File: crates/chart-xml/tests/dispatch.rs
// Purpose: Element dispatch onto chart series: x/y resolution, colour lookup, legend decision, errors.

use chart_core::{PointColors, Series};
use chart_xml::{render_document, Document, Error, LoadOptions};

fn chart_of(xml: &str) -> chart_core::Chart {
    let doc = Document::parse(xml, &LoadOptions::default()).expect("parse");
    render_document(&doc).expect("render")
}

fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    std::fs::read_to_string(path).expect("read fixture")
}

#[test]
fn single_plot_without_label_has_no_legend() {
    let chart = chart_of(&fixture("simple.xml"));
    assert_eq!(chart.series.len(), 1);
    match &chart.series[0] {
        Series::Line(l) => {
            assert_eq!(l.x, vec![0.0, 1.0, 2.0]);
            assert_eq!(l.y, vec![1.0, 2.0, 3.0]);
        }
        other => panic!("expected a line, got {other:?}"),
    }
    assert!(!chart.legend);
}

#[test]
fn labelled_plots_turn_the_legend_on() {
    let chart = chart_of(&fixture("population.xml"));
    assert_eq!(chart.series.len(), 4);
    assert!(chart.legend);
    assert!(chart.x_axis.is_log());
    assert_eq!(chart.title.as_deref(), Some("Convergence"));
    assert_eq!(chart.legend_entries().len(), 4);
}

#[test]
fn scatter_c_naming_a_series_maps_colours() {
    let chart = chart_of(&fixture("heatmap.xml"));
    let scatter = chart
        .series
        .iter()
        .find_map(|s| match s {
            Series::Scatter(sc) => Some(sc),
            _ => None,
        })
        .expect("scatter present");
    match &scatter.colors {
        PointColors::Mapped { values, .. } => assert_eq!(values, &vec![3.0, 1.0, 2.0]),
        other => panic!("expected mapped colours, got {other:?}"),
    }
    assert_eq!(scatter.sizes, vec![50.0]);
}

#[test]
fn imshow_reads_extent_and_norm_and_gets_a_colorbar() {
    let chart = chart_of(&fixture("heatmap.xml"));
    let img = chart
        .series
        .iter()
        .find_map(|s| match s {
            Series::Image(img) => Some(img),
            _ => None,
        })
        .expect("image present");
    assert_eq!(img.extent, Some([0.0, 4.0, 0.0, 3.0]));
    assert_eq!(img.norm, Some(chart_core::Normalize::new(0.0, 5.0)));
    assert!(img.colorbar);
    // legend lists the scatter and the labelled vertical line
    assert!(chart.legend);
    assert_eq!(chart.legend_entries().len(), 2);
}

#[test]
fn axvline_label_alone_does_not_request_a_legend() {
    let chart = chart_of(r#"<figure><axvline x="1.5" label="only"/></figure>"#);
    assert!(!chart.legend);
    match &chart.series[0] {
        Series::VLine(v) => assert_eq!(v.x, 1.5),
        other => panic!("expected a vertical line, got {other:?}"),
    }
}

#[test]
fn unknown_elements_are_skipped() {
    let chart = chart_of(&fixture("unknown_tag.xml"));
    assert_eq!(chart.series.len(), 1);
    assert!(matches!(chart.series[0], Series::Scatter(_)));
}

#[test]
fn unknown_option_is_fatal() {
    let doc = Document::parse(&fixture("bad_option.xml"), &LoadOptions::default()).unwrap();
    let err = render_document(&doc).unwrap_err();
    assert!(matches!(err, Error::UnknownOption { ref tag, ref name } if tag == "plot" && name == "sparkle"));
}

#[test]
fn structural_errors() {
    let cases = [
        (r#"<figure><plot y="a"/></figure>"#, "missing x"),
        (r#"<figure><plot x="" y="nope"/></figure>"#, "unknown series"),
        (r#"<figure><axvline x="left"/></figure>"#, "non-numeric x"),
        (r#"<figure><data name="a">1,2</data><imshow X="a"/></figure>"#, "1-D image"),
        (r#"<figure><data2D name="m">1</data2D><imshow X="m" extent="(0,1)"/></figure>"#, "short extent"),
        (r#"<figure><data name="a">1,2</data><data name="c">1</data><scatter x="" y="a" c="c"/></figure>"#, "colour count"),
        (r#"<figure><data name="a">1,2</data><data name="b">1,2,3</data><plot x="a" y="b"/></figure>"#, "plot lengths"),
        (r#"<figure><data name="a">1,2</data><data name="b">1,2,3</data><scatter x="a" y="b"/></figure>"#, "scatter lengths"),
    ];
    for (xml, what) in cases {
        let doc = Document::parse(xml, &LoadOptions::default()).expect("parse");
        assert!(render_document(&doc).is_err(), "{what} should fail");
    }
}

#[test]
fn quoted_references_and_tuples_are_unquoted() {
    let chart = chart_of(
        r#"<figure>
            <data name="a">1,2,3</data>
            <data2D name="m">1,2;3,4</data2D>
            <plot x="" y="'a'"/>
            <imshow X="'m'" extent="'(0,4,0,3)'" norm="'(0,5)'"/>
        </figure>"#,
    );
    match &chart.series[0] {
        Series::Line(l) => assert_eq!(l.y, vec![1.0, 2.0, 3.0]),
        other => panic!("expected a line, got {other:?}"),
    }
    match &chart.series[1] {
        Series::Image(img) => {
            assert_eq!(img.extent, Some([0.0, 4.0, 0.0, 3.0]));
            assert_eq!(img.norm, Some(chart_core::Normalize::new(0.0, 5.0)));
        }
        other => panic!("expected an image, got {other:?}"),
    }
}

#[test]
fn mismatched_xy_lengths_name_both_arrays() {
    let doc = Document::parse(
        r#"<figure><data name="a">1,2</data><data name="b">1,two,3</data><plot x="a" y="b"/></figure>"#,
        &LoadOptions::default(),
    )
    .expect("parse");
    match render_document(&doc).unwrap_err() {
        Error::LengthMismatch { tag, x, nx, y, ny } => {
            assert_eq!((tag.as_str(), x.as_str(), nx, y.as_str(), ny), ("plot", "a", 2, "b", 0));
        }
        other => panic!("expected a length mismatch, got {other:?}"),
    }
}

#[test]
fn degraded_arrays_plot_as_empty_series() {
    let chart = chart_of(r#"<figure><data name="a">1,two,3</data><plot x="" y="a"/></figure>"#);
    match &chart.series[0] {
        Series::Line(l) => assert!(l.x.is_empty() && l.y.is_empty()),
        other => panic!("expected a line, got {other:?}"),
    }
}
