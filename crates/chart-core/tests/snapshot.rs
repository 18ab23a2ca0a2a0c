// File: crates/chart-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic small chart to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, checks size and content of the render and notes the missing snapshot.
// Every render is done twice and must be pixel-identical.

use chart_core::{Axis, Chart, ImageSeries, LineSeries, RenderOptions, ScatterSeries, VLine};
use chart_core::series::Dash;

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(name: &str, bytes: &[u8]) {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__").join(name);
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(&path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(&path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "Pixels differ: {}", path.display());
    } else {
        let img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        assert_eq!(img.dimensions(), (800, 600));
        let first = img.get_pixel(0, 0);
        assert!(img.pixels().any(|p| p != first), "blank render: {name}");
        eprintln!("[snapshot] Missing {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}

fn render_to_bytes<F: FnOnce(&mut Chart)>(build: F) -> Vec<u8> {
    let mut chart = Chart::new();
    build(&mut chart);
    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid text nondeterminism across platforms
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    let again = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert_eq!(decode(&bytes).as_raw(), decode(&again).as_raw(), "render is not deterministic");
    bytes
}

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).expect("decode").to_rgba8()
}

fn contains_rgb(bytes: &[u8], rgb: [u8; 3]) -> bool {
    decode(bytes).pixels().any(|p| p.0[..3] == rgb)
}

#[test]
fn golden_basic_chart() {
    let bytes = render_to_bytes(|c| {
        c.x_axis = Axis::with_limits("X", 0.0, 4.0);
        c.y_axis = Axis::with_limits("Y", 0.0, 4.0);
        c.add_series(LineSeries::new(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![0.0, 1.0, 0.0, 1.5, 1.0]));
    });
    write_or_compare("basic_chart.png", &bytes);
}

#[test]
fn golden_styled_lines() {
    let bytes = render_to_bytes(|c| {
        let xs: Vec<f64> = (0..20).map(|i| i as f64 * 0.5).collect();
        for (k, dash) in [Dash::Solid, Dash::Dashed, Dash::Dotted, Dash::DashDot].into_iter().enumerate() {
            let mut l = LineSeries::new(xs.clone(), xs.iter().map(|x| (x + k as f64).sin()).collect());
            l.dash = dash;
            l.label = Some(format!("k={k}"));
            c.add_series(l);
        }
        c.add_series(VLine::new(4.0));
        c.show_legend();
    });
    write_or_compare("styled_lines.png", &bytes);
}

#[test]
fn golden_scatter_and_image() {
    let bytes = render_to_bytes(|c| {
        let data = (0..8).map(|r| (0..8).map(|k| (r * k) as f64).collect()).collect();
        let mut img = ImageSeries::new(data);
        img.colorbar = true;
        c.add_series(img);
        c.add_series(ScatterSeries::new(vec![1.0, 3.0, 5.0], vec![1.0, 4.0, 6.0]));
    });
    // lowest and highest viridis cells
    assert!(contains_rgb(&bytes, [68, 1, 84]));
    assert!(contains_rgb(&bytes, [253, 231, 37]));
    write_or_compare("scatter_image.png", &bytes);
}
