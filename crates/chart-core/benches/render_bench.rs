use anyhow::Result;
use chart_core::{Chart, ImageSeries, LineSeries, RenderOptions, ScatterSeries};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn build_chart_xy(n: usize) -> Chart {
    let mut ch = Chart::new();
    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..n).map(|i| (i as f64 * 0.01).sin() * 10.0 + (i as f64 * 0.0001)).collect();
    ch.add_series(LineSeries::new(x.clone(), y.clone()));
    ch.add_series(ScatterSeries::new(x.into_iter().step_by(50).collect(), y.into_iter().step_by(50).collect()));
    ch
}

fn build_chart_image(side: usize) -> Chart {
    let mut ch = Chart::new();
    let data = (0..side)
        .map(|r| (0..side).map(|c| ((r * c) as f64 * 0.01).cos()).collect())
        .collect();
    let mut img = ImageSeries::new(data);
    img.colorbar = true;
    ch.add_series(img);
    ch
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    let mut opts = RenderOptions::default();
    opts.draw_labels = false;
    for &n in &[10_000usize, 50_000usize] {
        group.bench_function(format!("xy_{n}"), |b| {
            let ch = build_chart_xy(n);
            b.iter(|| -> Result<()> {
                let bytes = ch.render_to_png_bytes(&opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.bench_function("imshow_128", |b| {
        let ch = build_chart_image(128);
        b.iter(|| -> Result<()> {
            black_box(ch.render_to_png_bytes(&opts)?);
            Ok(())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
