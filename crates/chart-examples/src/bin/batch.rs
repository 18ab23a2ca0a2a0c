// File: crates/chart-examples/src/bin/batch.rs
// Summary: Generates a series of heatmap documents and renders each one to PNG without showing it.

use anyhow::{Context, Result};
use chart_xml::{render_file, DocumentWriter, Headless, RenderConfig};

fn main() -> Result<()> {
    let count: usize = std::env::args().nth(1).map(|a| a.parse()).transpose()?.unwrap_or(8);
    let out_dir = std::path::PathBuf::from("target/out/batch");
    std::fs::create_dir_all(&out_dir)?;
    let cfg = RenderConfig { show: false, save: true, ..RenderConfig::default() };

    for i in 0..count {
        let phase = i as f64 / count.max(1) as f64 * std::f64::consts::TAU;
        let field: Vec<Vec<f64>> = (0..24)
            .map(|r| (0..32).map(|c| ((c as f64 * 0.3 + phase).sin() + (r as f64 * 0.25).cos()) * 0.5).collect())
            .collect();
        let profile: Vec<f64> = field.iter().map(|row| row.iter().sum::<f64>() / row.len() as f64).collect();

        let title = format!("frame {i}");
        let mut w = DocumentWriter::new(&[("title", title.as_str())]);
        w.data_2d("field", &field[..])
            .data("profile", &profile[..])
            .imshow("field", &[("cmap", "coolwarm"), ("norm", "(-1,1)"), ("origin", "lower")])
            .plot("", "profile", &[("color", "k"), ("lw", "2")])
            .axvline(0.0, &[("color", "tab:green"), ("ls", ":")]);
        let doc = w.write(out_dir.join(format!("frame{i}")))?;

        let outcome = render_file(&doc, &cfg, &mut Headless).with_context(|| format!("render {}", doc.display()))?;
        if let Some(png) = outcome.saved {
            println!("Wrote {}", png.display());
        }
    }
    Ok(())
}
