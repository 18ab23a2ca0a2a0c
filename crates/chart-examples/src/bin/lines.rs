// File: crates/chart-examples/src/bin/lines.rs
// Summary: Writes a log-scale comparison document with DocumentWriter and renders it to PNG.

use anyhow::Result;
use chart_xml::DocumentWriter;

fn main() -> Result<()> {
    let sizes1 = [10, 100, 1_000, 10_000];
    let sizes2 = [10, 100, 1_000];
    // rounds to consensus per population size
    let trend: Vec<f64> = sizes1.iter().map(|&n| 4.0 * (n as f64).ln()).collect();
    let trend_pseudo: Vec<f64> = sizes1.iter().map(|&n| 3.0 * (n as f64).ln()).collect();
    let voter: Vec<f64> = sizes2.iter().map(|&n| 0.9 * n as f64).collect();

    let out_dir = std::path::PathBuf::from("target/out");
    std::fs::create_dir_all(&out_dir)?;

    let mut w = DocumentWriter::new(&[("xscale", "log"), ("yscale", "log"), ("xlabel", "$n$"), ("ylabel", "rounds")]);
    w.plot("populationSize1", "trend", &[("color", "tab:blue"), ("label", "Follow the Trend"), ("ls", "-"), ("marker", "o")])
        .plot("populationSize1", "trendPseudo", &[("color", "tab:blue"), ("label", "Follow the Trend (Pseudo-consensus)"), ("ls", "--"), ("marker", "o")])
        .plot("populationSize2", "voter", &[("color", "tab:orange"), ("label", "Voter"), ("ls", "-"), ("marker", "^")])
        .data("populationSize1", &sizes1)
        .data("populationSize2", &sizes2)
        .data("trend", &trend[..])
        .data("trendPseudo", &trend_pseudo[..])
        .data("voter", &voter[..]);
    let doc = w.write(out_dir.join("example_lines"))?;

    chart_xml::plot(&doc, false, true)?;
    println!("Wrote {}", chart_xml::save_path(&doc)?.display());
    Ok(())
}
