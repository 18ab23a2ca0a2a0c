// File: crates/chart-xml/src/dispatch.rs
// Summary: Turns a loaded document into a chart: axes setup, one series per element, legend decision.

use chart_core::{Chart, ImageSeries, LineSeries, Normalize, PointColors, ScatterSeries, VLine};
use log::{debug, warn};

use crate::array::{parse_tuple, parse_tuple_n};
use crate::axes::AxesConfig;
use crate::document::{lookup_1d, lookup_2d, DataTable, Document, ElementKind, PlotElement};
use crate::error::{Error, Result};
use crate::options::{apply_image_options, apply_line_options, apply_scatter_options, apply_vline_options};
use crate::value::{Attribute, Attributes};

/// Resolve the `x`/`y` references of `plot` and `scatter`.
///
/// An empty `x` pairs `y` with its indices, an empty `y` pairs `x` with its
/// indices, otherwise both name table entries.
pub fn resolve_xy(x: &str, y: &str, table: &DataTable) -> Result<(Vec<f64>, Vec<f64>)> {
    let indices = |n: usize| (0..n).map(|i| i as f64).collect::<Vec<_>>();
    if x.is_empty() {
        let ys = lookup_1d(table, y)?.to_vec();
        Ok((indices(ys.len()), ys))
    } else if y.is_empty() {
        let xs = lookup_1d(table, x)?.to_vec();
        let ys = indices(xs.len());
        Ok((xs, ys))
    } else {
        Ok((lookup_1d(table, x)?.to_vec(), lookup_1d(table, y)?.to_vec()))
    }
}

fn required(tag: &str, attrs: &mut Attributes, name: &str) -> Result<Attribute> {
    attrs.take(name).ok_or_else(|| Error::MissingAttribute { tag: tag.to_string(), name: name.to_string() })
}

fn check_lengths(tag: &str, x: &Attribute, y: &Attribute, nx: usize, ny: usize) -> Result<()> {
    if nx == ny {
        return Ok(());
    }
    Err(Error::LengthMismatch { tag: tag.to_string(), x: x.text().to_string(), nx, y: y.text().to_string(), ny })
}

/// Build the chart for `doc`. The figure attributes are applied before any element is drawn.
pub fn render_document(doc: &Document) -> Result<Chart> {
    let mut chart = Chart::new();
    AxesConfig::from_attributes(&doc.figure)?.apply(&mut chart);

    let mut need_legend = false;
    for el in &doc.elements {
        debug!("line {}: <{}> with {} attributes", el.line, el.kind.tag(), el.attrs.len());
        need_legend |= dispatch(el, &doc.data, &mut chart)?;
    }
    if need_legend {
        chart.show_legend();
    }
    Ok(chart)
}

/// Draw one element; returns whether it asks for a legend.
fn dispatch(el: &PlotElement, table: &DataTable, chart: &mut Chart) -> Result<bool> {
    let mut attrs = el.attrs.clone();
    let tag = el.kind.tag();
    match &el.kind {
        ElementKind::Plot => {
            let (x, y) = (required(tag, &mut attrs, "x")?, required(tag, &mut attrs, "y")?);
            let (xs, ys) = resolve_xy(x.text(), y.text(), table)?;
            check_lengths(tag, &x, &y, xs.len(), ys.len())?;
            let labelled = attrs.contains("label");
            let mut line = LineSeries::new(xs, ys);
            apply_line_options(attrs, &mut line)?;
            chart.add_series(line);
            Ok(labelled)
        }
        ElementKind::Scatter => {
            let (x, y) = (required(tag, &mut attrs, "x")?, required(tag, &mut attrs, "y")?);
            let (xs, ys) = resolve_xy(x.text(), y.text(), table)?;
            check_lengths(tag, &x, &y, xs.len(), ys.len())?;
            let labelled = attrs.contains("label");
            let n = xs.len();
            let mut sc = ScatterSeries::new(xs, ys);
            // `c` naming a table entry colours each point by that array
            let table_ref = attrs.get("c").map(|c| c.text().to_string()).filter(|name| table.contains_key(name));
            if let Some(name) = table_ref {
                attrs.take("c");
                let values = lookup_1d(table, &name)?.to_vec();
                if values.len() != n {
                    return Err(Error::InvalidOption {
                        tag: tag.to_string(),
                        name: "c".to_string(),
                        reason: format!("'{name}' has {} values for {n} points", values.len()),
                    });
                }
                sc.colors = PointColors::Mapped { values, cmap: Default::default(), norm: None };
            }
            apply_scatter_options(attrs, &mut sc)?;
            chart.add_series(sc);
            Ok(labelled)
        }
        ElementKind::AxVLine => {
            let x = required(tag, &mut attrs, "x")?;
            let pos = x
                .value
                .as_f64()
                .or_else(|| x.raw.trim().parse::<f64>().ok())
                .ok_or_else(|| Error::InvalidNumber { attr: "x".to_string(), value: x.raw.clone() })?;
            let mut line = VLine::new(pos);
            apply_vline_options(attrs, &mut line)?;
            chart.add_series(line);
            Ok(false)
        }
        ElementKind::ImShow => {
            let data = required(tag, &mut attrs, "X")?;
            let mut img = ImageSeries::new(lookup_2d(table, data.text())?.to_vec());
            if let Some(extent) = attrs.take("extent") {
                let v = parse_tuple_n(extent.text(), 4)
                    .map_err(|source| Error::InvalidTuple { attr: "extent".to_string(), source })?;
                img.extent = Some([v[0], v[1], v[2], v[3]]);
            }
            if let Some(norm) = attrs.take("norm") {
                let v = parse_tuple(norm.text()).map_err(|source| Error::InvalidTuple { attr: "norm".to_string(), source })?;
                match v.as_slice() {
                    [vmin, vmax, ..] => img.norm = Some(Normalize::new(*vmin, *vmax)),
                    _ => {
                        return Err(Error::InvalidTuple {
                            attr: "norm".to_string(),
                            source: crate::array::ArrayError::Length { expected: 2, found: v.len() },
                        })
                    }
                }
            }
            apply_image_options(attrs, &mut img)?;
            img.colorbar = true;
            chart.add_series(img);
            Ok(false)
        }
        ElementKind::Unknown(other) => {
            warn!("line {}: skipping unknown element <{other}>", el.line);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DataSeries;

    fn table() -> DataTable {
        let mut t = DataTable::new();
        t.insert("a".into(), DataSeries::OneD(vec![1.0, 2.0, 3.0]));
        t.insert("b".into(), DataSeries::OneD(vec![4.0, 5.0, 6.0]));
        t.insert("m".into(), DataSeries::TwoD(vec![vec![1.0]]));
        t
    }

    #[test]
    fn resolve_xy_rules() {
        let t = table();
        assert_eq!(resolve_xy("", "a", &t).unwrap(), (vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]));
        assert_eq!(resolve_xy("a", "", &t).unwrap(), (vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0]));
        assert_eq!(resolve_xy("a", "b", &t).unwrap(), (vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]));
        assert!(matches!(resolve_xy("", "zz", &t), Err(Error::UnknownSeries(_))));
        assert!(matches!(resolve_xy("m", "a", &t), Err(Error::ExpectedOneD(_))));
    }
}
