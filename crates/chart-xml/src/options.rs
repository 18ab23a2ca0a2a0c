// File: crates/chart-xml/src/options.rs
// Summary: Maps forwarded element attributes onto typed chart-core series styles.

use chart_core::series::{Aspect, Origin};
use chart_core::{Color, Colormap, Dash, ImageSeries, LineSeries, Marker, Normalize, PointColors, ScatterSeries, VLine};
use log::debug;

use crate::error::{Error, Result};
use crate::value::{Attribute, Attributes, Value};

/// Reads option values for one element, producing errors that name the tag.
struct Reader<'a> {
    tag: &'a str,
}

impl<'a> Reader<'a> {
    fn unknown(&self, name: &str) -> Error {
        Error::UnknownOption { tag: self.tag.to_string(), name: name.to_string() }
    }

    fn invalid(&self, name: &str, reason: impl Into<String>) -> Error {
        Error::InvalidOption { tag: self.tag.to_string(), name: name.to_string(), reason: reason.into() }
    }

    fn number(&self, name: &str, attr: &Attribute) -> Result<f64> {
        attr.value.as_f64().ok_or_else(|| Error::InvalidNumber { attr: name.to_string(), value: attr.raw.clone() })
    }

    fn float(&self, name: &str, attr: &Attribute) -> Result<f32> {
        self.number(name, attr).map(|n| n as f32)
    }

    fn unit(&self, name: &str, attr: &Attribute) -> Result<f32> {
        let v = self.number(name, attr)?;
        if !(0.0..=1.0).contains(&v) {
            return Err(self.invalid(name, format!("{v} is outside [0, 1]")));
        }
        Ok(v as f32)
    }

    fn color(&self, name: &str, attr: &Attribute) -> Result<Color> {
        let parsed = match &attr.value {
            Value::Seq(_) => {
                let parts = attr.value.as_numbers().ok_or_else(|| self.invalid(name, "colour tuple must be numeric"))?;
                Color::from_unit(&parts)
            }
            _ => Color::parse(attr.text()),
        };
        parsed.map_err(|e| self.invalid(name, e.to_string()))
    }

    fn dash(&self, name: &str, attr: &Attribute) -> Result<Dash> {
        Dash::from_name(attr.text()).ok_or_else(|| self.invalid(name, format!("unknown line style '{}'", attr.raw)))
    }

    fn marker(&self, name: &str, attr: &Attribute) -> Result<Marker> {
        Marker::from_name(attr.text().trim()).ok_or_else(|| self.invalid(name, format!("unknown marker '{}'", attr.raw)))
    }

    fn cmap(&self, name: &str, attr: &Attribute) -> Result<Colormap> {
        Colormap::from_name(attr.text().trim()).ok_or_else(|| self.invalid(name, format!("unknown colormap '{}'", attr.raw)))
    }

    fn label(&self, attr: &Attribute) -> String {
        match &attr.value {
            Value::Str(s) => s.clone(),
            _ => attr.raw.clone(),
        }
    }
}

/// Options accepted by `plot`.
pub fn apply_line_options(attrs: Attributes, line: &mut LineSeries) -> Result<()> {
    let r = Reader { tag: "plot" };
    for (name, attr) in attrs {
        if attr.value.is_none() {
            continue;
        }
        match name.as_str() {
            "color" | "c" => line.color = Some(r.color(&name, &attr)?),
            "linestyle" | "ls" => line.dash = r.dash(&name, &attr)?,
            "linewidth" | "lw" => line.width = r.float(&name, &attr)?,
            "marker" => line.marker = r.marker(&name, &attr)?,
            "markersize" | "ms" => line.marker_size = r.float(&name, &attr)?,
            "alpha" => line.alpha = r.unit(&name, &attr)?,
            "label" => line.label = Some(r.label(&attr)),
            "zorder" => line.zorder = r.float(&name, &attr)?,
            _ => return Err(r.unknown(&name)),
        }
    }
    Ok(())
}

/// Options accepted by `scatter`. A numeric sequence as long as the point
/// count in `c` becomes colour-mapped values.
pub fn apply_scatter_options(attrs: Attributes, sc: &mut ScatterSeries) -> Result<()> {
    let r = Reader { tag: "scatter" };
    let mut cmap: Option<Colormap> = None;
    let (mut vmin, mut vmax) = (None, None);

    for (name, attr) in attrs {
        if attr.value.is_none() {
            continue;
        }
        match name.as_str() {
            "c" | "color" => {
                sc.colors = match attr.value.as_numbers() {
                    Some(values) if values.len() == sc.x.len() && !values.is_empty() => {
                        PointColors::Mapped { values, cmap: Colormap::default(), norm: None }
                    }
                    _ => PointColors::Uniform(Some(r.color(&name, &attr)?)),
                }
            }
            "s" => {
                sc.sizes = match &attr.value {
                    Value::Seq(_) => attr.value.as_numbers().ok_or_else(|| r.invalid(&name, "sizes must be numeric"))?,
                    _ => vec![r.number(&name, &attr)?],
                }
            }
            "marker" => sc.marker = r.marker(&name, &attr)?,
            "cmap" => cmap = Some(r.cmap(&name, &attr)?),
            "vmin" => vmin = Some(r.number(&name, &attr)?),
            "vmax" => vmax = Some(r.number(&name, &attr)?),
            "alpha" => sc.alpha = r.unit(&name, &attr)?,
            "label" => sc.label = Some(r.label(&attr)),
            "edgecolors" | "edgecolor" => {
                sc.edge_color = match attr.text().trim() {
                    "face" => None,
                    _ => Some(r.color(&name, &attr)?),
                }
            }
            "linewidths" | "linewidth" => {
                sc.edge_width = match attr.value.as_numbers() {
                    Some(ws) => ws.first().copied().unwrap_or(1.0) as f32,
                    None => r.float(&name, &attr)?,
                }
            }
            "zorder" => sc.zorder = r.float(&name, &attr)?,
            _ => return Err(r.unknown(&name)),
        }
    }

    if let PointColors::Mapped { values, cmap: slot, norm } = &mut sc.colors {
        if let Some(c) = cmap {
            *slot = c;
        }
        if vmin.is_some() || vmax.is_some() {
            let auto = Normalize::from_values(values.iter()).unwrap_or(Normalize::new(0.0, 1.0));
            *norm = Some(Normalize::new(vmin.unwrap_or(auto.vmin), vmax.unwrap_or(auto.vmax)));
        }
    }
    Ok(())
}

/// Options accepted by `axvline`.
pub fn apply_vline_options(attrs: Attributes, line: &mut VLine) -> Result<()> {
    let r = Reader { tag: "axvline" };
    for (name, attr) in attrs {
        if attr.value.is_none() {
            continue;
        }
        match name.as_str() {
            "color" | "c" => line.color = Some(r.color(&name, &attr)?),
            "linestyle" | "ls" => line.dash = r.dash(&name, &attr)?,
            "linewidth" | "lw" => line.width = r.float(&name, &attr)?,
            "alpha" => line.alpha = r.unit(&name, &attr)?,
            "label" => line.label = Some(r.label(&attr)),
            "ymin" => line.ymin = r.number(&name, &attr)?,
            "ymax" => line.ymax = r.number(&name, &attr)?,
            "zorder" => line.zorder = r.float(&name, &attr)?,
            _ => return Err(r.unknown(&name)),
        }
    }
    Ok(())
}

/// Options accepted by `imshow`, after `X`, `extent` and `norm` were consumed.
pub fn apply_image_options(attrs: Attributes, img: &mut ImageSeries) -> Result<()> {
    let r = Reader { tag: "imshow" };
    let (mut vmin, mut vmax) = (None, None);
    for (name, attr) in attrs {
        if attr.value.is_none() {
            continue;
        }
        match name.as_str() {
            "cmap" => img.cmap = r.cmap(&name, &attr)?,
            "vmin" => vmin = Some(r.number(&name, &attr)?),
            "vmax" => vmax = Some(r.number(&name, &attr)?),
            "alpha" => img.alpha = r.unit(&name, &attr)?,
            "aspect" => {
                img.aspect = match (&attr.value, attr.text().trim()) {
                    (Value::Number(n), _) if *n > 0.0 => Aspect::Ratio(*n),
                    (_, "auto") => Aspect::Auto,
                    (_, "equal") => Aspect::Equal,
                    _ => return Err(r.invalid(&name, format!("expected 'auto', 'equal' or a positive number, got '{}'", attr.raw))),
                }
            }
            "origin" => {
                img.origin = match attr.text().trim() {
                    "upper" => Origin::Upper,
                    "lower" => Origin::Lower,
                    _ => return Err(r.invalid(&name, format!("expected 'upper' or 'lower', got '{}'", attr.raw))),
                }
            }
            // cells are always drawn as flat rectangles
            "interpolation" => debug!("imshow: interpolation '{}' drawn as nearest", attr.text()),
            "label" => img.label = Some(r.label(&attr)),
            "zorder" => img.zorder = r.float(&name, &attr)?,
            _ => return Err(r.unknown(&name)),
        }
    }
    if vmin.is_some() || vmax.is_some() {
        let base = img.effective_norm();
        img.norm = Some(Normalize::new(vmin.unwrap_or(base.vmin), vmax.unwrap_or(base.vmax)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    #[test]
    fn line_options_map_to_styles() {
        let mut line = LineSeries::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        apply_line_options(
            attrs(&[("color", "tab:orange"), ("ls", "--"), ("lw", "2"), ("marker", "^"), ("label", "Voter"), ("alpha", "0.5")]),
            &mut line,
        )
        .unwrap();
        assert_eq!(line.color, Some(chart_core::color::TAB10[1]));
        assert_eq!(line.dash, Dash::Dashed);
        assert_eq!(line.width, 2.0);
        assert_eq!(line.marker, Marker::TriangleUp);
        assert_eq!(line.label.as_deref(), Some("Voter"));
        assert_eq!(line.alpha, 0.5);
    }

    #[test]
    fn none_keeps_defaults_and_tuples_are_colours() {
        let mut line = LineSeries::new(vec![], vec![]);
        apply_line_options(attrs(&[("color", "(1, 0, 0)"), ("marker", "None")]), &mut line).unwrap();
        assert_eq!(line.color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(line.marker, Marker::None);
    }

    #[test]
    fn unknown_and_invalid_options_fail() {
        let mut line = LineSeries::new(vec![], vec![]);
        assert!(matches!(
            apply_line_options(attrs(&[("bogus", "1")]), &mut line),
            Err(Error::UnknownOption { .. })
        ));
        assert!(matches!(
            apply_line_options(attrs(&[("ls", "~~")]), &mut line),
            Err(Error::InvalidOption { .. })
        ));
        assert!(matches!(
            apply_line_options(attrs(&[("lw", "thick")]), &mut line),
            Err(Error::InvalidNumber { .. })
        ));
    }

    #[test]
    fn scatter_numeric_c_of_point_count_is_mapped() {
        let mut sc = ScatterSeries::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]);
        apply_scatter_options(attrs(&[("c", "[3, 1, 2]"), ("cmap", "hot"), ("vmin", "0")]), &mut sc).unwrap();
        match &sc.colors {
            PointColors::Mapped { values, cmap, norm } => {
                assert_eq!(values, &vec![3.0, 1.0, 2.0]);
                assert_eq!(*cmap, Colormap::from_name("hot").unwrap());
                assert_eq!(*norm, Some(Normalize::new(0.0, 3.0)));
            }
            other => panic!("expected mapped colours, got {other:?}"),
        }
    }

    #[test]
    fn scatter_literal_colour_and_sizes() {
        let mut sc = ScatterSeries::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        apply_scatter_options(attrs(&[("c", "k"), ("s", "[10, 20]"), ("edgecolors", "face")]), &mut sc).unwrap();
        assert_eq!(sc.colors, PointColors::Uniform(Some(Color::BLACK)));
        assert_eq!(sc.sizes, vec![10.0, 20.0]);
        assert_eq!(sc.edge_color, None);
    }

    #[test]
    fn image_options() {
        let mut img = ImageSeries::new(vec![vec![0.0, 4.0]]);
        apply_image_options(
            attrs(&[("cmap", "gray_r"), ("aspect", "auto"), ("origin", "lower"), ("vmax", "2"), ("interpolation", "bilinear")]),
            &mut img,
        )
        .unwrap();
        assert!(img.cmap.reversed);
        assert_eq!(img.aspect, Aspect::Auto);
        assert_eq!(img.origin, Origin::Lower);
        assert_eq!(img.norm, Some(Normalize::new(0.0, 2.0)));
        assert!(apply_image_options(attrs(&[("aspect", "wide")]), &mut img).is_err());
    }

    #[test]
    fn vline_options() {
        let mut v = VLine::new(1.0);
        apply_vline_options(attrs(&[("color", "r"), ("ymax", "0.5"), ("ls", ":")]), &mut v).unwrap();
        assert_eq!(v.color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(v.ymax, 0.5);
        assert_eq!(v.dash, Dash::Dotted);
        assert!(apply_vline_options(attrs(&[("marker", "o")]), &mut v).is_err());
    }
}
