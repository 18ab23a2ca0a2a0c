// File: crates/chart-xml/src/axes.rs
// Summary: Root-element attributes as axes configuration (title, labels, limits, scales).

use chart_core::{Chart, ScaleKind};
use log::warn;

use crate::error::{Error, Result};
use crate::value::{Attribute, Attributes};

const TAG: &str = "figure";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxesConfig {
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xscale: Option<ScaleKind>,
    pub yscale: Option<ScaleKind>,
    /// Names of root attributes that configure nothing.
    pub remainder: Vec<String>,
}

impl AxesConfig {
    pub fn from_attributes(attrs: &Attributes) -> Result<Self> {
        let mut cfg = AxesConfig::default();
        for (name, attr) in attrs.iter() {
            match name {
                "title" => cfg.title = Some(attr.raw.clone()),
                "xlabel" => cfg.xlabel = Some(attr.raw.clone()),
                "ylabel" => cfg.ylabel = Some(attr.raw.clone()),
                "xlim" => cfg.xlim = Some(limits(name, attr)?),
                "ylim" => cfg.ylim = Some(limits(name, attr)?),
                "xscale" => cfg.xscale = Some(scale(name, attr)?),
                "yscale" => cfg.yscale = Some(scale(name, attr)?),
                other => {
                    warn!("ignoring unsupported figure attribute '{other}'");
                    cfg.remainder.push(other.to_string());
                }
            }
        }
        Ok(cfg)
    }

    pub fn apply(&self, chart: &mut Chart) {
        if let Some(t) = &self.title {
            chart.title = Some(t.clone());
        }
        if let Some(l) = &self.xlabel {
            chart.x_axis.label = l.clone();
        }
        if let Some(l) = &self.ylabel {
            chart.y_axis.label = l.clone();
        }
        if let Some((lo, hi)) = self.xlim {
            chart.x_axis.set_limits(lo, hi);
        }
        if let Some((lo, hi)) = self.ylim {
            chart.y_axis.set_limits(lo, hi);
        }
        if let Some(k) = self.xscale {
            chart.x_axis.kind = k;
        }
        if let Some(k) = self.yscale {
            chart.y_axis.kind = k;
        }
    }
}

fn limits(name: &str, attr: &Attribute) -> Result<(f64, f64)> {
    match attr.value.as_numbers().as_deref() {
        Some([lo, hi]) => Ok((*lo, *hi)),
        _ => Err(Error::InvalidOption {
            tag: TAG.to_string(),
            name: name.to_string(),
            reason: format!("expected two numbers, got '{}'", attr.raw),
        }),
    }
}

fn scale(name: &str, attr: &Attribute) -> Result<ScaleKind> {
    ScaleKind::from_name(attr.text()).ok_or_else(|| Error::InvalidOption {
        tag: TAG.to_string(),
        name: name.to_string(),
        reason: format!("unsupported scale '{}'", attr.raw),
    })
}
