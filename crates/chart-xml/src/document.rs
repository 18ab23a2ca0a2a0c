// File: crates/chart-xml/src/document.rs
// Summary: Loads a figure document: root attributes, the named data table and the ordered drawing elements.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use crate::array::{parse_1d, parse_2d, try_parse_1d, try_parse_2d};
use crate::error::{Error, Result};
use crate::value::Attributes;

/// A named numeric array from a `data` or `data2D` element.
#[derive(Clone, Debug, PartialEq)]
pub enum DataSeries {
    OneD(Vec<f64>),
    TwoD(Vec<Vec<f64>>),
}

impl DataSeries {
    pub fn as_1d(&self) -> Option<&[f64]> {
        match self {
            DataSeries::OneD(v) => Some(v),
            DataSeries::TwoD(_) => None,
        }
    }

    pub fn as_2d(&self) -> Option<&[Vec<f64>]> {
        match self {
            DataSeries::TwoD(rows) => Some(rows),
            DataSeries::OneD(_) => None,
        }
    }

    /// Number of values (1-D) or rows (2-D).
    pub fn len(&self) -> usize {
        match self {
            DataSeries::OneD(v) => v.len(),
            DataSeries::TwoD(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Name to array lookup; a later element with the same name replaces an earlier one.
pub type DataTable = HashMap<String, DataSeries>;

/// Look up a 1-D series by name.
pub fn lookup_1d<'t>(table: &'t DataTable, name: &str) -> Result<&'t [f64]> {
    table
        .get(name)
        .ok_or_else(|| Error::UnknownSeries(name.to_string()))?
        .as_1d()
        .ok_or_else(|| Error::ExpectedOneD(name.to_string()))
}

/// Look up a 2-D series by name.
pub fn lookup_2d<'t>(table: &'t DataTable, name: &str) -> Result<&'t [Vec<f64>]> {
    table
        .get(name)
        .ok_or_else(|| Error::UnknownSeries(name.to_string()))?
        .as_2d()
        .ok_or_else(|| Error::ExpectedTwoD(name.to_string()))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Plot,
    Scatter,
    AxVLine,
    ImShow,
    Unknown(String),
}

impl ElementKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "plot" => ElementKind::Plot,
            "scatter" => ElementKind::Scatter,
            "axvline" => ElementKind::AxVLine,
            "imshow" => ElementKind::ImShow,
            other => ElementKind::Unknown(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ElementKind::Plot => "plot",
            ElementKind::Scatter => "scatter",
            ElementKind::AxVLine => "axvline",
            ElementKind::ImShow => "imshow",
            ElementKind::Unknown(tag) => tag,
        }
    }
}

/// One drawing instruction in document order.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotElement {
    pub kind: ElementKind,
    pub attrs: Attributes,
    /// 1-based source line, for diagnostics.
    pub line: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOptions {
    /// Fail on malformed arrays instead of degrading them to empty.
    pub strict_arrays: bool,
}

/// A parsed figure document.
#[derive(Clone, Debug, Default)]
pub struct Document {
    /// Attributes of the root element (axes configuration).
    pub figure: Attributes,
    pub data: DataTable,
    /// Every child element except `data`/`data2D`.
    pub elements: Vec<PlotElement>,
}

impl Document {
    pub fn parse(text: &str, opts: &LoadOptions) -> Result<Self> {
        let xml = roxmltree::Document::parse(text)?;
        let root = xml.root_element();
        let figure = attributes_of(root);
        let mut data = DataTable::new();
        let mut elements = Vec::new();

        for node in root.children().filter(|n| n.is_element()) {
            let tag = node.tag_name().name();
            match tag {
                "data" | "data2D" => {
                    let name = node.attribute("name").ok_or_else(|| Error::MissingAttribute {
                        tag: tag.to_string(),
                        name: "name".to_string(),
                    })?;
                    let text = node.text().unwrap_or("");
                    let series = read_series(tag == "data2D", name, text, opts)?;
                    debug!("data '{name}': {} entries", series.len());
                    data.insert(name.to_string(), series);
                }
                _ => elements.push(PlotElement {
                    kind: ElementKind::from_tag(tag),
                    attrs: attributes_of(node),
                    line: xml.text_pos_at(node.range().start).row,
                }),
            }
        }

        Ok(Self { figure, data, elements })
    }

    /// Read and parse the file at `path`.
    pub fn load(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text, opts)
    }
}

fn attributes_of(node: roxmltree::Node<'_, '_>) -> Attributes {
    node.attributes().map(|a| (a.name(), a.value())).collect()
}

fn read_series(two_d: bool, name: &str, text: &str, opts: &LoadOptions) -> Result<DataSeries> {
    let wrap = |source| Error::Array { name: name.to_string(), source };
    Ok(match (two_d, opts.strict_arrays) {
        (false, false) => DataSeries::OneD(parse_1d(text)),
        (true, false) => DataSeries::TwoD(parse_2d(text)),
        (false, true) => DataSeries::OneD(try_parse_1d(text).map_err(wrap)?),
        (true, true) => DataSeries::TwoD(try_parse_2d(text).map_err(wrap)?),
    })
}
