// File: crates/chart-xml/src/writer.rs
// Summary: Builds figure documents (root attributes, data arrays, drawing elements) and writes them to `<name>.xml`.

use std::fmt::{Display, Write as _};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Incremental writer for a figure document.
///
/// ```
/// use chart_xml::DocumentWriter;
///
/// let mut w = DocumentWriter::new(&[("xscale", "log")]);
/// w.data("n", &[10, 100, 1000]).plot("n", "", &[("marker", "o")]);
/// let xml = w.finish();
/// assert!(xml.starts_with("<figure xscale=\"log\">"));
/// ```
#[derive(Clone, Debug)]
pub struct DocumentWriter {
    out: String,
}

impl DocumentWriter {
    /// Start a document whose root carries `params` as axes attributes.
    pub fn new(params: &[(&str, &str)]) -> Self {
        let mut out = String::from("<figure");
        push_params(&mut out, params);
        out.push_str(">\n");
        Self { out }
    }

    /// A 1-D `data` array.
    pub fn data<T: Display>(&mut self, name: &str, values: &[T]) -> &mut Self {
        let _ = write!(self.out, "\t<data name=\"{}\"> ", escape(name));
        push_joined(&mut self.out, values, ",");
        self.out.push_str(" </data>\n");
        self
    }

    /// A 2-D `data2D` array, rows separated by `;`.
    pub fn data_2d<T: Display>(&mut self, name: &str, rows: &[Vec<T>]) -> &mut Self {
        let _ = write!(self.out, "\t<data2D name=\"{}\">", escape(name));
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                self.out.push(';');
            }
            push_joined(&mut self.out, row, ",");
        }
        self.out.push_str("</data2D>\n");
        self
    }

    /// A line through the arrays named `x` and `y`; either may be empty for indices.
    pub fn plot(&mut self, x: &str, y: &str, params: &[(&str, &str)]) -> &mut Self {
        self.xy_element("plot", x, y, params)
    }

    pub fn scatter(&mut self, x: &str, y: &str, params: &[(&str, &str)]) -> &mut Self {
        self.xy_element("scatter", x, y, params)
    }

    pub fn axvline(&mut self, x: f64, params: &[(&str, &str)]) -> &mut Self {
        let _ = write!(self.out, "\t<axvline x=\"{x}\"");
        push_params(&mut self.out, params);
        self.out.push_str("/>\n");
        self
    }

    /// An image of the 2-D array named `data`.
    pub fn imshow(&mut self, data: &str, params: &[(&str, &str)]) -> &mut Self {
        let _ = write!(self.out, "\t<imshow X=\"{}\"", escape(data));
        push_params(&mut self.out, params);
        self.out.push_str("/>\n");
        self
    }

    fn xy_element(&mut self, tag: &str, x: &str, y: &str, params: &[(&str, &str)]) -> &mut Self {
        let _ = write!(self.out, "\t<{tag} x=\"{}\" y=\"{}\"", escape(x), escape(y));
        push_params(&mut self.out, params);
        self.out.push_str("/>\n");
        self
    }

    /// Close the root element and return the document text.
    pub fn finish(mut self) -> String {
        self.out.push_str("</figure>\n");
        self.out
    }

    /// Close the document and write it to `<base>.xml`, returning the path written.
    pub fn write(self, base: impl AsRef<Path>) -> Result<PathBuf> {
        let mut path = base.as_ref().as_os_str().to_owned();
        path.push(".xml");
        let path = PathBuf::from(path);
        std::fs::write(&path, self.finish()).map_err(|source| Error::Io { path: path.clone(), source })?;
        Ok(path)
    }
}

fn push_params(out: &mut String, params: &[(&str, &str)]) {
    for (k, v) in params {
        let _ = write!(out, " {}=\"{}\"", escape(k), escape(v));
    }
}

fn push_joined<T: Display>(out: &mut String, values: &[T], sep: &str) {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        let _ = write!(out, "{v}");
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
