// File: crates/chart-xml/src/error.rs
// Summary: Error type for loading, dispatching and saving figure documents.

use std::path::PathBuf;

use thiserror::Error;

use crate::array::ArrayError;

/// Every variant aborts the render of the current document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("<{tag}> is missing attribute '{name}'")]
    MissingAttribute { tag: String, name: String },
    #[error("no data series named '{0}'")]
    UnknownSeries(String),
    #[error("data series '{0}' is 2-D where a 1-D array is expected")]
    ExpectedOneD(String),
    #[error("data series '{0}' is 1-D where a 2-D array is expected")]
    ExpectedTwoD(String),
    #[error("<{tag}> x '{x}' has {nx} values but y '{y}' has {ny}")]
    LengthMismatch { tag: String, x: String, nx: usize, y: String, ny: usize },
    #[error("attribute '{attr}' is not a valid tuple: {source}")]
    InvalidTuple {
        attr: String,
        #[source]
        source: ArrayError,
    },
    #[error("data series '{name}': {source}")]
    Array {
        name: String,
        #[source]
        source: ArrayError,
    },
    #[error("attribute '{attr}' is not a number: '{value}'")]
    InvalidNumber { attr: String, value: String },
    #[error("<{tag}> does not accept option '{name}'")]
    UnknownOption { tag: String, name: String },
    #[error("<{tag}> option '{name}': {reason}")]
    InvalidOption { tag: String, name: String, reason: String },
    #[error("cannot derive a PNG path from '{}': the file name has no '.'", .0.display())]
    NoExtension(PathBuf),
    #[error("rendering failed: {0:#}")]
    Render(anyhow::Error),
    #[error("display failed: {0:#}")]
    Display(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
