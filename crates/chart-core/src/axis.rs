// File: crates/chart-core/src/axis.rs
// Summary: Axis model with label, optional fixed limits and scale kind.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log10,
}

impl ScaleKind {
    /// Parse a scale name as written in documents (`linear`, `log`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(ScaleKind::Linear),
            "log" | "log10" => Some(ScaleKind::Log10),
            _ => None,
        }
    }
}

/// One axis of the chart. `min`/`max` left unset are autoscaled from the data.
/// Setting `min > max` inverts the axis.
#[derive(Clone, Debug, Default)]
pub struct Axis {
    pub label: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub kind: ScaleKind,
}

impl Axis {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Self::default() }
    }

    /// Axis with fixed limits.
    pub fn with_limits(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min: Some(min), max: Some(max), kind: ScaleKind::Linear }
    }

    pub fn set_limits(&mut self, min: f64, max: f64) {
        self.min = Some(min);
        self.max = Some(max);
    }

    pub fn is_log(&self) -> bool {
        self.kind == ScaleKind::Log10
    }
}
