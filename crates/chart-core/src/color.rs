// File: crates/chart-core/src/color.rs
// Summary: RGBA colour type and parser for matplotlib-style colour specs.

use skia_safe as skia;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("unknown colour name '{0}'")]
    UnknownName(String),
    #[error("invalid hex colour '{0}'")]
    InvalidHex(String),
    #[error("colour component {0} outside [0, 1]")]
    OutOfRange(f64),
    #[error("colour tuple needs 3 or 4 components, got {0}")]
    TupleLength(usize),
}

/// The "tab10" qualitative palette, also used as the default colour cycle.
pub const TAB10: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4), // blue
    Color::rgb(0xff, 0x7f, 0x0e), // orange
    Color::rgb(0x2c, 0xa0, 0x2c), // green
    Color::rgb(0xd6, 0x27, 0x28), // red
    Color::rgb(0x94, 0x67, 0xbd), // purple
    Color::rgb(0x8c, 0x56, 0x4b), // brown
    Color::rgb(0xe3, 0x77, 0xc2), // pink
    Color::rgb(0x7f, 0x7f, 0x7f), // gray
    Color::rgb(0xbc, 0xbd, 0x22), // olive
    Color::rgb(0x17, 0xbe, 0xcf), // cyan
];

const TAB10_NAMES: [&str; 10] =
    ["blue", "orange", "green", "red", "purple", "brown", "pink", "gray", "olive", "cyan"];

const NAMED: &[(&str, Color)] = &[
    ("b", Color::rgb(0, 0, 255)),
    ("g", Color::rgb(0, 128, 0)),
    ("r", Color::rgb(255, 0, 0)),
    ("c", Color::rgb(0, 191, 191)),
    ("m", Color::rgb(191, 0, 191)),
    ("y", Color::rgb(191, 191, 0)),
    ("k", Color::rgb(0, 0, 0)),
    ("w", Color::rgb(255, 255, 255)),
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("brown", Color::rgb(165, 42, 42)),
    ("pink", Color::rgb(255, 192, 203)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("darkgray", Color::rgb(169, 169, 169)),
    ("darkgrey", Color::rgb(169, 169, 169)),
    ("lightgray", Color::rgb(211, 211, 211)),
    ("lightgrey", Color::rgb(211, 211, 211)),
    ("silver", Color::rgb(192, 192, 192)),
    ("olive", Color::rgb(128, 128, 0)),
    ("lime", Color::rgb(0, 255, 0)),
    ("navy", Color::rgb(0, 0, 128)),
    ("teal", Color::rgb(0, 128, 128)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("gold", Color::rgb(255, 215, 0)),
    ("indigo", Color::rgb(75, 0, 130)),
    ("violet", Color::rgb(238, 130, 238)),
    ("salmon", Color::rgb(250, 128, 114)),
    ("crimson", Color::rgb(220, 20, 60)),
    ("coral", Color::rgb(255, 127, 80)),
    ("tomato", Color::rgb(255, 99, 71)),
    ("orchid", Color::rgb(218, 112, 214)),
    ("turquoise", Color::rgb(64, 224, 208)),
    ("skyblue", Color::rgb(135, 206, 235)),
    ("steelblue", Color::rgb(70, 130, 180)),
    ("royalblue", Color::rgb(65, 105, 225)),
    ("darkblue", Color::rgb(0, 0, 139)),
    ("darkred", Color::rgb(139, 0, 0)),
    ("darkgreen", Color::rgb(0, 100, 0)),
    ("darkorange", Color::rgb(255, 140, 0)),
    ("forestgreen", Color::rgb(34, 139, 34)),
    ("limegreen", Color::rgb(50, 205, 50)),
    ("seagreen", Color::rgb(46, 139, 87)),
    ("chocolate", Color::rgb(210, 105, 30)),
    ("tan", Color::rgb(210, 180, 140)),
    ("khaki", Color::rgb(240, 230, 140)),
    ("beige", Color::rgb(245, 245, 220)),
    ("lavender", Color::rgb(230, 230, 250)),
];

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from unit-range components, rejecting values outside `[0, 1]`.
    pub fn from_unit(components: &[f64]) -> Result<Self, ColorError> {
        if !(3..=4).contains(&components.len()) {
            return Err(ColorError::TupleLength(components.len()));
        }
        let mut out = [255u8; 4];
        for (slot, &c) in out.iter_mut().zip(components) {
            if !(0.0..=1.0).contains(&c) {
                return Err(ColorError::OutOfRange(c));
            }
            *slot = (c * 255.0).round() as u8;
        }
        Ok(Self::rgba(out[0], out[1], out[2], out[3]))
    }

    /// Parse a colour spec: names, `tab:*`, `C0`..`C9`, hex, or a grey level such as `"0.5"`.
    pub fn parse(spec: &str) -> Result<Self, ColorError> {
        let s = spec.trim();
        let lower = s.to_ascii_lowercase();
        if lower == "none" {
            return Ok(Color::TRANSPARENT);
        }
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        if let Some(name) = lower.strip_prefix("tab:") {
            return TAB10_NAMES
                .iter()
                .position(|n| *n == name || (name == "grey" && *n == "gray"))
                .map(|i| TAB10[i])
                .ok_or_else(|| ColorError::UnknownName(s.to_string()));
        }
        if let Some(idx) = s.strip_prefix('C').and_then(|d| d.parse::<usize>().ok()) {
            return Ok(TAB10[idx % TAB10.len()]);
        }
        if let Ok(level) = s.parse::<f64>() {
            if !(0.0..=1.0).contains(&level) {
                return Err(ColorError::OutOfRange(level));
            }
            let v = (level * 255.0).round() as u8;
            return Ok(Color::rgb(v, v, v));
        }
        // single letters are case sensitive ("C" is not cyan)
        let key = if s.len() == 1 { s } else { lower.as_str() };
        NAMED
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, c)| *c)
            .ok_or_else(|| ColorError::UnknownName(s.to_string()))
    }

    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let hex = s.trim_start_matches('#');
        let invalid = || ColorError::InvalidHex(s.to_string());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v << 4 | v);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        let parsed = match hex.len() {
            3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
            4 => (nibble(0), nibble(1), nibble(2), nibble(3)),
            6 => (byte(0), byte(2), byte(4), Ok(255)),
            8 => (byte(0), byte(2), byte(4), byte(6)),
            _ => return Err(invalid()),
        };
        match parsed {
            (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Color::rgba(r, g, b, a)),
            _ => Err(invalid()),
        }
    }

    /// Same colour with its alpha multiplied by `alpha`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn to_skia(self) -> skia::Color {
        skia::Color::from_argb(self.a, self.r, self.g, self.b)
    }
}

impl From<Color> for skia::Color {
    fn from(c: Color) -> Self {
        c.to_skia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_letter_colours() {
        assert_eq!(Color::parse("k").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("Red").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("tab:orange").unwrap(), TAB10[1]);
        assert_eq!(Color::parse("C3").unwrap(), TAB10[3]);
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(Color::parse("#1f77b4").unwrap(), TAB10[0]);
        assert_eq!(Color::parse("#00000080").unwrap(), Color::rgba(0, 0, 0, 128));
        assert!(matches!(Color::parse("#12345"), Err(ColorError::InvalidHex(_))));
    }

    #[test]
    fn grey_levels_and_tuples() {
        assert_eq!(Color::parse("0.5").unwrap(), Color::rgb(128, 128, 128));
        assert!(Color::parse("1.5").is_err());
        assert_eq!(Color::from_unit(&[1.0, 0.0, 0.0]).unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_unit(&[1.0, 0.0]), Err(ColorError::TupleLength(2)));
    }

    #[test]
    fn unknown_names_are_errors() {
        assert_eq!(Color::parse("blurple"), Err(ColorError::UnknownName("blurple".into())));
    }
}
