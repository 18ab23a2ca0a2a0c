// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (figure size, resolution, margins).

/// Default figure width in inches.
pub const FIG_WIDTH_IN: f32 = 8.0;
/// Default figure height in inches.
pub const FIG_HEIGHT_IN: f32 = 6.0;
/// Resolution used for on-screen rendering.
pub const SCREEN_DPI: f32 = 100.0;
/// Base font size in points.
pub const FONT_SIZE_PT: f32 = 15.0;
/// Typographic points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Figure margins around the axes box, in points.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(80, 28, 34, 58)
    }
}

/// Pixel size of a figure of `inches` at `dpi`, never below one pixel.
pub fn pixels(inches: f32, dpi: f32) -> i32 {
    ((inches * dpi).round() as i32).max(1)
}
