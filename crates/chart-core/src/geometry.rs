// File: crates/chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel-space layout.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Shrink to `width` x `height` keeping the centre.
    pub fn shrink_centered(&self, width: f32, height: f32) -> Self {
        let (cx, cy) = self.center();
        Self::from_ltrb(cx - width * 0.5, cy - height * 0.5, cx + width * 0.5, cy + height * 0.5)
    }

    pub fn to_skia(&self) -> skia::Rect {
        skia::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}
