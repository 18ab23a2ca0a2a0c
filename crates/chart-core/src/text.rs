// File: crates/chart-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout, with anchored and rotated drawing.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Horizontal anchor of a text run relative to the given point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text run relative to the given point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["DejaVu Sans", "Helvetica", "Arial", "Segoe UI", "Roboto", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color);
        builder.push_style(&style);
        builder.add_text(strip_math(text));
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0));
        (p.longest_line(), p.height())
    }

    /// Draw `text` anchored at `(x, y)`.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, h: HAlign, v: VAlign) {
        let mut p = self.layout(text, size, color);
        let (w, ht) = (p.longest_line(), p.height());
        let left = match h {
            HAlign::Left => x,
            HAlign::Center => x - w * 0.5,
            HAlign::Right => x - w,
        };
        let top = match v {
            VAlign::Top => y,
            VAlign::Middle => y - ht * 0.5,
            VAlign::Bottom => y - ht,
        };
        p.paint(canvas, (left, top));
    }

    /// Draw `text` rotated 90° counter-clockwise, centred on `(x, y)`.
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        canvas.save();
        canvas.translate((x, y));
        canvas.rotate(-90.0, None);
        self.draw(canvas, text, 0.0, 0.0, size, color, HAlign::Center, VAlign::Middle);
        canvas.restore();
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop `$` math delimiters and the backslash of TeX commands (`$22 \log n$` → `22 log n`).
pub fn strip_math(text: &str) -> String {
    if !text.contains('$') {
        return text.to_string();
    }
    text.replace('$', "").replace('\\', "")
}

#[cfg(test)]
mod tests {
    use super::strip_math;

    #[test]
    fn math_delimiters_are_removed() {
        assert_eq!(strip_math(r"$22 \log n$"), "22 log n");
        assert_eq!(strip_math(r"a\b"), r"a\b");
    }
}
