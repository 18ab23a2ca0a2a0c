// File: crates/chart-core/src/marker.rs
// Summary: Point marker shapes and their Skia paths.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    None,
    Circle,
    Point,
    Pixel,
    Square,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Plus,
    Cross,
    Star,
    Diamond,
    ThinDiamond,
    Pentagon,
    Hexagon,
    VLine,
    HLine,
}

impl Marker {
    pub fn from_name(name: &str) -> Option<Self> {
        let m = match name {
            "" | " " | "None" | "none" => Marker::None,
            "o" => Marker::Circle,
            "." => Marker::Point,
            "," => Marker::Pixel,
            "s" => Marker::Square,
            "^" => Marker::TriangleUp,
            "v" => Marker::TriangleDown,
            "<" => Marker::TriangleLeft,
            ">" => Marker::TriangleRight,
            "+" => Marker::Plus,
            "x" => Marker::Cross,
            "*" => Marker::Star,
            "D" => Marker::Diamond,
            "d" => Marker::ThinDiamond,
            "p" => Marker::Pentagon,
            "h" | "H" => Marker::Hexagon,
            "|" => Marker::VLine,
            "_" => Marker::HLine,
            _ => return None,
        };
        Some(m)
    }

    /// Line-only markers are stroked with the fill colour instead of filled.
    pub fn is_stroked(&self) -> bool {
        matches!(self, Marker::Plus | Marker::Cross | Marker::VLine | Marker::HLine)
    }

    /// Path of the marker centred on `(cx, cy)` with nominal diameter `size` pixels.
    pub fn path(&self, cx: f32, cy: f32, size: f32) -> Option<skia::Path> {
        let r = size * 0.5;
        let mut path = skia::Path::new();
        match self {
            Marker::None => return None,
            Marker::Circle => {
                path.add_circle((cx, cy), r, None);
            }
            Marker::Point => {
                path.add_circle((cx, cy), r * 0.5, None);
            }
            Marker::Pixel => {
                path.add_rect(skia::Rect::from_xywh(cx - 0.5, cy - 0.5, 1.0, 1.0), None);
            }
            Marker::Square => {
                let h = r * 0.9;
                path.add_rect(skia::Rect::from_ltrb(cx - h, cy - h, cx + h, cy + h), None);
            }
            Marker::TriangleUp => polygon(&mut path, cx, cy, r, 3, -90.0),
            Marker::TriangleDown => polygon(&mut path, cx, cy, r, 3, 90.0),
            Marker::TriangleLeft => polygon(&mut path, cx, cy, r, 3, 180.0),
            Marker::TriangleRight => polygon(&mut path, cx, cy, r, 3, 0.0),
            Marker::Diamond => polygon(&mut path, cx, cy, r, 4, -90.0),
            Marker::ThinDiamond => {
                path.move_to((cx, cy - r));
                path.line_to((cx + r * 0.6, cy));
                path.line_to((cx, cy + r));
                path.line_to((cx - r * 0.6, cy));
                path.close();
            }
            Marker::Pentagon => polygon(&mut path, cx, cy, r, 5, -90.0),
            Marker::Hexagon => polygon(&mut path, cx, cy, r, 6, -90.0),
            Marker::Star => {
                for i in 0..10 {
                    let rad = if i % 2 == 0 { r } else { r * 0.4 };
                    let a = (-90.0 + 36.0 * i as f32).to_radians();
                    let p = (cx + rad * a.cos(), cy + rad * a.sin());
                    if i == 0 { path.move_to(p); } else { path.line_to(p); }
                }
                path.close();
            }
            Marker::Plus => {
                path.move_to((cx - r, cy));
                path.line_to((cx + r, cy));
                path.move_to((cx, cy - r));
                path.line_to((cx, cy + r));
            }
            Marker::Cross => {
                let d = r * std::f32::consts::FRAC_1_SQRT_2;
                path.move_to((cx - d, cy - d));
                path.line_to((cx + d, cy + d));
                path.move_to((cx - d, cy + d));
                path.line_to((cx + d, cy - d));
            }
            Marker::VLine => {
                path.move_to((cx, cy - r));
                path.line_to((cx, cy + r));
            }
            Marker::HLine => {
                path.move_to((cx - r, cy));
                path.line_to((cx + r, cy));
            }
        }
        Some(path)
    }

    /// Draw the marker: filled shapes get `fill` then the optional `edge`, line shapes use `fill` as stroke.
    pub fn draw(&self, canvas: &skia::Canvas, cx: f32, cy: f32, size: f32, fill: &skia::Paint, edge: Option<&skia::Paint>) {
        let Some(path) = self.path(cx, cy, size) else { return };
        if self.is_stroked() {
            let mut stroke = fill.clone();
            stroke.set_style(skia::paint::Style::Stroke);
            stroke.set_stroke_width((size * 0.15).max(1.0));
            canvas.draw_path(&path, &stroke);
            return;
        }
        canvas.draw_path(&path, fill);
        if let Some(edge) = edge {
            canvas.draw_path(&path, edge);
        }
    }
}

fn polygon(path: &mut skia::Path, cx: f32, cy: f32, r: f32, sides: usize, start_deg: f32) {
    let step = 360.0 / sides as f32;
    for i in 0..sides {
        let a = (start_deg + step * i as f32).to_radians();
        let p = (cx + r * a.cos(), cy + r * a.sin());
        if i == 0 { path.move_to(p); } else { path.line_to(p); }
    }
    path.close();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_names() {
        assert_eq!(Marker::from_name("o"), Some(Marker::Circle));
        assert_eq!(Marker::from_name("^"), Some(Marker::TriangleUp));
        assert_eq!(Marker::from_name("None"), Some(Marker::None));
        assert_eq!(Marker::from_name("?"), None);
    }

    #[test]
    fn none_marker_has_no_path() {
        assert!(Marker::None.path(0.0, 0.0, 6.0).is_none());
        assert!(Marker::Circle.path(0.0, 0.0, 6.0).is_some());
    }
}
