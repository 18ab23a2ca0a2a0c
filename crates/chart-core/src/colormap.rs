// File: crates/chart-core/src/colormap.rs
// Summary: Colormaps for images and colour-mapped scatters, plus linear value normalisation.

use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColormapKind {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Gray,
    Hot,
    Cool,
    Jet,
    Coolwarm,
    RdBu,
}

/// A named colormap, optionally reversed (`_r` suffix).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Colormap {
    pub kind: ColormapKind,
    pub reversed: bool,
}

type Anchor = (f32, f32, f32);

// Samples at t = 0, 1/8, ..., 1.
const VIRIDIS: [Anchor; 9] = [
    (0.267004, 0.004874, 0.329415),
    (0.282623, 0.140926, 0.457517),
    (0.229739, 0.322361, 0.545706),
    (0.172719, 0.448791, 0.557885),
    (0.127568, 0.566949, 0.550556),
    (0.157851, 0.683765, 0.501686),
    (0.369214, 0.788888, 0.382914),
    (0.678489, 0.863742, 0.189503),
    (0.993248, 0.906157, 0.143936),
];

const PLASMA: [Anchor; 9] = [
    (0.050383, 0.029803, 0.527975),
    (0.254627, 0.013882, 0.615419),
    (0.417642, 0.000564, 0.658390),
    (0.562738, 0.051545, 0.641509),
    (0.692840, 0.165141, 0.564522),
    (0.798216, 0.280197, 0.469538),
    (0.881443, 0.392529, 0.383229),
    (0.949217, 0.517763, 0.295662),
    (0.940015, 0.975158, 0.131326),
];

const INFERNO: [Anchor; 9] = [
    (0.001462, 0.000466, 0.013866),
    (0.087411, 0.044556, 0.224813),
    (0.258234, 0.038571, 0.406485),
    (0.416331, 0.090203, 0.432943),
    (0.578304, 0.148039, 0.404411),
    (0.735683, 0.215906, 0.330245),
    (0.865006, 0.316822, 0.226055),
    (0.954506, 0.468744, 0.099874),
    (0.988362, 0.998364, 0.644924),
];

const MAGMA: [Anchor; 9] = [
    (0.001462, 0.000466, 0.013866),
    (0.078815, 0.054184, 0.211667),
    (0.232077, 0.059889, 0.437695),
    (0.390384, 0.100379, 0.501864),
    (0.550287, 0.161158, 0.505719),
    (0.716387, 0.214982, 0.475290),
    (0.868793, 0.287728, 0.409303),
    (0.967671, 0.439703, 0.359810),
    (0.987053, 0.991438, 0.749504),
];

const COOLWARM: [Anchor; 5] = [
    (0.2298, 0.2987, 0.7537),
    (0.5543, 0.6901, 0.9955),
    (0.8654, 0.8654, 0.8654),
    (0.9567, 0.5980, 0.4773),
    (0.7057, 0.0156, 0.1502),
];

const RDBU: [Anchor; 5] = [
    (0.4039, 0.0000, 0.1216),
    (0.8392, 0.3765, 0.3020),
    (0.9686, 0.9686, 0.9686),
    (0.2627, 0.5765, 0.7647),
    (0.0196, 0.1882, 0.3804),
];

impl Colormap {
    pub const fn new(kind: ColormapKind) -> Self {
        Self { kind, reversed: false }
    }

    /// Look up a colormap by its usual name; `name_r` gives the reversed map.
    pub fn from_name(name: &str) -> Option<Self> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(b) => (b, true),
            None => (name, false),
        };
        let (kind, flip) = match base.to_ascii_lowercase().as_str() {
            "viridis" => (ColormapKind::Viridis, false),
            "plasma" => (ColormapKind::Plasma, false),
            "inferno" => (ColormapKind::Inferno, false),
            "magma" => (ColormapKind::Magma, false),
            "gray" | "grey" => (ColormapKind::Gray, false),
            // white to black
            "greys" => (ColormapKind::Gray, true),
            "hot" => (ColormapKind::Hot, false),
            "cool" => (ColormapKind::Cool, false),
            "jet" => (ColormapKind::Jet, false),
            "coolwarm" => (ColormapKind::Coolwarm, false),
            "rdbu" => (ColormapKind::RdBu, false),
            _ => return None,
        };
        Some(Self { kind, reversed: reversed != flip })
    }

    /// Colour at `t` in `[0, 1]`; values outside are clamped, NaN is transparent.
    pub fn sample(&self, t: f64) -> Color {
        if t.is_nan() {
            return Color::TRANSPARENT;
        }
        let mut t = t.clamp(0.0, 1.0) as f32;
        if self.reversed {
            t = 1.0 - t;
        }
        let (r, g, b) = match self.kind {
            ColormapKind::Viridis => interpolate(&VIRIDIS, t),
            ColormapKind::Plasma => interpolate(&PLASMA, t),
            ColormapKind::Inferno => interpolate(&INFERNO, t),
            ColormapKind::Magma => interpolate(&MAGMA, t),
            ColormapKind::Coolwarm => interpolate(&COOLWARM, t),
            ColormapKind::RdBu => interpolate(&RDBU, t),
            ColormapKind::Gray => (t, t, t),
            ColormapKind::Hot => {
                if t < 1.0 / 3.0 {
                    (3.0 * t, 0.0, 0.0)
                } else if t < 2.0 / 3.0 {
                    (1.0, 3.0 * t - 1.0, 0.0)
                } else {
                    (1.0, 1.0, 3.0 * t - 2.0)
                }
            }
            ColormapKind::Cool => (t, 1.0 - t, 1.0),
            ColormapKind::Jet => (
                (1.5 - 4.0 * (t - 0.75).abs()).clamp(0.0, 1.0),
                (1.5 - 4.0 * (t - 0.5).abs()).clamp(0.0, 1.0),
                (1.5 - 4.0 * (t - 0.25).abs()).clamp(0.0, 1.0),
            ),
        };
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::rgb(to_u8(r), to_u8(g), to_u8(b))
    }
}

fn interpolate(anchors: &[Anchor], t: f32) -> Anchor {
    let last = anchors.len() - 1;
    let pos = t * last as f32;
    let i = (pos.floor() as usize).min(last - 1);
    let f = pos - i as f32;
    let (a, b) = (anchors[i], anchors[i + 1]);
    (a.0 + (b.0 - a.0) * f, a.1 + (b.1 - a.1) * f, a.2 + (b.2 - a.2) * f)
}

/// Linear mapping of data values onto `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Range of the finite values in `values`; `None` when there are none.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<Self> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in values {
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        (lo <= hi).then(|| Self::new(lo, hi))
    }

    /// Position of `v` inside the range; a collapsed range maps everything to 0.
    pub fn apply(&self, v: f64) -> f64 {
        if !v.is_finite() {
            return f64::NAN;
        }
        let span = self.vmax - self.vmin;
        if span.abs() < f64::EPSILON {
            return 0.0;
        }
        (v - self.vmin) / span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints() {
        let cm = Colormap::default();
        assert_eq!(cm.sample(0.0), Color::rgb(68, 1, 84));
        assert_eq!(cm.sample(1.0), Color::rgb(253, 231, 37));
    }

    #[test]
    fn reversed_map_swaps_ends() {
        let cm = Colormap::from_name("viridis_r").unwrap();
        assert_eq!(cm.sample(0.0), Colormap::default().sample(1.0));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(Colormap::from_name("rainbow-unicorn").is_none());
        let greys_r = Colormap::from_name("Greys_r").unwrap();
        assert_eq!(greys_r, Colormap::new(ColormapKind::Gray));
    }

    #[test]
    fn normalize_maps_range_to_unit() {
        let n = Normalize::new(10.0, 20.0);
        assert_eq!(n.apply(15.0), 0.5);
        assert_eq!(Normalize::new(1.0, 1.0).apply(1.0), 0.0);
        let auto = Normalize::from_values(&[3.0, f64::NAN, -1.0]).unwrap();
        assert_eq!((auto.vmin, auto.vmax), (-1.0, 3.0));
    }
}
