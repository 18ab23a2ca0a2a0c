// File: crates/chart-core/src/grid.rs
// Summary: Tick placement and tick label formatting for linear and log axes.

use crate::axis::ScaleKind;

/// A tick position with its rendered label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Ticks for an axis spanning `a..b` (any order).
pub fn ticks(a: f64, b: f64, kind: ScaleKind, max_ticks: usize) -> Vec<Tick> {
    match kind {
        ScaleKind::Linear => {
            let (values, step) = nice_ticks(a, b, max_ticks);
            values.into_iter().map(|v| Tick { value: v, label: format_tick(v, step) }).collect()
        }
        ScaleKind::Log10 => log_ticks(a, b)
            .into_iter()
            .map(|v| Tick { value: v, label: format_decade(v) })
            .collect(),
    }
}

/// Round step sizes from the 1-2-5 family covering `a..b` with at most `max_ticks` ticks.
/// Returns the tick values (ascending) and the chosen step.
pub fn nice_ticks(a: f64, b: f64, max_ticks: usize) -> (Vec<f64>, f64) {
    let lo = a.min(b);
    let hi = a.max(b);
    if !lo.is_finite() || !hi.is_finite() {
        return (Vec::new(), 1.0);
    }
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        return (vec![lo], 1.0);
    }
    let max_ticks = max_ticks.max(2);
    let raw = span / (max_ticks - 1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|s| span / s <= (max_ticks - 1) as f64)
        .unwrap_or(10.0 * mag);

    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    let values = (first..=last)
        .map(|i| {
            let v = i as f64 * step;
            // snap float noise such as 0.30000000000000004
            if v.abs() < step * 1e-9 { 0.0 } else { v }
        })
        .collect();
    (values, step)
}

/// Powers of ten inside `a..b`; falls back to the bounds when no decade fits.
pub fn log_ticks(a: f64, b: f64) -> Vec<f64> {
    let lo = a.min(b).max(1e-300);
    let hi = a.max(b).max(1e-300);
    let first = (lo.log10() - 1e-9).ceil() as i32;
    let last = (hi.log10() + 1e-9).floor() as i32;
    if first > last {
        return vec![lo, hi];
    }
    let mut stride = 1;
    while (last - first) / stride > 8 {
        stride += 1;
    }
    (first..=last).step_by(stride as usize).map(|e| 10f64.powi(e)).collect()
}

/// Label for a linear tick: just enough decimals to distinguish neighbours.
pub fn format_tick(v: f64, step: f64) -> String {
    let abs = v.abs();
    if abs != 0.0 && (abs >= 1e6 || abs < 1e-4) {
        return format!("{v:.1e}");
    }
    let decimals = if step >= 1.0 { 0 } else { (-step.log10()).ceil().max(0.0) as usize };
    let s = format!("{v:.decimals$}");
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// Label a decade as `10` followed by a superscript exponent.
pub fn format_decade(v: f64) -> String {
    let exp = v.log10().round() as i32;
    if (10f64.powi(exp) - v).abs() > v.abs() * 1e-9 {
        return format!("{v}");
    }
    let sup: String = exp
        .to_string()
        .chars()
        .map(|c| match c {
            '-' => '⁻',
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            _ => '⁹',
        })
        .collect();
    format!("10{sup}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ticks_cover_unit_range() {
        let (v, step) = nice_ticks(0.0, 1.0, 6);
        assert_eq!(step, 0.2);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0], 0.0);
        assert!((v[5] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nice_ticks_accept_reversed_bounds() {
        let (a, _) = nice_ticks(10.0, 0.0, 6);
        let (b, _) = nice_ticks(0.0, 10.0, 6);
        assert_eq!(a, b);
    }

    #[test]
    fn log_ticks_are_decades() {
        assert_eq!(log_ticks(1.0, 1000.0), vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn tick_labels_use_step_precision() {
        assert_eq!(format_tick(0.2, 0.2), "0.2");
        assert_eq!(format_tick(4.0, 1.0), "4");
        assert_eq!(format_tick(-0.0, 0.5), "0.0");
        assert_eq!(format_decade(1000.0), "10³");
        assert_eq!(format_decade(0.01), "10⁻²");
    }
}
