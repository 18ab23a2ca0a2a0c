// File: crates/chart-xml/src/array.rs
// Summary: Text-to-number array parsers for `data`, `data2D` and tuple attributes.

use log::warn;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArrayError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' is too short to be a tuple")]
    TooShort(String),
    #[error("expected {expected} values, found {found}")]
    Length { expected: usize, found: usize },
}

fn number(token: &str) -> Result<f64, ArrayError> {
    let t = token.trim();
    let bad = || ArrayError::NotANumber(t.to_string());
    if !t.contains('_') {
        return t.parse::<f64>().map_err(|_| bad());
    }
    // `_` is a digit separator only between two digits (`1_000`)
    let b = t.as_bytes();
    let separated = b.iter().enumerate().all(|(i, &c)| {
        c != b'_' || (i > 0 && i + 1 < b.len() && b[i - 1].is_ascii_digit() && b[i + 1].is_ascii_digit())
    });
    if !separated {
        return Err(bad());
    }
    t.replace('_', "").parse::<f64>().map_err(|_| bad())
}

/// Strict comma-separated parse; the first bad token is the error.
pub fn try_parse_1d(text: &str) -> Result<Vec<f64>, ArrayError> {
    text.split(',').map(number).collect()
}

/// Comma-separated numbers. Any token that is not a number empties the whole array.
pub fn parse_1d(text: &str) -> Vec<f64> {
    match try_parse_1d(text) {
        Ok(values) => values,
        Err(e) => {
            warn!("array degraded to empty: {e}");
            Vec::new()
        }
    }
}

/// Rows separated by `;`, each parsed with [`parse_1d`]. Rows may differ in length.
pub fn parse_2d(text: &str) -> Vec<Vec<f64>> {
    text.split(';').map(parse_1d).collect()
}

pub fn try_parse_2d(text: &str) -> Result<Vec<Vec<f64>>, ArrayError> {
    text.split(';').map(try_parse_1d).collect()
}

/// Drop the first and last character (the brackets) and parse the rest as comma-separated numbers.
pub fn parse_tuple(text: &str) -> Result<Vec<f64>, ArrayError> {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    if chars.next().is_none() || chars.next_back().is_none() {
        return Err(ArrayError::TooShort(trimmed.to_string()));
    }
    try_parse_1d(chars.as_str())
}

/// [`parse_tuple`] that also checks the number of values.
pub fn parse_tuple_n(text: &str, expected: usize) -> Result<Vec<f64>, ArrayError> {
    let values = parse_tuple(text)?;
    if values.len() != expected {
        return Err(ArrayError::Length { expected, found: values.len() });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_d_keeps_count_and_values() {
        assert_eq!(parse_1d("1,2.5,-3e2"), vec![1.0, 2.5, -300.0]);
        // writers pad the element text
        assert_eq!(parse_1d(" 4,5,6 "), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn one_d_degrades_to_empty() {
        assert!(parse_1d("1,x,3").is_empty());
        assert!(parse_1d("").is_empty());
        assert!(parse_1d("1,,2").is_empty());
        assert_eq!(try_parse_1d("1,x"), Err(ArrayError::NotANumber("x".into())));
    }

    #[test]
    fn underscores_separate_digits() {
        assert_eq!(try_parse_1d("1_000, 2_5.0_5, 1e1_0").unwrap(), vec![1000.0, 25.05, 1e10]);
        for bad in ["_1", "1_", "1__0", "1_.5", "1._5"] {
            assert!(try_parse_1d(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn two_d_rows_follow_one_d_rule() {
        let rows = parse_2d("1,2;3,4,5;a");
        assert_eq!(rows, vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0], vec![]]);
        assert!(try_parse_2d("1,2;a").is_err());
    }

    #[test]
    fn tuple_strips_brackets() {
        assert_eq!(parse_tuple("(1.5,2.5)").unwrap(), vec![1.5, 2.5]);
        assert_eq!(parse_tuple("[0, 10, 0, 5]").unwrap(), vec![0.0, 10.0, 0.0, 5.0]);
        assert!(matches!(parse_tuple("("), Err(ArrayError::TooShort(_))));
        assert!(parse_tuple("()").is_err());
        assert_eq!(
            parse_tuple_n("(1,2,3)", 4),
            Err(ArrayError::Length { expected: 4, found: 3 })
        );
    }
}
