//! Runtime value types for field access.
//!
//! [`Value`] is what a [`Row`](crate::Row) hands back for a field: a borrowed
//! view of a scalar. [`Cell`] is the owned counterpart used by map-backed rows.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime value of a field, borrowed from the source row.
///
/// # Example
///
/// ```
/// use rowseek::{Number, Value};
///
/// assert_eq!(Value::String("Alice").to_text().as_deref(), Some("Alice"));
/// assert_eq!(Value::Number(Number::F64(3.0)).to_text().as_deref(), Some("3"));
/// assert_eq!(Value::None.to_text(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Nested or structured value (arrays, objects). Never searched or ordered.
    Other,
    /// Field absent or null.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Canonical text of a scalar value.
    ///
    /// Returns `None` for null/absent and structured values; search and the
    /// field filter treat those as non-matching.
    pub fn to_text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(true) => Some(Cow::Borrowed("true")),
            Value::Bool(false) => Some(Cow::Borrowed("false")),
            Value::Other | Value::None => None,
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Comparisons between different variants go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Integer pairs compare exactly; only pairs involving a float go through
    /// `f64`. Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            (Number::U64(a), Number::I64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

// Integral floats print without a fraction; -0.0 prints as 0. Magnitudes
// from 1e21 up and below 1e-6 use exponent form with a signed exponent
// (`1e+21`, `1.5e-7`).
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) if n.is_nan() => f.write_str("NaN"),
            Number::F64(n) if n.is_infinite() => {
                f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::F64(n) if n == 0.0 => f.write_str("0"),
            Number::F64(n) if n.abs() >= 1e21 || n.abs() < 1e-6 => {
                let exp = format!("{n:e}");
                match exp.split_once('e') {
                    Some((mantissa, power)) if !power.starts_with('-') => {
                        write!(f, "{mantissa}e+{power}")
                    }
                    _ => f.write_str(&exp),
                }
            }
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

/// Owned scalar stored in map-backed rows.
///
/// Deserializes from plain JSON scalars: `null`, booleans, numbers and strings.
///
/// ```
/// use std::collections::BTreeMap;
/// use rowseek::Cell;
///
/// let row: BTreeMap<String, Cell> =
///     serde_json::from_str(r#"{"name": "Alice", "age": 31, "admin": false, "team": null}"#).unwrap();
/// assert_eq!(row["name"], Cell::from("Alice"));
/// assert_eq!(row["team"], Cell::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Missing value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    String(String),
}

impl Cell {
    /// Borrows this cell as a [`Value`].
    pub fn value(&self) -> Value<'_> {
        match self {
            Cell::Null => Value::None,
            Cell::Bool(b) => Value::Bool(*b),
            Cell::Number(n) => Value::Number(*n),
            Cell::String(s) => Value::String(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::String(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::String(s)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(n.into())
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n.into())
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Number(n.into())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n.into())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_extractors() {
        assert_eq!(Value::String("hello").as_str(), Some("hello"));
        assert_eq!(
            Value::Number(Number::I64(42)).as_number(),
            Some(Number::I64(42))
        );
        assert_eq!(Value::Bool(true).as_bool(), Some(true));

        // Wrong type returns None
        assert_eq!(Value::String("test").as_number(), None);
        assert_eq!(Value::Number(Number::I64(1)).as_str(), None);
        assert!(Value::None.is_none());
        assert!(!Value::Other.is_none());
    }

    #[test]
    fn text_of_scalars() {
        assert_eq!(Value::Bool(true).to_text().as_deref(), Some("true"));
        assert_eq!(Value::Bool(false).to_text().as_deref(), Some("false"));
        assert_eq!(
            Value::Number(Number::I64(-7)).to_text().as_deref(),
            Some("-7")
        );
        assert_eq!(
            Value::Number(Number::U64(7)).to_text().as_deref(),
            Some("7")
        );
        assert_eq!(Value::Other.to_text(), None);
        assert_eq!(Value::None.to_text(), None);
    }

    #[test]
    fn float_text_is_canonical() {
        assert_eq!(Number::F64(3.0).to_string(), "3");
        assert_eq!(Number::F64(1.5).to_string(), "1.5");
        assert_eq!(Number::F64(-0.0).to_string(), "0");
        assert_eq!(Number::F64(f64::NAN).to_string(), "NaN");
        assert_eq!(Number::F64(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Number::F64(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn extreme_floats_use_exponent_form() {
        assert_eq!(Number::F64(1e21).to_string(), "1e+21");
        assert_eq!(Number::F64(-2.5e30).to_string(), "-2.5e+30");
        assert_eq!(Number::F64(1e-7).to_string(), "1e-7");
        assert_eq!(Number::F64(-1.5e-7).to_string(), "-1.5e-7");
        assert_eq!(Number::F64(1e20).to_string(), "100000000000000000000");
        assert_eq!(Number::F64(1e-6).to_string(), "0.000001");
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::U64(10).compare(Number::F64(5.5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn large_integers_compare_exactly() {
        let max = Number::I64(i64::MAX);
        let above = Number::U64(i64::MAX as u64 + 1);
        assert_eq!(max.compare(above), Some(Ordering::Less));
        assert_eq!(above.compare(max), Some(Ordering::Greater));
        assert_eq!(
            Number::I64(-1).compare(Number::U64(u64::MAX)),
            Some(Ordering::Less)
        );
        assert_eq!(Number::U64(7).compare(Number::I64(7)), Some(Ordering::Equal));
    }

    #[test]
    fn number_nan_comparison() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert_eq!(Number::F64(1.0).compare(Number::F64(f64::NAN)), None);
    }

    #[test]
    fn cell_deserializes_scalars() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[null, true, 3, -4, 2.5, "x"]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::Null,
                Cell::Bool(true),
                Cell::Number(Number::I64(3)),
                Cell::Number(Number::I64(-4)),
                Cell::Number(Number::F64(2.5)),
                Cell::String("x".into()),
            ]
        );
    }

    #[test]
    fn cell_from_option() {
        assert_eq!(Cell::from(None::<&str>), Cell::Null);
        assert_eq!(Cell::from(Some(5i64)), Cell::Number(Number::I64(5)));
        assert_eq!(Cell::from("a").value(), Value::String("a"));
    }
}
