use std::fmt;
use std::ops::{Div, Index, Mul};
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::error::ContainerError;

// ---------------------------------------------------------------------------
// Series – an ordered run of f64 values
// ---------------------------------------------------------------------------

/// An ordered, fixed-length sequence of `f64` values.
///
/// Every container input is coerced into a `Series`: a single number
/// becomes a one-element series, a sequence is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series(Vec<f64>);

impl Series {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Arithmetic mean over all elements.
    ///
    /// Uses Kahan compensated summation. An infinite element or an
    /// overflowing sum gives `±inf`, a `NaN` element (or `inf + -inf`)
    /// gives `NaN`. An empty series has a `NaN` mean.
    pub fn mean(&self) -> f64 {
        if self.0.is_empty() {
            return f64::NAN;
        }
        kahan_sum(&self.0) / self.0.len() as f64
    }

    /// Largest element, ignoring `NaN`s. `None` when empty.
    pub fn max(&self) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Smallest element, ignoring `NaN`s. `None` when empty.
    pub fn min(&self) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.iter().cloned().fold(f64::INFINITY, f64::min))
    }

    /// A series of ones with the same length.
    pub fn ones_like(&self) -> Series {
        Series(vec![1.0; self.0.len()])
    }

    /// Whether every element is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// Kahan compensated sum (Neumaier variant).
pub(crate) fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    // The compensation term is `inf - inf` once the running sum overflows.
    if !sum.is_finite() {
        return sum;
    }
    sum + c
}

// -- Element-wise scalar arithmetic --

impl Mul<f64> for &Series {
    type Output = Series;

    fn mul(self, rhs: f64) -> Series {
        Series(self.0.iter().map(|v| v * rhs).collect())
    }
}

impl Mul<f64> for Series {
    type Output = Series;

    fn mul(self, rhs: f64) -> Series {
        &self * rhs
    }
}

impl Div<f64> for &Series {
    type Output = Series;

    fn div(self, rhs: f64) -> Series {
        Series(self.0.iter().map(|v| v / rhs).collect())
    }
}

impl Div<f64> for Series {
    type Output = Series;

    fn div(self, rhs: f64) -> Series {
        &self / rhs
    }
}

impl Index<usize> for Series {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_element(f, *v)?;
        }
        write!(f, "]")
    }
}

/// Plain notation for everyday magnitudes, exponent notation outside
/// `[1e-4, 1e16)` so huge or tiny values stay short.
fn write_element(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    let magnitude = v.abs();
    if v.is_finite() && v != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        write!(f, "{v:e}")
    } else {
        write!(f, "{v}")
    }
}

// ---------------------------------------------------------------------------
// Coercion: scalars and sequences → Series
// ---------------------------------------------------------------------------

impl From<f64> for Series {
    fn from(value: f64) -> Self {
        Series(vec![value])
    }
}

impl From<i32> for Series {
    fn from(value: i32) -> Self {
        Series(vec![value as f64])
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Series(values)
    }
}

impl From<&[f64]> for Series {
    fn from(values: &[f64]) -> Self {
        Series(values.to_vec())
    }
}

impl From<&Vec<f64>> for Series {
    fn from(values: &Vec<f64>) -> Self {
        Series(values.clone())
    }
}

impl<const N: usize> From<[f64; N]> for Series {
    fn from(values: [f64; N]) -> Self {
        Series(values.to_vec())
    }
}

impl From<Vec<i32>> for Series {
    fn from(values: Vec<i32>) -> Self {
        Series(values.into_iter().map(f64::from).collect())
    }
}

impl From<&[i32]> for Series {
    fn from(values: &[i32]) -> Self {
        Series(values.iter().map(|&v| f64::from(v)).collect())
    }
}

impl<const N: usize> From<[i32; N]> for Series {
    fn from(values: [i32; N]) -> Self {
        Series(values.iter().map(|&v| f64::from(v)).collect())
    }
}

impl From<&Series> for Series {
    fn from(series: &Series) -> Self {
        series.clone()
    }
}

/// A JSON number becomes a one-element series, a JSON array of numbers a
/// series of the same length. Anything else is a coercion error.
impl TryFrom<&JsonValue> for Series {
    type Error = ContainerError;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Number(n) => n
                .as_f64()
                .map(Series::from)
                .ok_or_else(|| ContainerError::coercion("value", format!("'{n}' is not an f64"))),
            JsonValue::Array(items) => items
                .iter()
                .enumerate()
                .map(|(j, v)| {
                    v.as_f64().ok_or_else(|| {
                        ContainerError::coercion("value", format!("element {j} ({v}) is not a number"))
                    })
                })
                .collect::<Result<Vec<f64>, _>>()
                .map(Series),
            other => Err(ContainerError::coercion(
                "value",
                format!("expected a number or an array of numbers, got {other}"),
            )),
        }
    }
}

/// Parses `"4.5"`, `"1 2 3"`, `"1, 2, 3"` or `"[1, 2, 3]"`.
impl FromStr for Series {
    type Err = ContainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(trimmed);

        inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .enumerate()
            .map(|(j, tok)| {
                tok.parse::<f64>().map_err(|_| {
                    ContainerError::coercion("value", format!("element {j} ('{tok}') is not a number"))
                })
            })
            .collect::<Result<Vec<f64>, _>>()
            .map(Series)
    }
}
