use std::fmt;

use log::debug;
use serde::Serialize;

use super::attributes::{AttributeValue, Attributes};
use super::error::ContainerError;
use super::series::Series;

// ---------------------------------------------------------------------------
// ValueContainer – x, y and y error for one measurement
// ---------------------------------------------------------------------------

/// Three parallel numeric sequences: independent variable `x`, dependent
/// variable `y` and its uncertainty `yerr`.
///
/// All three have the same length, at least one. The values are fixed once
/// built; auxiliary attributes can be attached afterwards without touching
/// them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueContainer {
    pub(crate) x: Series,
    pub(crate) y: Series,
    pub(crate) yerr: Series,
    pub(crate) attributes: Attributes,
}

impl ValueContainer {
    /// Build a container from scalars or sequences.
    ///
    /// A scalar becomes a one-element sequence. Fails when an input is
    /// empty or when the three lengths differ.
    pub fn new(
        x: impl Into<Series>,
        y: impl Into<Series>,
        yerr: impl Into<Series>,
    ) -> Result<Self, ContainerError> {
        Self::from_series(x.into(), y.into(), yerr.into())
    }

    /// Build a container from text, e.g. `"1 2 3"` or `"[1, 2, 3]"`.
    pub fn parse(x: &str, y: &str, yerr: &str) -> Result<Self, ContainerError> {
        let x: Series = x.parse().map_err(|e: ContainerError| e.for_field("x"))?;
        let y: Series = y.parse().map_err(|e: ContainerError| e.for_field("y"))?;
        let yerr: Series = yerr.parse().map_err(|e: ContainerError| e.for_field("yerr"))?;
        Self::from_series(x, y, yerr)
    }

    pub(crate) fn from_series(x: Series, y: Series, yerr: Series) -> Result<Self, ContainerError> {
        for (field, series) in [("x", &x), ("y", &y), ("yerr", &yerr)] {
            if series.is_empty() {
                return Err(ContainerError::coercion(field, "empty sequence"));
            }
        }
        if x.len() != y.len() || x.len() != yerr.len() {
            return Err(ContainerError::LengthMismatch {
                x: x.len(),
                y: y.len(),
                yerr: yerr.len(),
            });
        }

        debug!("built container with {} points", x.len());
        Ok(ValueContainer {
            x,
            y,
            yerr,
            attributes: Attributes::new(),
        })
    }

    pub fn x(&self) -> &Series {
        &self.x
    }

    pub fn y(&self) -> &Series {
        &self.y
    }

    pub fn yerr(&self) -> &Series {
        &self.yerr
    }

    /// Number of points (shared length of `x`, `y` and `yerr`).
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`: a container holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Split into `(x, y, yerr)`, dropping attributes.
    pub fn into_parts(self) -> (Series, Series, Series) {
        (self.x, self.y, self.yerr)
    }

    // -- Attributes --

    /// Attach or replace an auxiliary label. Returns the previous value.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.attributes.insert(key.into(), value.into())
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes.remove(key)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Three lines labelled `X`, `Y` and `Y error`. Attributes are not shown.
impl fmt::Display for ValueContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "X: {}", self.x)?;
        writeln!(f, "Y: {}", self.y)?;
        write!(f, "Y error: {}", self.yerr)
    }
}
