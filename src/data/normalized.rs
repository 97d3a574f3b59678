use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use super::attributes::{AttributeValue, Attributes};
use super::container::ValueContainer;
use super::error::ContainerError;
use super::series::Series;

// ---------------------------------------------------------------------------
// NormalizedContainer – y and y error divided by mean(y)
// ---------------------------------------------------------------------------

/// A [`ValueContainer`] whose `y` and `yerr` were divided by the mean of
/// `y` at construction.
///
/// The pre-normalization values are kept as independent copies in
/// `y_orig` / `yerr_orig`, and `y == y_orig / scale`,
/// `yerr == yerr_orig / scale` with `scale == mean(y_orig)`.
///
/// A zero mean is not rejected: the division follows IEEE 754, so `0/0`
/// gives `NaN` and any other value gives `±inf`. Use
/// [`NormalizedContainer::is_finite`] to check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedContainer {
    #[serde(flatten)]
    inner: ValueContainer,
    y_orig: Series,
    yerr_orig: Series,
    scale: f64,
}

impl NormalizedContainer {
    /// Build and normalize in one step. Accepts the same inputs as
    /// [`ValueContainer::new`] and fails the same way.
    pub fn new(
        x: impl Into<Series>,
        y: impl Into<Series>,
        yerr: impl Into<Series>,
    ) -> Result<Self, ContainerError> {
        ValueContainer::new(x, y, yerr).map(Self::from_container)
    }

    /// Normalize an existing container. Attributes are carried over.
    pub fn from_container(container: ValueContainer) -> Self {
        let ValueContainer {
            x,
            y: y_orig,
            yerr: yerr_orig,
            attributes,
        } = container;

        let scale = y_orig.mean();
        if scale == 0.0 {
            warn!("mean of y is zero, normalized values are not finite");
        } else if !scale.is_finite() {
            warn!("mean of y is {scale}, normalized values are not finite");
        } else {
            debug!("normalizing {} points by mean {scale}", y_orig.len());
        }

        let inner = ValueContainer {
            x,
            y: &y_orig / scale,
            yerr: &yerr_orig / scale,
            attributes,
        };

        NormalizedContainer {
            inner,
            y_orig,
            yerr_orig,
            scale,
        }
    }

    /// Give back the un-normalized container, attributes included.
    pub fn denormalize(self) -> ValueContainer {
        ValueContainer {
            y: self.y_orig,
            yerr: self.yerr_orig,
            ..self.inner
        }
    }

    pub fn x(&self) -> &Series {
        self.inner.x()
    }

    /// Normalized `y`.
    pub fn y(&self) -> &Series {
        self.inner.y()
    }

    /// Normalized `yerr`.
    pub fn yerr(&self) -> &Series {
        self.inner.yerr()
    }

    pub fn y_orig(&self) -> &Series {
        &self.y_orig
    }

    pub fn yerr_orig(&self) -> &Series {
        &self.yerr_orig
    }

    /// The divisor used, `mean(y_orig)`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether every normalized `y` and `yerr` value is finite.
    pub fn is_finite(&self) -> bool {
        self.inner.y().is_finite() && self.inner.yerr().is_finite()
    }

    pub fn as_container(&self) -> &ValueContainer {
        &self.inner
    }

    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.inner.set_attribute(key, value)
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.inner.attribute(key)
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<AttributeValue> {
        self.inner.remove_attribute(key)
    }

    pub fn attributes(&self) -> &Attributes {
        self.inner.attributes()
    }
}

impl AsRef<ValueContainer> for NormalizedContainer {
    fn as_ref(&self) -> &ValueContainer {
        &self.inner
    }
}

/// Same layout as [`ValueContainer`], showing the normalized values.
impl fmt::Display for NormalizedContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Three equal-length vectors of finite values.
    fn columns(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
        (1..=max_len).prop_flat_map(|n| {
            let col = || proptest::collection::vec(-1e6..1e6_f64, n);
            (col(), col(), col())
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn scalars_become_single_elements(x in -1e6..1e6_f64, y in -1e6..1e6_f64, e in 0.0..1e3_f64) {
            let data = ValueContainer::new(x, y, e).unwrap();
            prop_assert_eq!(data.x().as_slice(), &[x]);
            prop_assert_eq!(data.y().as_slice(), &[y]);
            prop_assert_eq!(data.yerr().as_slice(), &[e]);
        }

        #[test]
        fn sequences_are_preserved((x, y, e) in columns(32)) {
            let data = ValueContainer::new(x.clone(), y.clone(), e.clone()).unwrap();
            prop_assert_eq!(data.x().as_slice(), x.as_slice());
            prop_assert_eq!(data.y().as_slice(), y.as_slice());
            prop_assert_eq!(data.yerr().as_slice(), e.as_slice());
        }

        #[test]
        fn text_lists_y_in_order((x, y, e) in columns(16)) {
            let data = ValueContainer::new(x, y.clone(), e).unwrap();
            let text = data.to_string();
            let y_line = text.lines().nth(1).unwrap();
            let expected = format!("Y: {}", Series::from(y));
            prop_assert_eq!(y_line, expected.as_str());
        }

        #[test]
        fn originals_survive_normalization((x, y, e) in columns(32)) {
            let norm = NormalizedContainer::new(x, y.clone(), e.clone()).unwrap();
            prop_assert_eq!(norm.y_orig().as_slice(), y.as_slice());
            prop_assert_eq!(norm.yerr_orig().as_slice(), e.as_slice());
        }

        #[test]
        fn normalized_values_divide_by_scale((x, y, e) in columns(32)) {
            let norm = NormalizedContainer::new(x, y, e).unwrap();
            let scale = norm.scale();
            for (n, o) in norm.y().iter().zip(norm.y_orig()) {
                prop_assert!(n.to_bits() == (o / scale).to_bits() || (n.is_nan() && (o / scale).is_nan()));
            }
            for (n, o) in norm.yerr().iter().zip(norm.yerr_orig()) {
                prop_assert!(n.to_bits() == (o / scale).to_bits() || (n.is_nan() && (o / scale).is_nan()));
            }
        }

        #[test]
        fn attributes_never_change_text((x, y, e) in columns(8), label in "[a-z]{1,12}") {
            let mut data = ValueContainer::new(x, y, e).unwrap();
            let before = data.to_string();
            data.set_attribute("name", label);
            prop_assert_eq!(data.to_string(), before);
        }
    }
}
