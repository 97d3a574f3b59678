//! # rusty-dataset
//!
//! Small value objects for measured data: an independent variable `x`, a
//! dependent variable `y` and its uncertainty `yerr`.
//!
//! - [`ValueContainer`] holds the three sequences and prints them.
//! - [`NormalizedContainer`] divides `y` and `yerr` by the mean of `y` once,
//!   at construction, and keeps the original values alongside.
//!
//! ```
//! use rusty_dataset::{NormalizedContainer, ValueContainer};
//!
//! let data = ValueContainer::new([1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]).unwrap();
//! assert_eq!(data.to_string(), "X: [1, 2, 3]\nY: [2, 4, 6]\nY error: [1, 1, 1]");
//!
//! let norm = NormalizedContainer::new([1.0, 2.0], [2.0, 6.0], [1.0, 1.0]).unwrap();
//! assert_eq!(norm.y().as_slice(), &[0.5, 1.5]);
//! assert_eq!(norm.y_orig().as_slice(), &[2.0, 6.0]);
//! ```

pub mod data;

pub use data::attributes::{AttributeValue, Attributes};
pub use data::container::ValueContainer;
pub use data::error::ContainerError;
pub use data::normalized::NormalizedContainer;
pub use data::series::Series;
