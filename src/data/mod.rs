//! Data layer: numeric series, containers, and JSON records.
//!
//! Architecture:
//! ```text
//!  f64 / [f64] / JSON value / text
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  series   │  coerce input → Series (length ≥ 1)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────────┐
//!   │ ValueContainer  │  x, y, yerr (equal lengths) + attributes
//!   └────────────────┘
//!        │
//!        ▼
//!   ┌─────────────────────┐
//!   │ NormalizedContainer  │  y, yerr ÷ mean(y), originals kept
//!   └─────────────────────┘
//! ```
//!
//! `records` builds either container from JSON records in memory.

pub mod attributes;
pub mod container;
pub mod error;
pub mod normalized;
pub mod records;
pub mod series;
