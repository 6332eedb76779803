//! # overrides-types
//!
//! Core types for metric display overrides. This crate defines the data model
//! shared by the override engine and by hosts that store or render overrides:
//! the severity scale, threshold tables, override records and the metric data
//! points the engine annotates.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature to load and emit records
//! - **Closed shapes**: Every record and threshold has a fixed, typed set of fields
//! - **Explicit absence**: Missing statistics are `None`, never a silent zero
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON/TOML/etc. serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use overrides_types::{OverrideRecord, Operator, Severity, Threshold};
//!
//! let mut record = OverrideRecord::with_pattern("cpu.*");
//! record.operator = Operator::Max;
//! record.thresholds.push(Threshold::new(80.0, Severity::Critical));
//! record.thresholds.push_default();
//!
//! // The table stays sorted ascending by value
//! let values: Vec<f64> = record.thresholds.iter().map(|t| t.value).collect();
//! assert_eq!(values, vec![0.0, 80.0]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod metric;
mod record;
mod severity;
mod threshold;

pub use metric::*;
pub use record::*;
pub use severity::*;
pub use threshold::*;

/// Color reported when there is no value to evaluate.
pub const NO_DATA_COLOR: &str = "#808080";
