//! Matching, stat selection and threshold resolution.
//!
//! ## Submodules
//!
//! - [`matcher`]: first-match lookup of an override by metric name
//! - [`selector`]: picks the displayed value out of a data point
//! - [`resolver`]: maps a value to a color and severity through a threshold table
//! - [`pipeline`]: writes the display annotations for one matched point
//!
//! ## Data Flow
//!
//! ```text
//! MetricDataPoint
//!        │
//!        ▼
//! CompiledPatterns::first_match()  ── no match ──▶ point left untouched
//!        │
//!        ▼
//! select_value() ──▶ color_for() / severity_for() ──▶ annotate()
//! ```

pub mod matcher;
pub mod pipeline;
pub mod resolver;
pub mod selector;

pub use matcher::{match_override, CompiledPatterns};
pub use pipeline::{annotate, DisplayServices};
pub use resolver::{color_for, severity_for, threshold_for};
pub use selector::select_value;
