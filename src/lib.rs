//! # metric-overrides
//!
//! Per-metric display overrides for dashboard panels.
//!
//! An override pairs a metric name pattern with display settings: which
//! statistic to show, how to format it, which colors and severities its value
//! maps to, and an optional click-through link. On every data refresh the
//! host hands its series to [`OverrideListManager::apply_overrides`], which
//! annotates each series matched by an override.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    OverrideListManager                       │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌───────────┐  │
//! │  │ matcher  │──▶│ selector │──▶│ resolver │──▶│ pipeline  │  │
//! │  │(pattern) │   │ (stat)   │   │(threshold)   │(annotate) │  │
//! │  └────┬─────┘   └──────────┘   └──────────┘   └─────┬─────┘  │
//! │       │                                             │        │
//! │       ▼                                             ▼        │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │ services: patterns | formatters | templates | sanitizer │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`manager`]**: the ordered override list, its editing operations and
//!   the refresh pass
//! - **[`engine`]**: first-match lookup, stat selection, threshold resolution
//!   and annotation
//! - **[`services`]**: traits for what the host owns (pattern dialect, unit
//!   formatting, template variables, sanitizing, refresh, name suggestions)
//!   with default implementations
//! - **[`settings`]**: loading overrides and variables from configuration
//!
//! ## Usage
//!
//! ```
//! use metric_overrides::{
//!     MetricDataPoint, MetricStats, Operator, OverrideListManager, OverrideRecord, Severity,
//!     Threshold,
//! };
//!
//! let mut cpu = OverrideRecord::with_pattern("cpu.*");
//! cpu.operator = Operator::Max;
//! cpu.unit_format = "percent".into();
//! cpu.decimals = Some(0);
//! cpu.thresholds.push(Threshold::new(0.0, Severity::Ok));
//! cpu.thresholds.push(Threshold::new(80.0, Severity::Critical));
//!
//! let manager = OverrideListManager::new(vec![cpu]);
//!
//! let mut data = vec![
//!     MetricDataPoint::new("cpu_usage").with_stats(MetricStats {
//!         max: Some(91.4),
//!         ..Default::default()
//!     }),
//!     MetricDataPoint::new("disk_io"),
//! ];
//! manager.apply_overrides(&mut data);
//!
//! let cpu = data[0].display.as_ref().unwrap();
//! assert_eq!(cpu.threshold_level, Severity::Critical);
//! assert_eq!(cpu.value_formatted.as_deref(), Some("91%"));
//! assert!(data[1].display.is_none());
//! ```
//!
//! ### Injecting host services
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use metric_overrides::OverrideListManager;
//! use metric_overrides::services::VariableTemplateResolver;
//!
//! let refreshes = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&refreshes);
//!
//! let mut manager = OverrideListManager::builder()
//!     .template_resolver(VariableTemplateResolver::new().with_variable("host", "web-01"))
//!     .refresh_notifier(move || counter.set(counter.get() + 1))
//!     .build(Vec::new());
//!
//! let index = manager.add();
//! manager.reverse_color_palette(index);
//! assert_eq!(refreshes.get(), 1);
//! ```

pub mod engine;
pub mod error;
pub mod manager;
pub mod services;
pub mod settings;

pub use error::OverridesError;
pub use manager::{ManagerBuilder, OverrideListManager};
pub use settings::Settings;

// Re-export types for convenience
pub use overrides_types::{
    DisplayAnnotations, MetricDataPoint, MetricStats, Operator, OverrideRecord, Severity,
    StatValue, Threshold, ThresholdTable, DEFAULT_PALETTE, NO_DATA_COLOR,
};
