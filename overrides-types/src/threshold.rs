//! Thresholds and the ordered table that holds them.

use alloc::string::String;
use alloc::vec::Vec;
use core::slice;

use crate::Severity;

/// A breakpoint: values at or above `value` take this severity and color.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Threshold {
    /// Lower bound (inclusive) at which this threshold applies.
    pub value: f64,
    /// Severity reported for values in this band.
    pub state: Severity,
    /// Display color for values in this band.
    pub color: String,
}

impl Threshold {
    /// Create a threshold whose color is the canonical color of `state`.
    ///
    /// [`Severity::NoData`] has no canonical color and falls back to the OK color.
    pub fn new(value: f64, state: Severity) -> Self {
        let color = state
            .canonical_color()
            .or(Severity::Ok.canonical_color())
            .unwrap_or_default();
        Self {
            value,
            state,
            color: color.into(),
        }
    }

    /// Create a threshold with an explicit color.
    pub fn with_color(value: f64, state: Severity, color: impl Into<String>) -> Self {
        Self {
            value,
            state,
            color: color.into(),
        }
    }

    /// Reset `color` to the canonical color of the current severity.
    ///
    /// Leaves the color untouched when the severity has no canonical color.
    pub fn apply_severity_color(&mut self) {
        if let Some(color) = self.state.canonical_color() {
            self.color = color.into();
        }
    }
}

/// NaN bounds compare equal to each other so such thresholds can be found
/// and removed.
impl PartialEq for Threshold {
    fn eq(&self, other: &Self) -> bool {
        let same_value =
            self.value == other.value || (self.value.is_nan() && other.value.is_nan());
        same_value && self.state == other.state && self.color == other.color
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::new(0.0, Severity::Ok)
    }
}

/// Thresholds of one override, kept in ascending order by value.
///
/// Duplicate values are allowed; the sort is stable so ties keep their
/// insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Threshold>", into = "Vec<Threshold>")
)]
pub struct ThresholdTable {
    entries: Vec<Threshold>,
}

impl ThresholdTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a threshold and restore ascending order.
    pub fn push(&mut self, threshold: Threshold) {
        self.entries.push(threshold);
        self.sort();
    }

    /// Insert the default threshold (`0`, OK, green).
    pub fn push_default(&mut self) {
        self.push(Threshold::default());
    }

    /// Remove the first threshold equal to `threshold`.
    ///
    /// Returns `false` without touching the table when nothing matches.
    pub fn remove(&mut self, threshold: &Threshold) -> bool {
        let removed = match self.entries.iter().position(|t| t == threshold) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        };
        self.sort();
        removed
    }

    /// Edit the threshold at `index`, then restore ascending order.
    ///
    /// Returns `false` if the index is out of range.
    pub fn update<F>(&mut self, index: usize, f: F) -> bool
    where
        F: FnOnce(&mut Threshold),
    {
        let Some(threshold) = self.entries.get_mut(index) else {
            return false;
        };
        f(threshold);
        self.sort();
        true
    }

    /// Stable ascending sort by value.
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.value.total_cmp(&b.value));
    }

    /// Number of thresholds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no thresholds.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The thresholds in ascending order.
    pub fn as_slice(&self) -> &[Threshold] {
        &self.entries
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> slice::Iter<'_, Threshold> {
        self.entries.iter()
    }

    /// The threshold with the lowest value.
    pub fn lowest(&self) -> Option<&Threshold> {
        self.entries.first()
    }
}

impl From<Vec<Threshold>> for ThresholdTable {
    fn from(entries: Vec<Threshold>) -> Self {
        let mut table = Self { entries };
        table.sort();
        table
    }
}

impl From<ThresholdTable> for Vec<Threshold> {
    fn from(table: ThresholdTable) -> Self {
        table.entries
    }
}

impl FromIterator<Threshold> for ThresholdTable {
    fn from_iter<I: IntoIterator<Item = Threshold>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a ThresholdTable {
    type Item = &'a Threshold;
    type IntoIter = slice::Iter<'a, Threshold>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
