//! Override records and the statistic operators they select.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::ThresholdTable;

/// Default severity palette, critical first.
pub const DEFAULT_PALETTE: [&str; 3] = [
    "rgba(245, 54, 54, 0.9)",
    "rgba(237, 129, 40, 0.89)",
    "rgba(50, 172, 45, 0.97)",
];

/// The statistic an override displays.
///
/// Parsing never fails: unknown or empty names select [`Operator::Avg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Operator {
    #[default]
    Avg,
    Count,
    Current,
    Delta,
    Diff,
    First,
    LogMin,
    Max,
    Min,
    /// The metric's own name rather than a statistic.
    Name,
    TimeStep,
    /// The data point's timestamp.
    LastTime,
    Total,
}

impl Operator {
    /// Every operator, in menu order.
    pub const ALL: [Operator; 13] = [
        Operator::Avg,
        Operator::Count,
        Operator::Current,
        Operator::Delta,
        Operator::Diff,
        Operator::First,
        Operator::LogMin,
        Operator::Max,
        Operator::Min,
        Operator::Name,
        Operator::TimeStep,
        Operator::LastTime,
        Operator::Total,
    ];

    /// Configuration name of the operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Avg => "avg",
            Operator::Count => "count",
            Operator::Current => "current",
            Operator::Delta => "delta",
            Operator::Diff => "diff",
            Operator::First => "first",
            Operator::LogMin => "logmin",
            Operator::Max => "max",
            Operator::Min => "min",
            Operator::Name => "name",
            Operator::TimeStep => "time_step",
            Operator::LastTime => "last_time",
            Operator::Total => "total",
        }
    }

    /// Parse an operator name, falling back to `avg`.
    pub fn parse_lenient(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == name)
            .unwrap_or_default()
    }
}

impl FromStr for Operator {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        Self::parse_lenient(&name)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().into()
    }
}

/// A display rule for every metric whose name matches `pattern`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct OverrideRecord {
    /// Metric name pattern, compiled by the host's pattern compiler.
    pub pattern: String,
    /// Breakpoints mapping values to severity and color.
    pub thresholds: ThresholdTable,
    /// Severity palette, critical first. Reversible.
    pub colors: [String; 3],
    /// Unit name looked up in the formatter registry. Empty means no formatting.
    pub unit_format: String,
    /// Decimal places for formatting and rounding.
    #[cfg_attr(feature = "serde", serde(with = "decimals_serde"))]
    pub decimals: Option<u32>,
    /// Decimal places for unit-scaled output (e.g. `1.5 MB`).
    #[cfg_attr(feature = "serde", serde(with = "decimals_serde"))]
    pub scaled_decimals: Option<u32>,
    /// Display toggle for the host. Disabled records still match.
    pub enabled: bool,
    /// Statistic to display.
    pub operator: Operator,
    /// Text shown before the formatted value.
    pub prefix: String,
    /// Text shown after the formatted value.
    pub suffix: String,
    /// Outbound link template; may contain template variables.
    pub click_through: String,
    /// Whether the resolved link is passed through the sanitizer.
    pub sanitize_url_enabled: bool,
    /// Host-owned storage for a sanitized link. The engine neither reads nor
    /// writes it; resolved links land on each point's annotations.
    pub sanitized_url: String,
}

impl OverrideRecord {
    /// Create a record with default settings and the given pattern.
    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    /// Reverse the severity palette in place.
    pub fn reverse_colors(&mut self) {
        self.colors.reverse();
    }

    /// Whether a non-empty click-through template is configured.
    pub fn has_click_through(&self) -> bool {
        !self.click_through.is_empty()
    }
}

impl Default for OverrideRecord {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            thresholds: ThresholdTable::new(),
            colors: DEFAULT_PALETTE.map(String::from),
            unit_format: String::new(),
            decimals: None,
            scaled_decimals: None,
            enabled: true,
            operator: Operator::Avg,
            prefix: String::new(),
            suffix: String::new(),
            click_through: String::new(),
            sanitize_url_enabled: true,
            sanitized_url: String::new(),
        }
    }
}

/// Decimal counts are stored by hosts as `""`, `"2"` or `2`.
#[cfg(feature = "serde")]
mod decimals_serde {
    use alloc::string::String;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_u32(*n),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => s.trim().parse().map(Some).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let r = OverrideRecord::default();
        assert!(r.pattern.is_empty());
        assert!(r.thresholds.is_empty());
        assert_eq!(r.colors[0], "rgba(245, 54, 54, 0.9)");
        assert_eq!(r.colors[2], "rgba(50, 172, 45, 0.97)");
        assert_eq!(r.operator, Operator::Avg);
        assert!(r.enabled);
        assert!(r.sanitize_url_enabled);
        assert_eq!(r.decimals, None);
        assert_eq!(r.scaled_decimals, None);
        assert!(!r.has_click_through());
    }

    #[test]
    fn reverse_colors_twice_restores() {
        let mut r = OverrideRecord::default();
        r.reverse_colors();
        assert_eq!(r.colors[0], "rgba(50, 172, 45, 0.97)");
        assert_eq!(r.colors[1], "rgba(237, 129, 40, 0.89)");
        r.reverse_colors();
        assert_eq!(r, OverrideRecord::default());
    }

    #[test]
    fn operator_names() {
        assert_eq!(Operator::parse_lenient("max"), Operator::Max);
        assert_eq!(Operator::parse_lenient("time_step"), Operator::TimeStep);
        assert_eq!(Operator::parse_lenient("last_time"), Operator::LastTime);
        assert_eq!(Operator::parse_lenient("median"), Operator::Avg);
        assert_eq!(Operator::parse_lenient(""), Operator::Avg);
        for op in Operator::ALL {
            assert_eq!(Operator::parse_lenient(op.as_str()), op);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_partial_record() {
        let json = r#"{
            "pattern": "cpu.*",
            "operator": "bogus",
            "decimals": "",
            "scaled_decimals": "3",
            "thresholds": [{"value": 50, "state": 1, "color": "orange"}]
        }"#;
        let r: OverrideRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.pattern, "cpu.*");
        assert_eq!(r.operator, Operator::Avg);
        assert_eq!(r.decimals, None);
        assert_eq!(r.scaled_decimals, Some(3));
        assert_eq!(r.thresholds.len(), 1);
        assert!(r.enabled);
        assert_eq!(r.colors, DEFAULT_PALETTE.map(String::from));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn numeric_decimals() {
        let r: OverrideRecord = serde_json::from_str(r#"{"decimals": 2}"#).unwrap();
        assert_eq!(r.decimals, Some(2));
        assert!(serde_json::from_str::<OverrideRecord>(r#"{"decimals": "two"}"#).is_err());
    }
}
