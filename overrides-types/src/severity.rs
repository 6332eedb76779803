//! Severity levels and their canonical colors.

use core::fmt;

/// Canonical color per normal severity, indexed by level.
const SEVERITY_COLORS: [&str; 3] = ["#299c46", "rgba(237, 129, 40, 0.89)", "#d44a3a"];

/// Severity level a threshold maps a value to.
///
/// Levels 0 to 2 are the normal scale. [`Severity::NoData`] is reported when
/// there is no value to evaluate and has no canonical color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
    NoData,
}

impl Severity {
    /// Numeric level (0 = OK, 1 = warning, 2 = critical, 3 = no data).
    pub const fn level(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::NoData => 3,
        }
    }

    /// Canonical display color for this severity.
    ///
    /// Returns `None` for [`Severity::NoData`], which is outside the palette.
    pub fn canonical_color(self) -> Option<&'static str> {
        SEVERITY_COLORS.get(self.level() as usize).copied()
    }

    /// Returns a short symbol for display.
    pub fn symbol(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARN",
            Severity::Critical => "CRIT",
            Severity::NoData => "N/A",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error for a numeric level outside `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverity(pub u8);

impl fmt::Display for InvalidSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid severity level {} (expected 0-3)", self.0)
    }
}

impl TryFrom<u8> for Severity {
    type Error = InvalidSeverity;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Severity::Ok),
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Critical),
            3 => Ok(Severity::NoData),
            other => Err(InvalidSeverity(other)),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.level()
    }
}
