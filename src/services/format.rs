//! Built-in unit formatters.

use std::collections::BTreeMap;
use std::fmt;

use super::{FormatterRegistry, ValueFormatter};

const SHORT_UNITS: &[&str] = &[
    "", " K", " Mil", " Bil", " Tri", " Quadr", " Quint", " Sext", " Sept",
];
const BINARY_BYTES: &[&str] = &[" B", " KiB", " MiB", " GiB", " TiB", " PiB", " EiB"];
const DECIMAL_BYTES: &[&str] = &[" B", " kB", " MB", " GB", " TB", " PB", " EB"];
const HERTZ: &[&str] = &[" Hz", " kHz", " MHz", " GHz", " THz", " PHz", " EHz"];

/// Precision cap. Beyond this an f64 has no more digits to show.
pub const MAX_DECIMALS: u32 = 20;

/// Round half up, the way dashboard values are rounded.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to `places` decimal places, leaving values too large to scale as they are.
fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(MAX_DECIMALS) as i32);
    let scaled = value * factor;
    if scaled.is_finite() {
        round_half_up(scaled) / factor
    } else {
        value
    }
}

/// Format `value` with exactly `decimals` places, or as a whole number when
/// `decimals` is `None`.
pub fn to_fixed(value: f64, decimals: Option<u32>) -> String {
    let places = decimals.unwrap_or(0).min(MAX_DECIMALS);
    let rounded = round_to(value, places);
    if !rounded.is_finite() {
        return rounded.to_string();
    }
    format!("{:.*}", places as usize, rounded)
}

/// Round `value` to `decimals` places. `None` leaves the value unchanged.
pub fn round_value(value: f64, decimals: Option<u32>) -> f64 {
    match decimals {
        Some(places) => round_to(value, places),
        None => value,
    }
}

/// Fixed precision, or `scaled_decimals + extra` when scaled precision is set.
fn to_fixed_scaled(
    value: f64,
    decimals: Option<u32>,
    scaled_decimals: Option<u32>,
    extra: u32,
    suffix: &str,
) -> String {
    let places = scaled_decimals.map(|sd| sd.saturating_add(extra)).or(decimals);
    format!("{}{}", to_fixed(value, places), suffix)
}

/// Divide by `factor` until the value fits, appending the matching unit.
fn scaled_units(
    factor: f64,
    units: &[&str],
    value: f64,
    decimals: Option<u32>,
    scaled_decimals: Option<u32>,
) -> String {
    let mut size = value;
    let mut steps = 0usize;
    while size.abs() >= factor {
        steps += 1;
        size /= factor;
        if steps >= units.len() {
            return "NA".to_string();
        }
    }

    let places = match scaled_decimals {
        Some(sd) if steps > 0 => Some(sd.saturating_add(3 * steps as u32)),
        _ => decimals,
    };
    format!("{}{}", to_fixed(size, places), units[steps])
}

fn format_none(value: f64, decimals: Option<u32>, _: Option<u32>) -> String {
    to_fixed(value, decimals)
}

fn format_short(value: f64, decimals: Option<u32>, scaled: Option<u32>) -> String {
    scaled_units(1000.0, SHORT_UNITS, value, decimals, scaled)
}

fn format_percent(value: f64, decimals: Option<u32>, _: Option<u32>) -> String {
    format!("{}%", to_fixed(value, decimals))
}

fn format_percent_unit(value: f64, decimals: Option<u32>, _: Option<u32>) -> String {
    format!("{}%", to_fixed(value * 100.0, decimals))
}

fn format_bytes(value: f64, decimals: Option<u32>, scaled: Option<u32>) -> String {
    scaled_units(1024.0, BINARY_BYTES, value, decimals, scaled)
}

fn format_decbytes(value: f64, decimals: Option<u32>, scaled: Option<u32>) -> String {
    scaled_units(1000.0, DECIMAL_BYTES, value, decimals, scaled)
}

fn format_hertz(value: f64, decimals: Option<u32>, scaled: Option<u32>) -> String {
    scaled_units(1000.0, HERTZ, value, decimals, scaled)
}

fn format_milliseconds(value: f64, decimals: Option<u32>, scaled: Option<u32>) -> String {
    let abs = value.abs();
    if abs < 1000.0 {
        format!("{} ms", to_fixed(value, decimals))
    } else if abs < 60_000.0 {
        to_fixed_scaled(value / 1000.0, decimals, scaled, 3, " s")
    } else if abs < 3_600_000.0 {
        to_fixed_scaled(value / 60_000.0, decimals, scaled, 5, " min")
    } else if abs < 86_400_000.0 {
        to_fixed_scaled(value / 3_600_000.0, decimals, scaled, 7, " hour")
    } else if abs < 31_536_000_000.0 {
        to_fixed_scaled(value / 86_400_000.0, decimals, scaled, 8, " day")
    } else {
        to_fixed_scaled(value / 31_536_000_000.0, decimals, scaled, 10, " year")
    }
}

fn format_seconds(value: f64, decimals: Option<u32>, scaled: Option<u32>) -> String {
    let abs = value.abs();
    if abs < 1.0 {
        format!("{} ms", to_fixed(value * 1000.0, decimals))
    } else if abs < 60.0 {
        format!("{} s", to_fixed(value, decimals))
    } else if abs < 3600.0 {
        to_fixed_scaled(value / 60.0, decimals, scaled, 1, " min")
    } else if abs < 86_400.0 {
        to_fixed_scaled(value / 3600.0, decimals, scaled, 4, " hour")
    } else if abs < 604_800.0 {
        to_fixed_scaled(value / 86_400.0, decimals, scaled, 5, " day")
    } else if abs < 31_536_000.0 {
        to_fixed_scaled(value / 604_800.0, decimals, scaled, 6, " week")
    } else {
        to_fixed_scaled(value / 31_536_000.0, decimals, scaled, 7, " year")
    }
}

type UnitFn = fn(f64, Option<u32>, Option<u32>) -> String;

/// Wraps a numeric formatter so a missing value formats to `""`.
fn numeric(f: UnitFn) -> Box<dyn ValueFormatter> {
    Box::new(move |value: Option<f64>, decimals: Option<u32>, scaled: Option<u32>| {
        value.map(|v| f(v, decimals, scaled)).unwrap_or_default()
    })
}

/// Registry of unit formatters keyed by unit name.
///
/// Ships with `none`, `short`, `percent`, `percentunit`, `bytes`,
/// `decbytes`, `hertz`, `ms` and `s`. Hosts can register more.
pub struct BuiltinFormatters {
    formatters: BTreeMap<String, Box<dyn ValueFormatter>>,
}

impl BuiltinFormatters {
    /// Create a registry with the built-in units.
    pub fn new() -> Self {
        let builtins: [(&str, UnitFn); 9] = [
            ("none", format_none),
            ("short", format_short),
            ("percent", format_percent),
            ("percentunit", format_percent_unit),
            ("bytes", format_bytes),
            ("decbytes", format_decbytes),
            ("hertz", format_hertz),
            ("ms", format_milliseconds),
            ("s", format_seconds),
        ];

        let formatters = builtins
            .into_iter()
            .map(|(unit, f)| (unit.to_string(), numeric(f)))
            .collect();
        Self { formatters }
    }

    /// Create a registry with no units.
    pub fn empty() -> Self {
        Self {
            formatters: BTreeMap::new(),
        }
    }

    /// Register (or replace) the formatter for `unit`.
    pub fn register(&mut self, unit: impl Into<String>, formatter: impl ValueFormatter + 'static) {
        self.formatters.insert(unit.into(), Box::new(formatter));
    }

    /// Registered unit names, sorted.
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.formatters.keys().map(String::as_str)
    }
}

impl Default for BuiltinFormatters {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BuiltinFormatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinFormatters")
            .field("units", &self.formatters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FormatterRegistry for BuiltinFormatters {
    fn lookup(&self, unit: &str) -> Option<&dyn ValueFormatter> {
        self.formatters.get(unit).map(|f| f.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(unit: &str, value: f64, decimals: Option<u32>, scaled: Option<u32>) -> String {
        BuiltinFormatters::new()
            .lookup(unit)
            .unwrap()
            .format(Some(value), decimals, scaled)
    }

    #[test]
    fn to_fixed_pads_and_rounds() {
        assert_eq!(to_fixed(1.5, Some(2)), "1.50");
        assert_eq!(to_fixed(1.005, Some(1)), "1.0");
        assert_eq!(to_fixed(2.5, None), "3");
        assert_eq!(to_fixed(-2.5, None), "-2");
        assert_eq!(to_fixed(42.0, Some(0)), "42");
    }

    #[test]
    fn round_value_without_decimals_is_identity() {
        assert_eq!(round_value(3.14159, Some(2)), 3.14);
        assert_eq!(round_value(3.14159, None), 3.14159);
    }

    #[test]
    fn unknown_unit_is_absent() {
        let registry = BuiltinFormatters::new();
        assert!(registry.lookup("furlongs").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn missing_value_formats_empty() {
        let registry = BuiltinFormatters::new();
        let percent = registry.lookup("percent").unwrap();
        assert_eq!(percent.format(None, Some(1), None), "");
    }

    #[test]
    fn percent_units() {
        assert_eq!(fmt("percent", 42.123, Some(1), None), "42.1%");
        assert_eq!(fmt("percentunit", 0.5, Some(0), None), "50%");
    }

    #[test]
    fn scaled_byte_units() {
        assert_eq!(fmt("bytes", 512.0, Some(0), None), "512 B");
        assert_eq!(fmt("bytes", 1536.0, Some(1), None), "1.5 KiB");
        assert_eq!(fmt("decbytes", 2_000_000.0, Some(0), None), "2 MB");
        assert_eq!(fmt("short", 1500.0, Some(1), None), "1.5 K");
    }

    #[test]
    fn scaled_decimals_grow_with_steps() {
        // one step up: scaled_decimals + 3
        assert_eq!(fmt("decbytes", 1500.0, Some(0), Some(0)), "1.500 kB");
    }

    #[test]
    fn huge_precision_is_capped() {
        let twenty = format!("{:.20}", 1.5);
        assert_eq!(to_fixed(1.5, Some(400)), twenty);
        assert_eq!(to_fixed(1.5, Some(u32::MAX)), twenty);
        assert_eq!(round_value(1.5, Some(400)), 1.5);
        assert_eq!(round_value(1.5, Some(u32::MAX)), 1.5);
        assert_eq!(
            fmt("decbytes", 1500.0, Some(0), Some(u32::MAX)),
            format!("{} kB", twenty)
        );
        assert_eq!(
            fmt("ms", 1500.0, Some(0), Some(u32::MAX)),
            format!("{} s", twenty)
        );
    }

    #[test]
    fn values_too_large_to_scale_keep_their_value() {
        assert_eq!(round_value(1e300, Some(20)), 1e300);
        assert!(to_fixed(1e300, Some(20)).starts_with("1000000"));
    }

    #[test]
    fn time_units() {
        assert_eq!(fmt("ms", 250.0, Some(0), None), "250 ms");
        assert_eq!(fmt("ms", 1500.0, Some(1), None), "1.5 s");
        assert_eq!(fmt("s", 0.25, Some(0), None), "250 ms");
        assert_eq!(fmt("s", 120.0, Some(0), None), "2 min");
    }

    #[test]
    fn register_custom_unit() {
        let mut registry = BuiltinFormatters::empty();
        registry.register("celsius", |v: Option<f64>, d: Option<u32>, _: Option<u32>| {
            v.map(|v| format!("{}°C", to_fixed(v, d))).unwrap_or_default()
        });
        let celsius = registry.lookup("celsius").unwrap();
        assert_eq!(celsius.format(Some(21.25), Some(1), None), "21.3°C");
        assert_eq!(registry.units().collect::<Vec<_>>(), vec!["celsius"]);
    }
}
