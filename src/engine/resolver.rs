//! Threshold resolution.
//!
//! Thresholds read as "at or above this value, use this state". The applicable
//! threshold is the highest one not exceeding the value, so the table is
//! scanned from the top. When no threshold qualifies the lowest one is used.

use overrides_types::{Severity, StatValue, Threshold, ThresholdTable, NO_DATA_COLOR};

/// Whether `value` is at or above `bound`.
///
/// NaN and non-numeric text never are; numeric text compares as its number.
fn at_or_above(value: &StatValue, bound: f64) -> bool {
    match value {
        StatValue::Number(n) => *n >= bound,
        StatValue::Text(s) => s.trim().parse::<f64>().is_ok_and(|n| n >= bound),
    }
}

/// The threshold that applies to `value`, or `None` for an empty table.
pub fn threshold_for<'a>(table: &'a ThresholdTable, value: &StatValue) -> Option<&'a Threshold> {
    let mut last = None;
    for threshold in table.iter().rev() {
        if at_or_above(value, threshold.value) {
            return Some(threshold);
        }
        last = Some(threshold);
    }
    last
}

/// Display color for `value`. Missing values and empty tables are gray.
pub fn color_for<'a>(table: &'a ThresholdTable, value: Option<&StatValue>) -> &'a str {
    value
        .and_then(|v| threshold_for(table, v))
        .map_or(NO_DATA_COLOR, |t| t.color.as_str())
}

/// Severity for `value`.
///
/// Missing values report [`Severity::NoData`]; an empty table reports
/// [`Severity::Ok`].
pub fn severity_for(table: &ThresholdTable, value: Option<&StatValue>) -> Severity {
    match value {
        None => Severity::NoData,
        Some(v) => threshold_for(table, v).map_or(Severity::Ok, |t| t.state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> StatValue {
        StatValue::Number(n)
    }

    fn green_red() -> ThresholdTable {
        ThresholdTable::from(vec![
            Threshold::with_color(0.0, Severity::Ok, "green"),
            Threshold::with_color(80.0, Severity::Critical, "red"),
        ])
    }

    #[test]
    fn value_between_thresholds() {
        let table = green_red();
        assert_eq!(color_for(&table, Some(&num(50.0))), "green");
        assert_eq!(severity_for(&table, Some(&num(50.0))), Severity::Ok);
    }

    #[test]
    fn value_above_top_threshold() {
        let table = green_red();
        assert_eq!(color_for(&table, Some(&num(90.0))), "red");
        assert_eq!(severity_for(&table, Some(&num(90.0))), Severity::Critical);
    }

    #[test]
    fn threshold_bound_is_inclusive() {
        let table = green_red();
        assert_eq!(color_for(&table, Some(&num(80.0))), "red");
    }

    #[test]
    fn below_lowest_falls_back_to_lowest() {
        let table = ThresholdTable::from(vec![
            Threshold::with_color(10.0, Severity::Warning, "amber"),
            Threshold::with_color(20.0, Severity::Critical, "red"),
        ]);
        assert_eq!(color_for(&table, Some(&num(-5.0))), "amber");
        assert_eq!(severity_for(&table, Some(&num(-5.0))), Severity::Warning);
    }

    #[test]
    fn missing_value_is_no_data() {
        let table = green_red();
        assert_eq!(color_for(&table, None), NO_DATA_COLOR);
        assert_eq!(severity_for(&table, None), Severity::NoData);
        assert_eq!(color_for(&ThresholdTable::new(), None), NO_DATA_COLOR);
    }

    #[test]
    fn empty_table_defaults() {
        let table = ThresholdTable::new();
        assert_eq!(color_for(&table, Some(&num(1.0))), NO_DATA_COLOR);
        assert_eq!(severity_for(&table, Some(&num(1.0))), Severity::Ok);
    }

    #[test]
    fn duplicate_values_resolve_to_last_inserted() {
        let mut table = ThresholdTable::new();
        table.push(Threshold::with_color(50.0, Severity::Warning, "first"));
        table.push(Threshold::with_color(50.0, Severity::Critical, "second"));
        assert_eq!(color_for(&table, Some(&num(60.0))), "second");
    }

    #[test]
    fn nan_and_text_take_fallback() {
        let table = green_red();
        assert_eq!(color_for(&table, Some(&num(f64::NAN))), "green");
        let name = StatValue::Text("cpu_usage".into());
        assert_eq!(severity_for(&table, Some(&name)), Severity::Ok);
        let numeric_text = StatValue::Text("95".into());
        assert_eq!(color_for(&table, Some(&numeric_text)), "red");
    }

    #[test]
    fn picks_greatest_threshold_not_above_value() {
        let table: ThresholdTable = [0.0, 10.0, 20.0, 30.0, 40.0]
            .into_iter()
            .map(|v| Threshold::with_color(v, Severity::Ok, format!("c{v}")))
            .collect();

        for (value, expected) in [
            (-1.0, "c0"),
            (0.0, "c0"),
            (9.99, "c0"),
            (10.0, "c10"),
            (25.0, "c20"),
            (1e9, "c40"),
        ] {
            assert_eq!(color_for(&table, Some(&num(value))), expected, "{value}");
        }
    }
}
