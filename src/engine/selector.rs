//! Picks the displayed value out of a data point.

use overrides_types::{MetricDataPoint, Operator, StatValue};

/// The value `operator` selects from `point`.
///
/// `None` means the statistic is missing; downstream it is treated as "no data".
pub fn select_value(operator: Operator, point: &MetricDataPoint) -> Option<StatValue> {
    let stats = &point.stats;
    let number = match operator {
        Operator::Avg => stats.avg,
        Operator::Count => stats.count,
        Operator::Current => stats.current,
        Operator::Delta => stats.delta,
        Operator::Diff => stats.diff,
        Operator::First => stats.first,
        Operator::LogMin => stats.logmin,
        Operator::Max => stats.max,
        Operator::Min => stats.min,
        Operator::TimeStep => stats.time_step,
        Operator::LastTime => point.timestamp.map(|ts| ts as f64),
        Operator::Total => stats.total,
        Operator::Name => return Some(StatValue::Text(point.name.clone())),
    };
    number.map(StatValue::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overrides_types::MetricStats;

    fn point() -> MetricDataPoint {
        MetricDataPoint::new("cpu_usage")
            .with_stats(MetricStats {
                avg: Some(10.0),
                min: Some(1.0),
                max: Some(42.0),
                current: Some(12.0),
                first: Some(3.0),
                last: Some(12.0),
                total: Some(300.0),
                count: Some(30.0),
                delta: Some(9.0),
                diff: Some(-2.0),
                logmin: Some(0.5),
                time_step: Some(1000.0),
            })
            .with_timestamp(1_700_000_000_000)
    }

    #[test]
    fn max_selects_max() {
        assert_eq!(
            select_value(Operator::Max, &point()),
            Some(StatValue::Number(42.0))
        );
    }

    #[test]
    fn every_stat_operator_maps_to_its_field() {
        let p = point();
        let cases = [
            (Operator::Avg, 10.0),
            (Operator::Count, 30.0),
            (Operator::Current, 12.0),
            (Operator::Delta, 9.0),
            (Operator::Diff, -2.0),
            (Operator::First, 3.0),
            (Operator::LogMin, 0.5),
            (Operator::Min, 1.0),
            (Operator::TimeStep, 1000.0),
            (Operator::Total, 300.0),
            (Operator::LastTime, 1_700_000_000_000.0),
        ];
        for (op, expected) in cases {
            assert_eq!(select_value(op, &p), Some(StatValue::Number(expected)), "{op}");
        }
    }

    #[test]
    fn name_selects_metric_name() {
        assert_eq!(
            select_value(Operator::Name, &point()),
            Some(StatValue::Text("cpu_usage".into()))
        );
    }

    #[test]
    fn unknown_operator_behaves_as_avg() {
        let p = point();
        let unknown = Operator::parse_lenient("unknown_op");
        assert_eq!(select_value(unknown, &p), select_value(Operator::Avg, &p));
    }

    #[test]
    fn missing_stat_is_none() {
        let p = MetricDataPoint::new("empty");
        assert_eq!(select_value(Operator::Max, &p), None);
        assert_eq!(select_value(Operator::LastTime, &p), None);
    }
}
