//! Writes display annotations for a matched data point.

use overrides_types::{DisplayAnnotations, MetricDataPoint, OverrideRecord, StatValue};
use tracing::trace;

use super::{color_for, select_value, severity_for};
use crate::services::{FormatterRegistry, Sanitizer, TemplateResolver};

/// Services used while annotating a point.
#[derive(Clone, Copy)]
pub struct DisplayServices<'a> {
    pub formatters: &'a dyn FormatterRegistry,
    pub templates: &'a dyn TemplateResolver,
    pub sanitizer: &'a dyn Sanitizer,
}

/// Apply `record` to `point`, replacing any previous annotations.
pub fn annotate(record: &OverrideRecord, point: &mut MetricDataPoint, services: DisplayServices<'_>) {
    let value = select_value(record.operator, point);
    let color = color_for(&record.thresholds, value.as_ref()).to_string();
    let threshold_level = severity_for(&record.thresholds, value.as_ref());

    let (value_formatted, value_rounded) = match services.formatters.lookup(&record.unit_format) {
        Some(formatter) => match &value {
            Some(StatValue::Number(n)) => (
                Some(formatter.format(Some(*n), record.decimals, record.scaled_decimals)),
                Some(services.formatters.round_value(*n, record.decimals)),
            ),
            Some(StatValue::Text(text)) => (Some(text.clone()), None),
            None => (
                Some(formatter.format(None, record.decimals, record.scaled_decimals)),
                None,
            ),
        },
        None => (None, None),
    };

    let (click_through, sanitized_url) = if record.has_click_through() {
        let link = services.templates.replace_with_text(&record.click_through);
        let sanitized = record
            .sanitize_url_enabled
            .then(|| services.sanitizer.sanitize(&link));
        (Some(link), sanitized)
    } else {
        (None, None)
    };

    trace!(
        metric = %point.name,
        pattern = %record.pattern,
        color = %color,
        level = %threshold_level,
        "Annotated data point"
    );

    point.display = Some(DisplayAnnotations {
        value,
        color,
        threshold_level,
        value_formatted,
        value_rounded,
        thresholds: record.thresholds.as_slice().to_vec(),
        prefix: record.prefix.clone(),
        suffix: record.suffix.clone(),
        click_through,
        sanitized_url,
    });
}
