//! The override list and the operations hosts perform on it.
//!
//! [`OverrideListManager`] owns the ordered list of [`OverrideRecord`]s. Order
//! is significant: the first record whose pattern matches a metric wins.
//! Hosts edit the list through the manager and run [`apply_overrides`] on
//! every data refresh.
//!
//! [`apply_overrides`]: OverrideListManager::apply_overrides

use std::fmt;

use overrides_types::{MetricDataPoint, OverrideRecord, Severity, StatValue, Threshold};
use tracing::debug;

use crate::engine::{self, CompiledPatterns, DisplayServices};
use crate::services::{
    BuiltinFormatters, FormatterRegistry, NameSuggester, NoSuggestions, NoopRefresh,
    PatternCompiler, RefreshNotifier, RegexPatternCompiler, Sanitizer, TemplateResolver,
    UrlSanitizer, VariableTemplateResolver,
};

/// Owns the override list and the host services it delegates to.
///
/// # Example
///
/// ```
/// use metric_overrides::{MetricDataPoint, MetricStats, OverrideListManager, Severity};
///
/// let mut manager = OverrideListManager::new(Vec::new());
/// let index = manager.add();
/// if let Some(record) = manager.get_mut(index) {
///     record.pattern = "cpu.*".into();
/// }
/// manager.add_threshold(index);
/// manager.update_threshold(index, 0, |t| {
///     t.value = 80.0;
///     t.state = Severity::Critical;
///     OverrideListManager::set_threshold_color(t);
/// });
///
/// let mut data = vec![MetricDataPoint::new("cpu_usage").with_stats(MetricStats {
///     avg: Some(93.0),
///     ..Default::default()
/// })];
/// manager.apply_overrides(&mut data);
///
/// let display = data[0].display.as_ref().unwrap();
/// assert_eq!(display.color, "#d44a3a");
/// assert_eq!(display.threshold_level, Severity::Critical);
/// ```
pub struct OverrideListManager {
    overrides: Vec<OverrideRecord>,
    patterns: Box<dyn PatternCompiler>,
    formatters: Box<dyn FormatterRegistry>,
    templates: Box<dyn TemplateResolver>,
    sanitizer: Box<dyn Sanitizer>,
    notifier: Box<dyn RefreshNotifier>,
    suggester: Box<dyn NameSuggester>,
}

impl OverrideListManager {
    /// Create a manager over previously saved overrides, using default services.
    pub fn new(saved: Vec<OverrideRecord>) -> Self {
        Self::builder().build(saved)
    }

    /// Create a builder for injecting host services.
    pub fn builder() -> ManagerBuilder {
        ManagerBuilder::new()
    }

    // ------------------------------------------------------------------------
    // List access
    // ------------------------------------------------------------------------

    /// The overrides, in match order.
    pub fn records(&self) -> &[OverrideRecord] {
        &self.overrides
    }

    pub fn get(&self, index: usize) -> Option<&OverrideRecord> {
        self.overrides.get(index)
    }

    /// Mutable access to one record's settings.
    ///
    /// Use [`update_threshold`](Self::update_threshold) for threshold edits so
    /// the table stays sorted.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut OverrideRecord> {
        self.overrides.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Consume the manager, returning the overrides for the host to store.
    pub fn into_records(self) -> Vec<OverrideRecord> {
        self.overrides
    }

    // ------------------------------------------------------------------------
    // List editing
    // ------------------------------------------------------------------------

    /// Append a record with default settings. Returns its index.
    pub fn add(&mut self) -> usize {
        self.overrides.push(OverrideRecord::default());
        let index = self.overrides.len() - 1;
        debug!(index, "Added override");
        index
    }

    /// Remove the first record equal to `record`.
    ///
    /// The host is asked to refresh whether or not anything was removed.
    pub fn remove(&mut self, record: &OverrideRecord) -> bool {
        let removed = match self.position(record) {
            Some(index) => {
                self.overrides.remove(index);
                debug!(index, pattern = %record.pattern, "Removed override");
                true
            }
            None => false,
        };
        self.notifier.refresh();
        removed
    }

    /// Remove the record at `index`. Asks the host to refresh.
    pub fn remove_at(&mut self, index: usize) -> Option<OverrideRecord> {
        let removed = (index < self.overrides.len()).then(|| self.overrides.remove(index));
        if removed.is_some() {
            debug!(index, "Removed override");
        }
        self.notifier.refresh();
        removed
    }

    /// Swap the record at `index` with its predecessor. No-op at the head.
    ///
    /// Records are addressed by position; unedited records compare equal.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.overrides.len() {
            return false;
        }
        self.swap(index, index - 1)
    }

    /// Swap the record at `index` with its successor. No-op at the tail.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.overrides.len().saturating_sub(1) {
            return false;
        }
        self.swap(index, index + 1)
    }

    fn swap(&mut self, from: usize, to: usize) -> bool {
        self.overrides.swap(from, to);
        debug!(from, to, "Moved override");
        self.notifier.refresh();
        true
    }

    fn position(&self, record: &OverrideRecord) -> Option<usize> {
        self.overrides.iter().position(|r| r == record)
    }

    /// Reverse the severity palette of the record at `index`.
    pub fn reverse_color_palette(&mut self, index: usize) -> bool {
        let Some(record) = self.overrides.get_mut(index) else {
            return false;
        };
        record.reverse_colors();
        self.notifier.refresh();
        true
    }

    /// Set the unit name used to format the record's value.
    pub fn set_unit_format(&mut self, index: usize, unit: impl Into<String>) -> bool {
        match self.overrides.get_mut(index) {
            Some(record) => {
                record.unit_format = unit.into();
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // Threshold editing
    // ------------------------------------------------------------------------

    /// Add a default threshold (`0`, OK, green) to the record at `index`.
    pub fn add_threshold(&mut self, index: usize) -> bool {
        let Some(record) = self.overrides.get_mut(index) else {
            return false;
        };
        record.thresholds.push_default();
        debug!(index, count = record.thresholds.len(), "Added threshold");
        self.notifier.refresh();
        true
    }

    /// Remove the first threshold equal to `threshold` from the record at `index`.
    ///
    /// The host is asked to refresh even when no threshold matched.
    pub fn remove_threshold(&mut self, index: usize, threshold: &Threshold) -> bool {
        let Some(record) = self.overrides.get_mut(index) else {
            return false;
        };
        let removed = record.thresholds.remove(threshold);
        self.notifier.refresh();
        removed
    }

    /// Edit one threshold of the record at `index` and re-sort the table.
    pub fn update_threshold<F>(&mut self, index: usize, threshold: usize, f: F) -> bool
    where
        F: FnOnce(&mut Threshold),
    {
        let updated = self
            .overrides
            .get_mut(index)
            .is_some_and(|record| record.thresholds.update(threshold, f));
        if updated {
            self.notifier.refresh();
        }
        updated
    }

    /// Reset a threshold's color to the canonical color of its severity.
    ///
    /// Thresholds in the no-data state keep their color.
    pub fn set_threshold_color(threshold: &mut Threshold) {
        threshold.apply_severity_color();
    }

    // ------------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------------

    /// Index of the first override whose pattern matches `name`.
    pub fn match_override(&self, name: &str) -> Option<usize> {
        engine::match_override(&self.overrides, self.patterns.as_ref(), name)
    }

    /// Color the override at `index` assigns to `value`.
    pub fn color_for_value(&self, index: usize, value: Option<&StatValue>) -> Option<&str> {
        self.overrides
            .get(index)
            .map(|record| engine::color_for(&record.thresholds, value))
    }

    /// Severity the override at `index` assigns to `value`.
    pub fn threshold_level_for_value(
        &self,
        index: usize,
        value: Option<&StatValue>,
    ) -> Option<Severity> {
        self.overrides
            .get(index)
            .map(|record| engine::severity_for(&record.thresholds, value))
    }

    /// Annotate every point matched by an override. Unmatched points are untouched.
    ///
    /// Returns the number of points annotated.
    pub fn apply_overrides(&self, data: &mut [MetricDataPoint]) -> usize {
        let compiled = CompiledPatterns::compile(&self.overrides, self.patterns.as_ref());
        let services = self.display_services();

        let mut matched = 0;
        for point in data.iter_mut() {
            if let Some(index) = compiled.first_match(&point.name) {
                engine::annotate(&self.overrides[index], point, services);
                matched += 1;
            }
        }

        debug!(matched, total = data.len(), "Applied overrides");
        matched
    }

    /// Known metric names, for pattern autocomplete.
    pub fn suggest_metric_names(&self) -> Vec<String> {
        self.suggester.suggest_names()
    }

    fn display_services(&self) -> DisplayServices<'_> {
        DisplayServices {
            formatters: self.formatters.as_ref(),
            templates: self.templates.as_ref(),
            sanitizer: self.sanitizer.as_ref(),
        }
    }
}

impl fmt::Debug for OverrideListManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideListManager")
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

/// Builder for [`OverrideListManager`].
///
/// Every service defaults to the built-in implementation: regex patterns,
/// the built-in unit formatters, no template variables, the URL sanitizer,
/// no refresh notifications and no name suggestions.
pub struct ManagerBuilder {
    patterns: Box<dyn PatternCompiler>,
    formatters: Box<dyn FormatterRegistry>,
    templates: Box<dyn TemplateResolver>,
    sanitizer: Box<dyn Sanitizer>,
    notifier: Box<dyn RefreshNotifier>,
    suggester: Box<dyn NameSuggester>,
}

impl ManagerBuilder {
    /// Create a builder with default services.
    pub fn new() -> Self {
        Self {
            patterns: Box::new(RegexPatternCompiler::new()),
            formatters: Box::new(BuiltinFormatters::new()),
            templates: Box::new(VariableTemplateResolver::new()),
            sanitizer: Box::new(UrlSanitizer::new()),
            notifier: Box::new(NoopRefresh),
            suggester: Box::new(NoSuggestions),
        }
    }

    pub fn pattern_compiler(mut self, compiler: impl PatternCompiler + 'static) -> Self {
        self.patterns = Box::new(compiler);
        self
    }

    pub fn formatters(mut self, formatters: impl FormatterRegistry + 'static) -> Self {
        self.formatters = Box::new(formatters);
        self
    }

    pub fn template_resolver(mut self, resolver: impl TemplateResolver + 'static) -> Self {
        self.templates = Box::new(resolver);
        self
    }

    pub fn sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    /// Called after structural changes so the host can re-render.
    pub fn refresh_notifier(mut self, notifier: impl RefreshNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn name_suggester(mut self, suggester: impl NameSuggester + 'static) -> Self {
        self.suggester = Box::new(suggester);
        self
    }

    /// Build the manager over previously saved overrides.
    pub fn build(self, saved: Vec<OverrideRecord>) -> OverrideListManager {
        OverrideListManager {
            overrides: saved,
            patterns: self.patterns,
            formatters: self.formatters,
            templates: self.templates,
            sanitizer: self.sanitizer,
            notifier: self.notifier,
            suggester: self.suggester,
        }
    }
}

impl Default for ManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
