//! Host-provided services the override engine delegates to.
//!
//! The engine owns ordering, matching policy and threshold resolution. Pattern
//! syntax, unit formatting, template variables, URL sanitizing and UI refresh
//! belong to the host, so each sits behind a trait. Default implementations
//! are provided for standalone use.

mod format;
mod notify;
mod pattern;
mod sanitize;
mod template;

pub use format::{round_value, to_fixed, BuiltinFormatters, MAX_DECIMALS};
pub use notify::{NoSuggestions, NoopRefresh};
pub use pattern::RegexPatternCompiler;
pub use sanitize::UrlSanitizer;
pub use template::VariableTemplateResolver;

use crate::error::OverridesError;

/// A compiled metric name pattern.
pub trait PatternMatcher {
    /// Number of non-overlapping matches in `text`.
    fn match_count(&self, text: &str) -> usize;

    /// Whether `text` matches at least once.
    fn is_match(&self, text: &str) -> bool {
        self.match_count(text) > 0
    }
}

/// Turns an override's pattern string into a matcher.
///
/// The dialect (anchoring, flags, case sensitivity) is entirely up to the
/// implementation.
pub trait PatternCompiler {
    fn compile(&self, pattern: &str) -> Result<Box<dyn PatternMatcher>, OverridesError>;
}

/// Formats a value for one unit.
pub trait ValueFormatter {
    /// Format `value` with the given precision. A missing value formats to `""`.
    fn format(&self, value: Option<f64>, decimals: Option<u32>, scaled_decimals: Option<u32>)
        -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(Option<f64>, Option<u32>, Option<u32>) -> String,
{
    fn format(
        &self,
        value: Option<f64>,
        decimals: Option<u32>,
        scaled_decimals: Option<u32>,
    ) -> String {
        self(value, decimals, scaled_decimals)
    }
}

/// Unit name to formatter lookup.
pub trait FormatterRegistry {
    /// The formatter for `unit`, or `None` if the unit is unknown.
    fn lookup(&self, unit: &str) -> Option<&dyn ValueFormatter>;

    /// Round `value` to `decimals` places.
    fn round_value(&self, value: f64, decimals: Option<u32>) -> f64 {
        round_value(value, decimals)
    }
}

/// Substitutes template variables in click-through links.
pub trait TemplateResolver {
    /// Replace every known variable in `text` with its display text.
    fn replace_with_text(&self, text: &str) -> String;
}

/// Makes a resolved link safe to render.
pub trait Sanitizer {
    fn sanitize(&self, url: &str) -> String;
}

/// Tells the host to re-render after a structural change.
pub trait RefreshNotifier {
    fn refresh(&self);
}

impl<F: Fn()> RefreshNotifier for F {
    fn refresh(&self) {
        self()
    }
}

/// Supplies known metric names for pattern autocomplete.
pub trait NameSuggester {
    fn suggest_names(&self) -> Vec<String>;
}

impl<F: Fn() -> Vec<String>> NameSuggester for F {
    fn suggest_names(&self) -> Vec<String> {
        self()
    }
}
