//! First-match lookup of overrides by metric name.

use overrides_types::OverrideRecord;
use tracing::warn;

use crate::services::{PatternCompiler, PatternMatcher};

/// Index of the first record whose pattern matches `name`.
///
/// Patterns are compiled on every call. Records whose pattern fails to
/// compile never match.
pub fn match_override(
    records: &[OverrideRecord],
    compiler: &dyn PatternCompiler,
    name: &str,
) -> Option<usize> {
    records.iter().position(|record| match compiler.compile(&record.pattern) {
        Ok(matcher) => matcher.is_match(name),
        Err(e) => {
            warn!(pattern = %record.pattern, error = %e, "Skipping override with invalid pattern");
            false
        }
    })
}

/// The patterns of an override list, compiled once for a whole refresh pass.
pub struct CompiledPatterns {
    matchers: Vec<Option<Box<dyn PatternMatcher>>>,
}

impl CompiledPatterns {
    /// Compile every record's pattern, in list order.
    pub fn compile(records: &[OverrideRecord], compiler: &dyn PatternCompiler) -> Self {
        let matchers = records
            .iter()
            .map(|record| match compiler.compile(&record.pattern) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    warn!(pattern = %record.pattern, error = %e, "Skipping override with invalid pattern");
                    None
                }
            })
            .collect();
        Self { matchers }
    }

    /// Index of the first pattern matching `name`.
    pub fn first_match(&self, name: &str) -> Option<usize> {
        self.matchers
            .iter()
            .position(|m| m.as_ref().is_some_and(|m| m.is_match(name)))
    }

    /// Number of compiled slots (one per record).
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RegexPatternCompiler;

    fn records(patterns: &[&str]) -> Vec<OverrideRecord> {
        patterns.iter().map(|p| OverrideRecord::with_pattern(*p)).collect()
    }

    #[test]
    fn first_matching_record_wins() {
        let list = records(&["cpu.*", "mem.*"]);
        let compiler = RegexPatternCompiler::new();
        assert_eq!(match_override(&list, &compiler, "cpu_usage"), Some(0));
        assert_eq!(match_override(&list, &compiler, "mem_free"), Some(1));
        assert_eq!(match_override(&list, &compiler, "disk_io"), None);
    }

    #[test]
    fn earlier_record_shadows_later_one() {
        let list = records(&["cpu_.*", "cpu_usage"]);
        let compiler = RegexPatternCompiler::new();
        assert_eq!(match_override(&list, &compiler, "cpu_usage"), Some(0));
    }

    #[test]
    fn invalid_pattern_is_skipped() {
        let list = records(&["cpu(", "cpu.*"]);
        let compiler = RegexPatternCompiler::new();
        assert_eq!(match_override(&list, &compiler, "cpu_usage"), Some(1));
    }

    #[test]
    fn empty_list_matches_nothing() {
        let compiler = RegexPatternCompiler::new();
        assert_eq!(match_override(&[], &compiler, "cpu_usage"), None);
        assert!(CompiledPatterns::compile(&[], &compiler).is_empty());
    }

    #[test]
    fn compiled_patterns_agree_with_match_override() {
        let list = records(&["/^disk/", "cpu(", "cpu.*", "mem.*"]);
        let compiler = RegexPatternCompiler::new();
        let compiled = CompiledPatterns::compile(&list, &compiler);
        assert_eq!(compiled.len(), 4);

        for name in ["disk_io", "cpu_usage", "mem_free", "net_rx", ""] {
            assert_eq!(
                compiled.first_match(name),
                match_override(&list, &compiler, name),
                "{name}"
            );
        }
    }
}
