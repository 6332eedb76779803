//! Regex-backed pattern compiler.
//!
//! Two pattern forms are accepted:
//!
//! - `/body/flags`: `body` is used as written; flags `i`, `m` and `s` are
//!   honoured, `g`, `u` and `y` are accepted and ignored
//! - anything else: anchored as `^pattern$`

use regex::{Regex, RegexBuilder};

use super::{PatternCompiler, PatternMatcher};
use crate::error::OverridesError;

const KNOWN_FLAGS: &str = "gimsuy";

/// Compiles override patterns with the `regex` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexPatternCompiler;

impl RegexPatternCompiler {
    /// Create a new compiler.
    pub fn new() -> Self {
        Self
    }

    /// Compile `pattern` into a [`Regex`].
    pub fn compile_regex(&self, pattern: &str) -> Result<Regex, OverridesError> {
        let invalid = |reason: String| OverridesError::Pattern {
            pattern: pattern.to_string(),
            reason,
        };

        let Some(delimited) = pattern.strip_prefix('/') else {
            return Regex::new(&format!("^{}$", pattern)).map_err(|e| invalid(e.to_string()));
        };

        let (body, flags) = delimited
            .rsplit_once('/')
            .ok_or_else(|| invalid("missing closing '/'".to_string()))?;

        if let Some(flag) = flags.chars().find(|c| !KNOWN_FLAGS.contains(*c)) {
            return Err(invalid(format!("unknown flag '{}'", flag)));
        }

        RegexBuilder::new(body)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .map_err(|e| invalid(e.to_string()))
    }
}

impl PatternCompiler for RegexPatternCompiler {
    fn compile(&self, pattern: &str) -> Result<Box<dyn PatternMatcher>, OverridesError> {
        Ok(Box::new(self.compile_regex(pattern)?))
    }
}

impl PatternMatcher for Regex {
    fn match_count(&self, text: &str) -> usize {
        self.find_iter(text).count()
    }

    fn is_match(&self, text: &str) -> bool {
        Regex::is_match(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, text: &str) -> bool {
        RegexPatternCompiler::new()
            .compile(pattern)
            .unwrap()
            .is_match(text)
    }

    #[test]
    fn plain_patterns_are_anchored() {
        assert!(matches("cpu.*", "cpu_usage"));
        assert!(!matches("cpu", "cpu_usage"));
        assert!(!matches("usage", "cpu_usage"));
        assert!(matches("cpu_usage", "cpu_usage"));
    }

    #[test]
    fn empty_pattern_matches_only_empty_name() {
        assert!(matches("", ""));
        assert!(!matches("", "cpu"));
    }

    #[test]
    fn delimited_patterns_are_unanchored() {
        assert!(matches("/usage/", "cpu_usage"));
        assert!(!matches("/^usage/", "cpu_usage"));
    }

    #[test]
    fn delimited_flags() {
        assert!(!matches("/CPU/", "cpu_usage"));
        assert!(matches("/CPU/i", "cpu_usage"));
        assert!(matches("/a.b/s", "a\nb"));
        assert!(matches("/usage/g", "cpu_usage"));
    }

    #[test]
    fn body_may_contain_slashes() {
        assert!(matches("/disk/sda/", "host.disk/sda.io"));
    }

    #[test]
    fn match_count_counts_every_occurrence() {
        let matcher = RegexPatternCompiler::new().compile("/a/g").unwrap();
        assert_eq!(matcher.match_count("banana"), 3);
        assert_eq!(matcher.match_count("xyz"), 0);
    }

    #[test]
    fn invalid_patterns_are_errors() {
        let compiler = RegexPatternCompiler::new();
        assert!(matches!(
            compiler.compile("cpu("),
            Err(OverridesError::Pattern { .. })
        ));
        assert!(compiler.compile("/unterminated").is_err());
        assert!(compiler.compile("/cpu/x").is_err());
    }
}
