//! Link sanitizer.

use std::sync::LazyLock;

use regex::Regex;

use super::Sanitizer;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z][A-Za-z0-9+.\-]*):").expect("scheme regex"));

const SAFE_SCHEMES: &[&str] = &["http", "https", "ftp", "mailto", "tel", "file"];

/// Strips markup, neutralizes unsafe schemes and escapes HTML entities.
///
/// Links with a scheme outside `http`, `https`, `ftp`, `mailto`, `tel` and
/// `file` are prefixed with `unsafe:`. Relative links pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlSanitizer;

impl UrlSanitizer {
    /// Create a new sanitizer.
    pub fn new() -> Self {
        Self
    }
}

impl Sanitizer for UrlSanitizer {
    fn sanitize(&self, url: &str) -> String {
        let stripped = TAG.replace_all(url, "");
        let stripped = stripped.trim();

        let unsafe_scheme = SCHEME.captures(stripped).is_some_and(|caps| {
            let scheme = caps[1].to_ascii_lowercase();
            !SAFE_SCHEMES.contains(&scheme.as_str())
        });

        let mut out = String::with_capacity(stripped.len() + 8);
        if unsafe_scheme {
            out.push_str("unsafe:");
        }
        for c in stripped.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                other => out.push(other),
            }
        }
        out
    }
}
