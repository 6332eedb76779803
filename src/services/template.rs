//! Template variable substitution for click-through links.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::TemplateResolver;

/// `$var`, `[[var]]`, `[[var:fmt]]`, `${var}`, `${var.field}` and `${var:fmt}`.
static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\w+)|\[\[([\s\S]+?)(?::(\w+))?\]\]|\$\{(\w+)(?:\.([^:^\}]+))?(?::(\w+))?\}")
        .expect("template variable regex")
});

/// Resolves template variables from a fixed name to text map.
///
/// Variables with no entry are left exactly as written.
#[derive(Debug, Clone, Default)]
pub struct VariableTemplateResolver {
    variables: BTreeMap<String, String>,
}

impl VariableTemplateResolver {
    /// Create a resolver with no variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable.
    pub fn with_variable(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(name, text);
        self
    }

    /// Add or replace a variable.
    pub fn set(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.variables.insert(name.into(), text.into());
    }

    /// Current text of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }
}

impl From<BTreeMap<String, String>> for VariableTemplateResolver {
    fn from(variables: BTreeMap<String, String>) -> Self {
        Self { variables }
    }
}

impl TemplateResolver for VariableTemplateResolver {
    fn replace_with_text(&self, text: &str) -> String {
        VARIABLE
            .replace_all(text, |caps: &Captures<'_>| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(4))
                    .map_or("", |m| m.as_str());
                match self.variables.get(name) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}
