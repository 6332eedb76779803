//! Do-nothing host hooks for standalone use.

use super::{NameSuggester, RefreshNotifier};

/// A refresh notifier that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRefresh;

impl RefreshNotifier for NoopRefresh {
    fn refresh(&self) {}
}

/// A name suggester that never suggests anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSuggestions;

impl NameSuggester for NoSuggestions {
    fn suggest_names(&self) -> Vec<String> {
        Vec::new()
    }
}
