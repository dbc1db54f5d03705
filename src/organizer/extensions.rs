//! Extension allow-list.

use std::collections::BTreeSet;
use std::path::Path;

/// Normalized (lower-cased, dot-prefixed) extensions; membership is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    exts: BTreeSet<String>,
}

impl ExtensionSet {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let exts = items
            .into_iter()
            .filter_map(|s| normalize(s.as_ref()))
            .collect();
        Self { exts }
    }

    /// Build from a comma-separated list such as ".avi, MKV,.mpg".
    pub fn from_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exts.len()
    }

    /// Membership test for an extension given with or without its leading dot.
    pub fn contains_ext(&self, ext: &str) -> bool {
        normalize(ext).is_some_and(|e| self.exts.contains(&e))
    }

    /// True if the final extension of `path` is in the set.
    /// Names without an extension (including dotfiles like ".env") never match.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|e| self.contains_ext(&e.to_string_lossy()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.exts.iter().map(String::as_str)
    }
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}
