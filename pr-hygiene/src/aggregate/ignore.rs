//! Ignore set for changed file paths.

use std::collections::BTreeSet;

/// Lockfiles that never count towards the hygiene limits.
pub const DEFAULT_IGNORED_FILES: [&str; 2] = ["yarn.lock", "package-lock.json"];

/// Deduplicated set of path fragments excluded from size counting.
///
/// Matching is substring containment: `"lock"` ignores every path with
/// `lock` anywhere in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    patterns: BTreeSet<String>,
}

impl IgnoreSet {
    /// Builds the effective set from user patterns plus [`DEFAULT_IGNORED_FILES`].
    pub fn with_defaults<I, S>(user_patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = DEFAULT_IGNORED_FILES
            .iter()
            .map(|pattern| (*pattern).to_string())
            .chain(user_patterns.into_iter().map(Into::into))
            .collect();
        Self { patterns }
    }

    /// Returns true if `filename` contains any pattern.
    #[must_use]
    pub fn is_ignored(&self, filename: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| filename.contains(pattern.as_str()))
    }

    /// Number of distinct patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::with_defaults(std::iter::empty::<String>())
    }
}
