//! Changed file records and counters.

use serde::{Deserialize, Serialize};

/// One entry of the pull request files endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFile {
    /// Path of the file relative to the repository root.
    pub filename: String,

    /// Lines added. Absent in some payloads.
    #[serde(default)]
    pub additions: u64,

    /// Lines deleted. Absent in some payloads.
    #[serde(default)]
    pub deletions: u64,
}

impl ChangedFile {
    /// Creates a record with no line counts.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            additions: 0,
            deletions: 0,
        }
    }
}

/// How the changed-line counter is derived from each counted file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineCountStrategy {
    /// One unit per counted file, so the line counter mirrors the file counter.
    #[default]
    PerFile,

    /// `additions + deletions` of each counted file.
    AddedDeleted,
}

impl LineCountStrategy {
    /// Line units contributed by a single counted file.
    #[must_use]
    pub fn lines_for(self, file: &ChangedFile) -> u64 {
        match self {
            Self::PerFile => 1,
            Self::AddedDeleted => file.additions.saturating_add(file.deletions),
        }
    }
}

/// Result of aggregating a pull request's changed files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeCounts {
    pub changed_file_count: u64,
    pub changed_line_count: u64,
}
