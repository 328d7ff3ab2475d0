//! Check status types.

use serde::Serialize;
use std::fmt;

/// Status context of the changed-files check.
pub const FILES_CHANGED_CONTEXT: &str = "Files Changed Check";

/// Status context of the changed-lines check.
pub const LINES_CHANGED_CONTEXT: &str = "Lines Changed Check";

/// Outcome of comparing a counter against its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Success,
    Failure,
}

impl CheckStatus {
    /// `Failure` only when `actual` is strictly greater than `limit`.
    #[must_use]
    pub fn decide(actual: u64, limit: u64) -> Self {
        if actual > limit {
            Self::Failure
        } else {
            Self::Success
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A counter paired with its configured limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitCheck {
    /// Status context the result is published under.
    pub context: &'static str,
    /// Human-readable description including actual and limit.
    pub description: String,
    pub actual: u64,
    pub limit: u64,
}

impl LimitCheck {
    /// The "Files Changed Check".
    #[must_use]
    pub fn files_changed(actual: u64, limit: u64) -> Self {
        Self {
            context: FILES_CHANGED_CONTEXT,
            description: format!("{actual} files changed (limit {limit})"),
            actual,
            limit,
        }
    }

    /// The "Lines Changed Check".
    #[must_use]
    pub fn lines_changed(actual: u64, limit: u64) -> Self {
        Self {
            context: LINES_CHANGED_CONTEXT,
            description: format!("{actual} lines added + deleted (limit {limit})"),
            actual,
            limit,
        }
    }

    #[must_use]
    pub fn status(&self) -> CheckStatus {
        CheckStatus::decide(self.actual, self.limit)
    }

    /// Resolves the check into the result that gets published.
    #[must_use]
    pub fn into_result(self, target_url: Option<String>) -> CheckResult {
        CheckResult {
            status: self.status(),
            context: self.context.to_string(),
            description: self.description,
            target_url,
        }
    }
}

/// A single status as published to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub context: String,
    pub status: CheckStatus,
    pub description: String,
    pub target_url: Option<String>,
}
