//! Terminal states of a run.

use super::RunnerError;
use crate::aggregate::ChangeCounts;
use crate::preflight::SkipReason;
use crate::report::{CheckResult, CheckStatus, ReportError};

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The preflight gate declined the run; nothing was fetched or published.
    Skipped(SkipReason),

    /// Fetching failed; nothing was published.
    Aborted(RunnerError),

    /// Both checks were decided. `published` is false for dry runs.
    Completed {
        counts: ChangeCounts,
        checks: Vec<CheckResult>,
        published: bool,
    },

    /// A publish exhausted its retries. `published` holds the checks that
    /// made it before the failure.
    PublishFailed {
        counts: ChangeCounts,
        published: Vec<CheckResult>,
        error: ReportError,
    },
}

impl RunOutcome {
    /// Short machine-friendly label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped(_) => "skipped",
            Self::Aborted(_) => "aborted",
            Self::Completed {
                published: false, ..
            } => "dry_run",
            Self::Completed { .. } => "completed",
            Self::PublishFailed { .. } => "publish_failed",
        }
    }

    /// Counters, when aggregation ran.
    #[must_use]
    pub fn counts(&self) -> Option<ChangeCounts> {
        match self {
            Self::Completed { counts, .. } | Self::PublishFailed { counts, .. } => Some(*counts),
            Self::Skipped(_) | Self::Aborted(_) => None,
        }
    }

    /// Checks that were decided (and published, unless a dry run).
    #[must_use]
    pub fn checks(&self) -> &[CheckResult] {
        match self {
            Self::Completed { checks, .. } => checks,
            Self::PublishFailed { published, .. } => published,
            Self::Skipped(_) | Self::Aborted(_) => &[],
        }
    }

    /// Returns true if any decided check is a failure.
    #[must_use]
    pub fn has_failing_check(&self) -> bool {
        self.checks()
            .iter()
            .any(|check| check.status == CheckStatus::Failure)
    }
}
