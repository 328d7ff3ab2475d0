//! Run summary types.

use crate::aggregate::ChangeCounts;
use crate::report::CheckResult;
use crate::runner::RunOutcome;
use serde::Serialize;

/// Serializable summary of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Outcome label (see [`RunOutcome::label`]).
    pub outcome: &'static str,

    /// Skip or failure reason, when the run did not complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Aggregated counters, when aggregation ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<ChangeCounts>,

    /// Checks decided during the run.
    pub checks: Vec<CheckResult>,
}

impl RunSummary {
    /// Creates a summary of the given outcome.
    #[must_use]
    pub fn new(outcome: &RunOutcome) -> Self {
        let reason = match outcome {
            RunOutcome::Skipped(reason) => Some(reason.to_string()),
            RunOutcome::Aborted(error) => Some(error.to_string()),
            RunOutcome::PublishFailed { error, .. } => Some(error.to_string()),
            RunOutcome::Completed { .. } => None,
        };

        Self {
            outcome: outcome.label(),
            reason,
            counts: outcome.counts(),
            checks: outcome.checks().to_vec(),
        }
    }
}

impl From<&RunOutcome> for RunSummary {
    fn from(outcome: &RunOutcome) -> Self {
        Self::new(outcome)
    }
}
