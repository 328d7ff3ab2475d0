//! Preflight gate deciding whether a run reports at all.

use crate::config::HygieneConfig;
use crate::context::PR_BRANCH_MARKER;
use std::fmt;
use tracing::info;

/// Why a run ended without publishing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `disableStatusCheck` is set.
    Disabled,
    /// No branch name was supplied.
    MissingBranch,
    /// The branch is not a pull request build.
    NotPullRequest { branch: String },
    /// No repository owner was supplied.
    MissingOwner,
    /// No repository name was supplied.
    MissingRepo,
    /// The pull request number could not be determined.
    InvalidPullRequest { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("status checks are disabled"),
            Self::MissingBranch => f.write_str("branch name is not set"),
            Self::NotPullRequest { branch } => write!(
                f,
                "branch '{branch}' is not a pull request build (expected '{PR_BRANCH_MARKER}' prefix)"
            ),
            Self::MissingOwner => f.write_str("repository owner is not set"),
            Self::MissingRepo => f.write_str("repository name is not set"),
            Self::InvalidPullRequest { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluates the gate conditions in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the [`SkipReason`] of the first failing condition.
pub fn evaluate(
    config: &HygieneConfig,
    branch_name: &str,
    owner_name: &str,
    repo_name: &str,
) -> Result<(), SkipReason> {
    if config.disable_status_check() {
        return Err(SkipReason::Disabled);
    }
    if branch_name.trim().is_empty() {
        return Err(SkipReason::MissingBranch);
    }
    if !branch_name.starts_with(PR_BRANCH_MARKER) {
        return Err(SkipReason::NotPullRequest {
            branch: branch_name.to_string(),
        });
    }
    if owner_name.trim().is_empty() {
        return Err(SkipReason::MissingOwner);
    }
    if repo_name.trim().is_empty() {
        return Err(SkipReason::MissingRepo);
    }
    Ok(())
}

/// Returns true when the hygiene checks should run, logging why not otherwise.
pub fn should_run(
    config: &HygieneConfig,
    branch_name: &str,
    owner_name: &str,
    repo_name: &str,
) -> bool {
    match evaluate(config, branch_name, owner_name, repo_name) {
        Ok(()) => true,
        Err(reason) => {
            info!(reason = %reason, "Skipping hygiene checks");
            false
        }
    }
}
