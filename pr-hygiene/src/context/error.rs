//! Pull request context error types.

use thiserror::Error;

/// Errors that prevent building a [`PullRequestContext`](super::PullRequestContext).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// Owner or repository name is empty.
    #[error("Missing {field}")]
    MissingField { field: &'static str },

    /// Neither the branch name nor the change id yields a PR number.
    #[error("No pull request number in branch '{branch}' or change id '{change_id}'")]
    MissingPullRequestNumber { branch: String, change_id: String },

    /// The PR number is not a non-empty run of ASCII digits.
    #[error("Invalid pull request number '{value}'")]
    InvalidPullRequestNumber { value: String },
}
