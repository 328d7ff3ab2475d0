//! Source-control host error types.

use thiserror::Error;

/// Errors raised by a [`ScmHost`](super::ScmHost) implementation.
#[derive(Debug, Error)]
pub enum HostError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The host answered with a non-success status.
    #[error("{url} answered HTTP {status}")]
    UnexpectedStatus { url: String, status: u16 },

    /// The host answered with a body that could not be decoded.
    #[error("Unexpected response body from {url}: {source}")]
    InvalidBody {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failure reported by a non-GitHub host implementation.
    #[error("{message}")]
    Other { message: String },
}
