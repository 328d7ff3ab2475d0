//! Aggregation error types.

use thiserror::Error;

/// Errors that abort a run before any status is published.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The files endpoint could not be reached or answered with a non-success status.
    ///
    /// `status` is `None` when no HTTP response was received.
    #[error("Pull request files endpoint unavailable at '{url}': {message}")]
    ApiUnavailable {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// The files endpoint answered with an empty, null, or malformed body.
    #[error("Invalid pull request files response from '{url}': {message}")]
    InvalidResponse { url: String, message: String },
}
