//! Runner error types.

use crate::aggregate::AggregateError;
use crate::credentials::CredentialError;
use crate::host::HostError;

/// Errors that abort a run before any status is published.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// No credential could be acquired.
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// No host session could be opened with the acquired credential.
    #[error("Failed to connect to the source-control host: {0}")]
    Connect(#[source] HostError),

    /// Fetching or parsing the pull request files failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// The head commit to attach statuses to could not be resolved.
    #[error("Failed to resolve head commit of {pull_request}: {source}")]
    HeadCommit {
        pull_request: String,
        #[source]
        source: HostError,
    },
}
