//! Status reporting error types.

use crate::host::HostError;
use thiserror::Error;

/// Errors that can occur while publishing a check.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Every publish attempt failed.
    #[error("Failed to publish '{context}' to {url} after {attempts} attempts: {source}")]
    PublishFailed {
        context: String,
        /// Status endpoint the attempts were sent to.
        url: String,
        sha: String,
        attempts: u32,
        #[source]
        source: HostError,
    },
}
