//! Source-control host access.
//!
//! [`ScmHost`] is the seam between the hygiene logic and GitHub. A
//! [`HostConnector`] opens one [`ScmHost`] session per run from the run's
//! [`Credential`]. The production implementations are [`GitHubConnector`]
//! and [`GitHubHost`]; tests substitute an in-memory double.

mod error;
mod github;

pub use error::HostError;
pub use github::{GitHubConnector, GitHubHost, GITHUB_JSON_MEDIA_TYPE};

use crate::credentials::Credential;
use crate::report::CheckResult;
use async_trait::async_trait;

/// Raw answer of the pull request files endpoint.
///
/// The body is kept unparsed so the aggregator can tell an unavailable
/// endpoint apart from an invalid payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesResponse {
    /// Absolute URL that was requested.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl FilesResponse {
    /// Returns true for 2xx status codes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Where a commit status is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTarget {
    pub owner: String,
    pub repo: String,
    /// Commit the status is attached to.
    pub sha: String,
}

/// Opens a host session for one run.
pub trait HostConnector: Send + Sync {
    type Host: ScmHost;

    /// Connects using the credential acquired for the run.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the client cannot be built.
    fn connect(&self, credential: &Credential) -> Result<Self::Host, HostError>;
}

/// Operations the hygiene checker needs from the source-control host.
///
/// Implementations must not retry on their own; the single retry layer is
/// [`RetryPolicy`](crate::report::RetryPolicy) around publishing.
#[async_trait]
pub trait ScmHost: Send + Sync {
    /// Builds the absolute URL of the pull request files endpoint.
    fn files_url(&self, owner: &str, repo: &str, pr_number: u64) -> String;

    /// Builds the absolute URL of the commit status endpoint.
    fn status_url(&self, target: &StatusTarget) -> String;

    /// Issues a single GET for the first page of a pull request's files.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if no HTTP response was received. Non-success
    /// statuses are returned as a [`FilesResponse`].
    async fn fetch_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<FilesResponse, HostError>;

    /// Looks up the head commit SHA of a pull request.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the lookup fails.
    async fn head_sha(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<String, HostError>;

    /// Publishes one commit status with a single request.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the status could not be created.
    async fn publish_status(
        &self,
        target: &StatusTarget,
        result: &CheckResult,
    ) -> Result<(), HostError>;
}
