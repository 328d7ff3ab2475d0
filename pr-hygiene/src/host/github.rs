//! GitHub implementation of [`ScmHost`] backed by octocrab.

use super::{FilesResponse, HostConnector, HostError, ScmHost, StatusTarget};
use crate::credentials::Credential;
use crate::report::{CheckResult, CheckStatus};
use async_trait::async_trait;
use http::header::{HeaderMap, HeaderValue, ACCEPT};
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info_span, Instrument};
use url::Url;

/// Media type requested from the REST API.
pub const GITHUB_JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Connects [`GitHubHost`] sessions to a configurable API base.
#[derive(Debug, Clone)]
pub struct GitHubConnector {
    api_base: Url,
}

impl GitHubConnector {
    /// Creates a connector for the given API base (e.g. `https://api.github.com`).
    pub fn new(api_base: Url) -> Self {
        Self { api_base }
    }
}

impl HostConnector for GitHubConnector {
    type Host = GitHubHost;

    fn connect(&self, credential: &Credential) -> Result<GitHubHost, HostError> {
        GitHubHost::connect(self.api_base.clone(), credential)
    }
}

/// One authenticated session against the GitHub REST API.
///
/// octocrab's own retry middleware is disabled; a request is sent exactly
/// once per call.
#[derive(Clone)]
pub struct GitHubHost {
    api_base: Url,
    client: Octocrab,
}

impl fmt::Debug for GitHubHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubHost")
            .field("api_base", &self.api_base.as_str())
            .finish_non_exhaustive()
    }
}

impl GitHubHost {
    /// Builds the client for `api_base` authenticated with `credential`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::GitHubError`] if the client cannot be built.
    pub fn connect(api_base: Url, credential: &Credential) -> Result<Self, HostError> {
        let client = Octocrab::builder()
            .base_uri(api_base.as_str())?
            .personal_token(credential.token().to_string())
            .add_retry_config(RetryConfig::None)
            .build()?;
        debug!(api = %api_base, credentials_id = credential.id(), "Connected to GitHub");

        Ok(Self { api_base, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base.as_str().trim_end_matches('/'))
    }

    async fn get_json(&self, url: &str) -> Result<(u16, String), HostError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON_MEDIA_TYPE));

        let response = self.client._get_with_headers(url, Some(headers)).await?;
        let status = response.status().as_u16();
        let body = self.client.body_to_string(response).await?;
        Ok((status, body))
    }
}

#[derive(Deserialize)]
struct PullRequestHead {
    head: CommitRef,
}

#[derive(Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Serialize)]
struct StatusPayload<'a> {
    state: &'a str,
    context: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_url: Option<&'a str>,
}

impl<'a> StatusPayload<'a> {
    fn new(result: &'a CheckResult) -> Self {
        let state = match result.status {
            CheckStatus::Success => "success",
            CheckStatus::Failure => "failure",
        };
        Self {
            state,
            context: &result.context,
            description: &result.description,
            target_url: result.target_url.as_deref(),
        }
    }
}

#[async_trait]
impl ScmHost for GitHubHost {
    fn files_url(&self, owner: &str, repo: &str, pr_number: u64) -> String {
        self.endpoint(&format!("/repos/{owner}/{repo}/pulls/{pr_number}/files"))
    }

    fn status_url(&self, target: &StatusTarget) -> String {
        self.endpoint(&format!(
            "/repos/{}/{}/statuses/{}",
            target.owner, target.repo, target.sha
        ))
    }

    async fn fetch_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<FilesResponse, HostError> {
        let url = self.files_url(owner, repo, pr_number);
        let span = info_span!("fetch_pr_files", url = %url);

        async {
            debug!("Requesting pull request files");
            let (status, body) = self.get_json(&url).await?;
            debug!(status, bytes = body.len(), "Received pull request files");

            Ok(FilesResponse {
                url: url.clone(),
                status,
                body,
            })
        }
        .instrument(span)
        .await
    }

    async fn head_sha(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<String, HostError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/pulls/{pr_number}"));
        let (status, body) = self.get_json(&url).await?;
        if !(200..300).contains(&status) {
            return Err(HostError::UnexpectedStatus { url, status });
        }

        let pull: PullRequestHead = serde_json::from_str(&body)
            .map_err(|source| HostError::InvalidBody { url, source })?;
        debug!(pr = pr_number, sha = %pull.head.sha, "Resolved pull request head");
        Ok(pull.head.sha)
    }

    async fn publish_status(
        &self,
        target: &StatusTarget,
        result: &CheckResult,
    ) -> Result<(), HostError> {
        let url = self.status_url(target);
        let response = self
            .client
            ._post(url.as_str(), Some(&StatusPayload::new(result)))
            .await?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(HostError::UnexpectedStatus { url, status });
        }
        Ok(())
    }
}
