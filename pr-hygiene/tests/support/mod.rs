//! Shared test doubles for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use pr_hygiene::{
    CheckResult, Credential, CredentialError, CredentialProvider, FilesResponse, HostConnector,
    HostError, PipelineEnv, ScmHost, StatusTarget,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BUILD_URL: &str = "https://ci.example.com/job/widgets/PR-7/1/";
pub const COMMIT_SHA: &str = "abc123";

/// Pipeline inputs for a pull request build of `acme/widgets`.
pub fn pr_env(branch: &str) -> PipelineEnv {
    PipelineEnv {
        branch_name: Some(branch.to_string()),
        owner: Some("acme".to_string()),
        repo: Some("widgets".to_string()),
        build_url: Some(BUILD_URL.to_string()),
        commit_sha: Some(COMMIT_SHA.to_string()),
        ..Default::default()
    }
}

/// JSON body of the files endpoint for the given file names.
pub fn files_body(names: &[&str]) -> String {
    let files: Vec<_> = names
        .iter()
        .map(|name| serde_json::json!({ "filename": name, "status": "modified" }))
        .collect();
    serde_json::to_string(&files).unwrap()
}

#[derive(Debug)]
struct HostState {
    files: Result<FilesResponse, String>,
    head_sha: String,
    failing_publishes: u32,
    connects: usize,
    fetch_calls: usize,
    head_calls: usize,
    publish_attempts: usize,
    published: Vec<(StatusTarget, CheckResult)>,
}

/// In-memory [`ScmHost`] recording every call.
#[derive(Debug, Clone)]
pub struct MockHost {
    state: Arc<Mutex<HostState>>,
}

impl MockHost {
    /// Host answering the files endpoint with `names`.
    pub fn with_files(names: &[&str]) -> Self {
        Self::with_response(200, &files_body(names))
    }

    /// Host answering the files endpoint with a raw status and body.
    pub fn with_response(status: u16, body: &str) -> Self {
        Self::from_files(Ok(FilesResponse {
            url: files_url(),
            status,
            body: body.to_string(),
        }))
    }

    /// Host whose files request fails without a response.
    pub fn unreachable() -> Self {
        Self::from_files(Err("connection refused".to_string()))
    }

    fn from_files(files: Result<FilesResponse, String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(HostState {
                files,
                head_sha: "def456".to_string(),
                failing_publishes: 0,
                connects: 0,
                fetch_calls: 0,
                head_calls: 0,
                publish_attempts: 0,
                published: Vec::new(),
            })),
        }
    }

    /// Makes the next `count` publish attempts fail.
    pub fn failing_publishes(self, count: u32) -> Self {
        self.state.lock().unwrap().failing_publishes = count;
        self
    }

    /// Sessions opened through [`HostConnector::connect`].
    pub fn connects(&self) -> usize {
        self.state.lock().unwrap().connects
    }

    pub fn fetch_calls(&self) -> usize {
        self.state.lock().unwrap().fetch_calls
    }

    pub fn head_calls(&self) -> usize {
        self.state.lock().unwrap().head_calls
    }

    pub fn publish_attempts(&self) -> usize {
        self.state.lock().unwrap().publish_attempts
    }

    /// Statuses recorded by successful publishes, in order.
    pub fn published(&self) -> Vec<(StatusTarget, CheckResult)> {
        self.state.lock().unwrap().published.clone()
    }

    pub fn total_calls(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.fetch_calls + state.head_calls + state.publish_attempts
    }
}

fn files_url() -> String {
    "https://api.github.com/repos/acme/widgets/pulls/7/files".to_string()
}

impl HostConnector for MockHost {
    type Host = MockHost;

    fn connect(&self, _credential: &Credential) -> Result<MockHost, HostError> {
        self.state.lock().unwrap().connects += 1;
        Ok(self.clone())
    }
}

#[async_trait]
impl ScmHost for MockHost {
    fn files_url(&self, owner: &str, repo: &str, pr_number: u64) -> String {
        format!("https://api.github.com/repos/{owner}/{repo}/pulls/{pr_number}/files")
    }

    fn status_url(&self, target: &StatusTarget) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/statuses/{}",
            target.owner, target.repo, target.sha
        )
    }

    async fn fetch_pull_request_files(
        &self,
        _owner: &str,
        _repo: &str,
        _pr_number: u64,
    ) -> Result<FilesResponse, HostError> {
        let mut state = self.state.lock().unwrap();
        state.fetch_calls += 1;
        state
            .files
            .clone()
            .map_err(|message| HostError::Other { message })
    }

    async fn head_sha(
        &self,
        _owner: &str,
        _repo: &str,
        _pr_number: u64,
    ) -> Result<String, HostError> {
        let mut state = self.state.lock().unwrap();
        state.head_calls += 1;
        Ok(state.head_sha.clone())
    }

    async fn publish_status(
        &self,
        target: &StatusTarget,
        result: &CheckResult,
    ) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.publish_attempts += 1;
        if state.failing_publishes > 0 {
            state.failing_publishes -= 1;
            return Err(HostError::Other {
                message: "502 Bad Gateway".to_string(),
            });
        }
        state.published.push((target.clone(), result.clone()));
        Ok(())
    }
}

/// Credential provider handing out a fixed token and counting lookups.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    lookups: Arc<AtomicUsize>,
}

impl StaticCredentials {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl CredentialProvider for StaticCredentials {
    fn acquire(&self, credentials_id: &str) -> Result<Credential, CredentialError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(Credential::new(credentials_id, "test-token"))
    }
}

/// Credential provider that never finds a token.
#[derive(Debug, Clone, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn acquire(&self, credentials_id: &str) -> Result<Credential, CredentialError> {
        Err(CredentialError::NotFound {
            id: credentials_id.to_string(),
            searched: vec!["GITHUB_TOKEN".to_string()],
        })
    }
}
