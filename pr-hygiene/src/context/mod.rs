//! Pipeline inputs and the pull request they identify.

mod error;

pub use error::ContextError;

/// Branch-name prefix used by the CI runner for pull request builds.
pub const PR_BRANCH_MARKER: &str = "PR-";

/// Inputs supplied by the CI runner for one build.
///
/// Every field is optional here; the preflight gate and
/// [`PullRequestContext::from_env`] decide what is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineEnv {
    /// Branch being built (`PR-<n>` for pull request builds).
    pub branch_name: Option<String>,
    /// Repository owner (user or organization).
    pub owner: Option<String>,
    /// Repository name.
    pub repo: Option<String>,
    /// Change id reported by the runner, used when the branch carries no number.
    pub change_id: Option<String>,
    /// Build page URL.
    pub build_url: Option<String>,
    /// Alternate run display URL, preferred over `build_url` as status link.
    pub run_display_url: Option<String>,
    /// Commit being built. Resolved from the pull request head when absent.
    pub commit_sha: Option<String>,
}

impl PipelineEnv {
    pub fn branch_name(&self) -> &str {
        non_blank(&self.branch_name).unwrap_or_default()
    }

    pub fn owner(&self) -> &str {
        non_blank(&self.owner).unwrap_or_default()
    }

    pub fn repo(&self) -> &str {
        non_blank(&self.repo).unwrap_or_default()
    }

    /// Link attached to published statuses.
    pub fn target_url(&self) -> Option<&str> {
        non_blank(&self.run_display_url).or_else(|| non_blank(&self.build_url))
    }

    pub fn commit_sha(&self) -> Option<&str> {
        non_blank(&self.commit_sha)
    }
}

/// Identity of the pull request a run reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
    /// Link attached to published statuses.
    pub target_url: Option<String>,
    /// Commit statuses are attached to, when known up front.
    pub head_sha: Option<String>,
}

impl PullRequestContext {
    /// Builds the context from pipeline inputs.
    ///
    /// The PR number is taken from the branch name after [`PR_BRANCH_MARKER`]
    /// and falls back to the change id.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError`] if owner or repo is empty, or no numeric PR
    /// number can be found.
    pub fn from_env(env: &PipelineEnv) -> Result<Self, ContextError> {
        let owner = env.owner();
        if owner.is_empty() {
            return Err(ContextError::MissingField { field: "owner" });
        }
        let repo = env.repo();
        if repo.is_empty() {
            return Err(ContextError::MissingField { field: "repo" });
        }

        let pr_number = resolve_pr_number(env.branch_name(), non_blank(&env.change_id))?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            pr_number,
            target_url: env.target_url().map(str::to_string),
            head_sha: env.commit_sha().map(str::to_string),
        })
    }

    /// `owner/repo#number`, for logs.
    pub fn display_name(&self) -> String {
        format!("{}/{}#{}", self.owner, self.repo, self.pr_number)
    }
}

/// Picks the PR number from `PR-<n>` or the change id.
fn resolve_pr_number(branch_name: &str, change_id: Option<&str>) -> Result<u64, ContextError> {
    let from_branch = branch_name
        .strip_prefix(PR_BRANCH_MARKER)
        .map(str::trim)
        .filter(|rest| !rest.is_empty());

    match from_branch.or(change_id.map(str::trim)) {
        Some(candidate) => parse_pr_number(candidate),
        None => Err(ContextError::MissingPullRequestNumber {
            branch: branch_name.to_string(),
            change_id: change_id.unwrap_or_default().to_string(),
        }),
    }
}

fn parse_pr_number(value: &str) -> Result<u64, ContextError> {
    let invalid = || ContextError::InvalidPullRequestNumber {
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse::<u64>().map_err(|_| invalid())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
