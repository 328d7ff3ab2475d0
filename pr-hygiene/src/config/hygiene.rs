//! Hygiene check configuration.

use crate::aggregate::{IgnoreSet, LineCountStrategy};
use crate::config::ConfigError;
use serde::Deserialize;
use url::Url;

/// Credential id used when none is configured.
pub const DEFAULT_CREDENTIALS_ID: &str = "github-credentials";

/// Default limit for the changed-files check.
pub const DEFAULT_FILE_COUNT_LIMIT: u64 = 10;

/// Default limit for the changed-lines check.
pub const DEFAULT_LINE_COUNT_LIMIT: u64 = 300;

/// Default GitHub REST API base.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Configuration file contents before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RawConfig {
    #[serde(default)]
    disable_status_check: bool,

    #[serde(default = "default_credentials_id")]
    github_credentials_id: String,

    #[serde(default = "default_file_count_limit")]
    changed_file_count_limit: u64,

    #[serde(default = "default_line_count_limit")]
    changed_line_count_limit: u64,

    #[serde(default)]
    list_of_file_paths_to_be_ignored: Vec<String>,

    #[serde(default = "default_github_api_url")]
    github_api_url: String,

    #[serde(default)]
    line_count_strategy: LineCountStrategy,
}

fn default_credentials_id() -> String {
    DEFAULT_CREDENTIALS_ID.to_string()
}

fn default_file_count_limit() -> u64 {
    DEFAULT_FILE_COUNT_LIMIT
}

fn default_line_count_limit() -> u64 {
    DEFAULT_LINE_COUNT_LIMIT
}

fn default_github_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

impl RawConfig {
    /// Validates the raw values into a [`HygieneConfig`].
    ///
    /// `origin` names the source in error messages.
    pub(crate) fn validate(self, origin: &str) -> Result<HygieneConfig, ConfigError> {
        let validation = |message: String| ConfigError::ValidationError {
            path: origin.to_string(),
            message,
        };

        let credentials_id = self.github_credentials_id.trim().to_string();
        if credentials_id.is_empty() {
            return Err(validation("githubCredentialsId must not be empty".to_string()));
        }

        if let Some(index) = self
            .list_of_file_paths_to_be_ignored
            .iter()
            .position(|pattern| pattern.is_empty())
        {
            return Err(validation(format!(
                "listOfFilePathsToBeIgnored[{index}] is empty and would ignore every file"
            )));
        }

        let github_api_url = Url::parse(&self.github_api_url).map_err(|e| {
            validation(format!("githubApiUrl '{}' is invalid: {e}", self.github_api_url))
        })?;
        if !matches!(github_api_url.scheme(), "http" | "https") {
            return Err(validation(format!(
                "githubApiUrl '{}' must use http or https",
                self.github_api_url
            )));
        }

        Ok(HygieneConfig {
            disable_status_check: self.disable_status_check,
            github_credentials_id: credentials_id,
            changed_file_count_limit: self.changed_file_count_limit,
            changed_line_count_limit: self.changed_line_count_limit,
            ignore_set: IgnoreSet::with_defaults(self.list_of_file_paths_to_be_ignored),
            github_api_url,
            line_count_strategy: self.line_count_strategy,
        })
    }
}

/// Validated, immutable configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HygieneConfig {
    disable_status_check: bool,
    github_credentials_id: String,
    changed_file_count_limit: u64,
    changed_line_count_limit: u64,
    ignore_set: IgnoreSet,
    github_api_url: Url,
    line_count_strategy: LineCountStrategy,
}

impl HygieneConfig {
    /// Returns whether all checks are skipped.
    pub fn disable_status_check(&self) -> bool {
        self.disable_status_check
    }

    /// Returns the credential lookup key.
    pub fn github_credentials_id(&self) -> &str {
        &self.github_credentials_id
    }

    /// Returns the limit for the changed-files check.
    pub fn changed_file_count_limit(&self) -> u64 {
        self.changed_file_count_limit
    }

    /// Returns the limit for the changed-lines check.
    pub fn changed_line_count_limit(&self) -> u64 {
        self.changed_line_count_limit
    }

    /// Returns the effective ignore set (user patterns plus lockfiles).
    pub fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore_set
    }

    /// Returns the GitHub API base URL.
    pub fn github_api_url(&self) -> &Url {
        &self.github_api_url
    }

    /// Returns how changed lines are counted.
    pub fn line_count_strategy(&self) -> LineCountStrategy {
        self.line_count_strategy
    }
}

impl Default for HygieneConfig {
    fn default() -> Self {
        Self {
            disable_status_check: false,
            github_credentials_id: default_credentials_id(),
            changed_file_count_limit: DEFAULT_FILE_COUNT_LIMIT,
            changed_line_count_limit: DEFAULT_LINE_COUNT_LIMIT,
            ignore_set: IgnoreSet::default(),
            github_api_url: Url::parse(DEFAULT_GITHUB_API_URL)
                .expect("default GitHub API URL is valid"),
            line_count_strategy: LineCountStrategy::default(),
        }
    }
}
