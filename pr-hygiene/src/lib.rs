#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod aggregate;
pub mod config;
pub mod context;
pub mod credentials;
pub mod host;
pub mod preflight;
pub mod report;
pub mod runner;
pub mod summary;

pub use aggregate::{
    aggregate, count_changes, AggregateError, ChangeCounts, ChangedFile, IgnoreSet,
    LineCountStrategy,
};
pub use config::{load_config, parse_config, resolve_config, ConfigError, HygieneConfig};
pub use context::{ContextError, PipelineEnv, PullRequestContext, PR_BRANCH_MARKER};
pub use credentials::{Credential, CredentialError, CredentialProvider, EnvCredentialProvider};
pub use host::{
    FilesResponse, GitHubConnector, GitHubHost, HostConnector, HostError, ScmHost, StatusTarget,
    GITHUB_JSON_MEDIA_TYPE,
};
pub use preflight::{should_run, SkipReason};
pub use report::{
    report_check, CheckResult, CheckStatus, LimitCheck, ReportError, RetryPolicy,
    FILES_CHANGED_CONTEXT, LINES_CHANGED_CONTEXT,
};
pub use runner::{RunOutcome, Runner, RunnerError};
pub use summary::RunSummary;
