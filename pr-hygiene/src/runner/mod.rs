//! Orchestrates a single hygiene check run.
//!
//! `NotStarted -> gate -> aggregate -> report`, ending in one of the
//! [`RunOutcome`] states. Nothing survives the run.

mod error;
mod outcome;

pub use error::RunnerError;
pub use outcome::RunOutcome;

use crate::aggregate::aggregate;
use crate::config::HygieneConfig;
use crate::context::{PipelineEnv, PullRequestContext};
use crate::credentials::CredentialProvider;
use crate::host::{HostConnector, ScmHost, StatusTarget};
use crate::preflight::{self, SkipReason};
use crate::report::{report_check, LimitCheck, RetryPolicy};
use tracing::{error, info, info_span, Instrument};

/// Runs the hygiene checks for one pipeline build.
pub struct Runner<K, C> {
    config: HygieneConfig,
    connector: K,
    credentials: C,
    retry: RetryPolicy,
    dry_run: bool,
}

impl<K: HostConnector, C: CredentialProvider> Runner<K, C> {
    /// Builds a runner with the default [`RetryPolicy`].
    ///
    /// `connector` opens one host session per run once the credential is known.
    pub fn new(config: HygieneConfig, connector: K, credentials: C) -> Self {
        Self {
            config,
            connector,
            credentials,
            retry: RetryPolicy::default(),
            dry_run: false,
        }
    }

    /// Sets a custom retry policy for publishing.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Decides the checks without publishing them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Executes the full run. Every failure is converted into a [`RunOutcome`].
    pub async fn run(&self, env: &PipelineEnv) -> RunOutcome {
        if let Err(reason) =
            preflight::evaluate(&self.config, env.branch_name(), env.owner(), env.repo())
        {
            info!(reason = %reason, "Skipping hygiene checks");
            return RunOutcome::Skipped(reason);
        }

        let pull_request = match PullRequestContext::from_env(env) {
            Ok(pull_request) => pull_request,
            Err(e) => {
                let reason = SkipReason::InvalidPullRequest {
                    message: e.to_string(),
                };
                info!(reason = %reason, "Skipping hygiene checks");
                return RunOutcome::Skipped(reason);
            }
        };

        let span = info_span!("hygiene", pr = %pull_request.display_name());
        self.run_checks(&pull_request).instrument(span).await
    }

    async fn run_checks(&self, pull_request: &PullRequestContext) -> RunOutcome {
        let credential = match self.credentials.acquire(self.config.github_credentials_id()) {
            Ok(credential) => credential,
            Err(e) => return abort(e.into()),
        };
        let host = match self.connector.connect(&credential) {
            Ok(host) => host,
            Err(e) => return abort(RunnerError::Connect(e)),
        };

        let counts = match aggregate(
            &host,
            pull_request,
            self.config.ignore_set(),
            self.config.line_count_strategy(),
        )
        .await
        {
            Ok(counts) => counts,
            Err(e) => return abort(e.into()),
        };

        let checks = [
            LimitCheck::files_changed(
                counts.changed_file_count,
                self.config.changed_file_count_limit(),
            ),
            LimitCheck::lines_changed(
                counts.changed_line_count,
                self.config.changed_line_count_limit(),
            ),
        ];

        if self.dry_run {
            let checks: Vec<_> = checks
                .into_iter()
                .map(|check| check.into_result(pull_request.target_url.clone()))
                .collect();
            for check in &checks {
                info!(
                    context = %check.context,
                    status = %check.status,
                    description = %check.description,
                    "Dry run, not publishing status check"
                );
            }
            return RunOutcome::Completed {
                counts,
                checks,
                published: false,
            };
        }

        let sha = match resolve_head_sha(&host, pull_request).await {
            Ok(sha) => sha,
            Err(e) => return abort(e),
        };
        let target = StatusTarget {
            owner: pull_request.owner.clone(),
            repo: pull_request.repo.clone(),
            sha,
        };

        let mut published = Vec::with_capacity(checks.len());
        for check in checks {
            match report_check(
                &host,
                &target,
                check,
                pull_request.target_url.clone(),
                &self.retry,
            )
            .await
            {
                Ok(result) => published.push(result),
                Err(e) => {
                    error!(
                        url = %host.status_url(&target),
                        owner = %target.owner,
                        repo = %target.repo,
                        pr = pull_request.pr_number,
                        sha = %target.sha,
                        error = %e,
                        "Failed to publish status check"
                    );
                    return RunOutcome::PublishFailed {
                        counts,
                        published,
                        error: e,
                    };
                }
            }
        }

        info!(
            changed_files = counts.changed_file_count,
            changed_lines = counts.changed_line_count,
            "Hygiene checks published"
        );
        RunOutcome::Completed {
            counts,
            checks: published,
            published: true,
        }
    }
}

/// Uses the commit from the pipeline when known, else the PR head.
async fn resolve_head_sha(
    host: &dyn ScmHost,
    pull_request: &PullRequestContext,
) -> Result<String, RunnerError> {
    if let Some(sha) = &pull_request.head_sha {
        return Ok(sha.clone());
    }

    host.head_sha(&pull_request.owner, &pull_request.repo, pull_request.pr_number)
        .await
        .map_err(|source| RunnerError::HeadCommit {
            pull_request: pull_request.display_name(),
            source,
        })
}

fn abort(error: RunnerError) -> RunOutcome {
    error!(error = %error, "Hygiene run aborted, no status published");
    RunOutcome::Aborted(error)
}
