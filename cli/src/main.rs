//! CLI for the pull request hygiene checker.
//!
//! Reads the Jenkins multibranch pipeline environment, counts the files and
//! lines changed by the pull request and publishes the two commit status
//! checks.

use clap::Parser;
use pr_hygiene::{
    resolve_config, EnvCredentialProvider, GitHubConnector, PipelineEnv, RunSummary, Runner,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// PR Hygiene - Publish file and line count status checks for a pull request build.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Branch being built (`PR-<number>` for pull requests).
    #[arg(long, env = "BRANCH_NAME")]
    branch: Option<String>,

    /// Repository owner.
    #[arg(long, env = "ORG_NAME")]
    owner: Option<String>,

    /// Repository name.
    #[arg(long, env = "REPO_NAME")]
    repo: Option<String>,

    /// Pull request number, used when the branch name carries none.
    #[arg(long, env = "CHANGE_ID")]
    change_id: Option<String>,

    /// Build page linked from the status checks.
    #[arg(long, env = "BUILD_URL")]
    build_url: Option<String>,

    /// Display page linked from the status checks, preferred over the build page.
    #[arg(long, env = "RUN_DISPLAY_URL")]
    run_display_url: Option<String>,

    /// Commit the statuses are attached to. Defaults to the pull request head.
    #[arg(long, env = "GIT_COMMIT")]
    commit: Option<String>,

    /// Path to the configuration file (defaults to `.pr-hygiene.toml` if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decide the checks without publishing them.
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn pipeline_env(&self) -> PipelineEnv {
        PipelineEnv {
            branch_name: self.branch.clone(),
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            change_id: self.change_id.clone(),
            build_url: self.build_url.clone(),
            run_display_url: self.run_display_url.clone(),
            commit_sha: self.commit.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match resolve_config(args.config.as_deref(), &working_dir) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    let connector = GitHubConnector::new(config.github_api_url().clone());
    let runner =
        Runner::new(config, connector, EnvCredentialProvider::new()).with_dry_run(args.dry_run);

    let outcome = runner.run(&args.pipeline_env()).await;
    let summary = RunSummary::from(&outcome);

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => error!(error = %e, "Failed to serialize summary"),
        }
    } else {
        print_summary(&summary);
    }

    // A hygiene run never fails the build; the published checks carry the verdict.
    ExitCode::SUCCESS
}

/// Initializes tracing with environment filter support.
///
/// Log level filtering via `RUST_LOG` (defaults to "info").
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Outcome: {}", summary.outcome);
    if let Some(reason) = &summary.reason {
        println!("  Reason: {reason}");
    }

    if let Some(counts) = &summary.counts {
        println!("  Files changed: {}", counts.changed_file_count);
        println!("  Lines changed: {}", counts.changed_line_count);
    }

    for check in &summary.checks {
        println!(
            "  {}: {} ({})",
            check.context, check.status, check.description
        );
    }
}
