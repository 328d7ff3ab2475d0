//! Pull request file aggregation.
//!
//! Fetches the changed files of a pull request, drops ignored paths, and
//! sums the changed-file and changed-line counters. Only the first page of
//! the files endpoint is read, so very large pull requests undercount.

mod changed_file;
mod error;
mod ignore;

pub use changed_file::{ChangeCounts, ChangedFile, LineCountStrategy};
pub use error::AggregateError;
pub use ignore::{IgnoreSet, DEFAULT_IGNORED_FILES};

use crate::context::PullRequestContext;
use crate::host::{FilesResponse, ScmHost};
use tracing::{debug, error, info};

/// Fetches a pull request's files and counts the non-ignored ones.
///
/// # Arguments
///
/// * `host` - Source-control host session for this run
/// * `pull_request` - Owner, repository and number of the pull request
/// * `ignore` - Effective ignore set
/// * `strategy` - How lines are counted per file
///
/// # Errors
///
/// Returns [`AggregateError::ApiUnavailable`] if the request fails or the
/// endpoint answers with a non-success status, and
/// [`AggregateError::InvalidResponse`] if the body is empty, `null`, or not
/// a JSON array of file records.
pub async fn aggregate(
    host: &dyn ScmHost,
    pull_request: &PullRequestContext,
    ignore: &IgnoreSet,
    strategy: LineCountStrategy,
) -> Result<ChangeCounts, AggregateError> {
    let owner = pull_request.owner.as_str();
    let repo = pull_request.repo.as_str();
    let pr_number = pull_request.pr_number;

    let response = match host.fetch_pull_request_files(owner, repo, pr_number).await {
        Ok(response) => response,
        Err(e) => {
            let url = host.files_url(owner, repo, pr_number);
            error!(url = %url, error = %e, "Failed to fetch pull request files");
            return Err(AggregateError::ApiUnavailable {
                url,
                status: None,
                message: e.to_string(),
            });
        }
    };

    let files = parse_files(response)?;
    let counts = count_changes(&files, ignore, strategy);

    info!(
        owner,
        repo,
        pr = pr_number,
        files_returned = files.len(),
        changed_files = counts.changed_file_count,
        changed_lines = counts.changed_line_count,
        "Aggregated pull request changes"
    );
    Ok(counts)
}

/// Counts the files whose name contains no ignore pattern.
///
/// Each counted file adds one to the file counter and
/// [`LineCountStrategy::lines_for`] to the line counter.
#[must_use]
pub fn count_changes(
    files: &[ChangedFile],
    ignore: &IgnoreSet,
    strategy: LineCountStrategy,
) -> ChangeCounts {
    files
        .iter()
        .filter(|file| {
            let ignored = ignore.is_ignored(&file.filename);
            if ignored {
                debug!(filename = %file.filename, "Ignoring file");
            }
            !ignored
        })
        .fold(ChangeCounts::default(), |mut counts, file| {
            counts.changed_file_count += 1;
            counts.changed_line_count = counts
                .changed_line_count
                .saturating_add(strategy.lines_for(file));
            counts
        })
}

/// Classifies a raw files response into a file list or an error.
fn parse_files(response: FilesResponse) -> Result<Vec<ChangedFile>, AggregateError> {
    let success = response.is_success();
    let FilesResponse { url, status, body } = response;

    if !success {
        error!(url = %url, status, "Pull request files endpoint returned an error status");
        return Err(AggregateError::ApiUnavailable {
            url,
            status: Some(status),
            message: format!("HTTP status {status}"),
        });
    }

    if body.trim().is_empty() {
        error!(url = %url, "Pull request files response is empty");
        return Err(AggregateError::InvalidResponse {
            url,
            message: "empty body".to_string(),
        });
    }

    match serde_json::from_str::<Option<Vec<ChangedFile>>>(&body) {
        Ok(Some(files)) => Ok(files),
        Ok(None) => {
            error!(url = %url, "Pull request files response is null");
            Err(AggregateError::InvalidResponse {
                url,
                message: "null body".to_string(),
            })
        }
        Err(e) => {
            error!(url = %url, error = %e, "Pull request files response is not valid");
            Err(AggregateError::InvalidResponse {
                url,
                message: e.to_string(),
            })
        }
    }
}
