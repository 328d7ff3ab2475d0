//! Status reporting for hygiene checks.
//!
//! Each counter is compared to its limit and published as a commit status.
//! Publishing is retried per [`RetryPolicy`]; fetching is never retried.

mod error;
mod retry;
mod status;

pub use error::ReportError;
pub use retry::{RetryPolicy, DEFAULT_MAX_RETRIES};
pub use status::{
    CheckResult, CheckStatus, LimitCheck, FILES_CHANGED_CONTEXT, LINES_CHANGED_CONTEXT,
};

use crate::host::{ScmHost, StatusTarget};
use tracing::{info, info_span, warn, Instrument};

/// Decides a check and publishes it.
///
/// # Arguments
///
/// * `host` - Source-control host session for this run
/// * `target` - Repository and commit the status is attached to
/// * `check` - Counter and limit to decide
/// * `target_url` - Link shown next to the status
/// * `retry` - Retry policy for the publish call
///
/// # Returns
///
/// The published [`CheckResult`]. Exactly one status is recorded on success,
/// however many attempts it took.
///
/// # Errors
///
/// Returns [`ReportError::PublishFailed`] once every attempt has failed.
pub async fn report_check(
    host: &dyn ScmHost,
    target: &StatusTarget,
    check: LimitCheck,
    target_url: Option<String>,
    retry: &RetryPolicy,
) -> Result<CheckResult, ReportError> {
    let result = check.into_result(target_url);
    let span = info_span!("report_check", context = %result.context, sha = %target.sha);

    async move {
        publish_with_retry(host, target, &result, retry).await?;
        info!(
            status = %result.status,
            description = %result.description,
            "Published status check"
        );
        Ok(result)
    }
    .instrument(span)
    .await
}

async fn publish_with_retry(
    host: &dyn ScmHost,
    target: &StatusTarget,
    result: &CheckResult,
    retry: &RetryPolicy,
) -> Result<(), ReportError> {
    let max_attempts = retry.max_attempts();
    let mut attempt = 0;

    loop {
        attempt += 1;
        match host.publish_status(target, result).await {
            Ok(()) => return Ok(()),
            Err(e) if attempt >= max_attempts => {
                return Err(ReportError::PublishFailed {
                    context: result.context.clone(),
                    url: host.status_url(target),
                    sha: target.sha.clone(),
                    attempts: attempt,
                    source: e,
                });
            }
            Err(e) => {
                warn!(attempt, max_attempts, error = %e, "Publishing status failed, retrying");
                if !retry.delay.is_zero() {
                    tokio::time::sleep(retry.delay).await;
                }
            }
        }
    }
}
