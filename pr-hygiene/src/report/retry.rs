//! Retry policy for status publishing.

use std::time::Duration;

/// Retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// How often and how fast a failed publish is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }

    /// Total attempts including the first one.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: Duration::ZERO,
        }
    }
}
