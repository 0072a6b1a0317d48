//! Bounded retry policy for generative API calls.
//!
//! The policy is an explicit value (max attempts, retryable-status
//! predicate, attempt-indexed delay) so the loop in
//! [`AdvicePipeline`](crate::pipeline::AdvicePipeline) stays free of
//! inline timing constants and tests can drive it with millisecond delays.

use std::time::Duration;

/// Tunable parameters for the bounded retry loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first call.
    pub max_attempts: u32,
    /// Delay unit; attempt `n` waits `n * base_delay` before retrying.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Whether an upstream HTTP status warrants another attempt.
    ///
    /// Only transient server errors (500, 503) are retried; everything
    /// else fails immediately.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 500 | 503)
    }

    /// Delay before the attempt following failed attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}
