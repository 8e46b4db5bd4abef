//! Completion polling with capped exponential backoff.

use std::time::Duration;

use tokio::sync::oneshot;

use crate::traits::{RemoteExecutor, Submission};

/// Maximum status queries per wait before giving up.
const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Base delay between status queries.
const DEFAULT_BASE_INTERVAL: Duration = Duration::from_secs(3);
/// Ceiling on any single backoff delay, regardless of attempt count.
const BACKOFF_CAP: Duration = Duration::from_secs(15);

/// Delay to apply after `attempt` completed status queries.
///
/// Grows as `base_interval * 2^attempt`, capped at 15 seconds.
#[must_use]
pub fn backoff(base_interval: Duration, attempt: u32) -> Duration {
    base_interval
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(BACKOFF_CAP)
}

/// Polls a submission until it reaches a terminal status or the attempt
/// budget runs out.
///
/// The poller does not distinguish success from failure; any terminal status
/// ends the wait and the caller fetches the output separately.
#[derive(Debug, Clone)]
pub struct CompletionPoller {
    max_attempts: u32,
    base_interval: Duration,
}

impl Default for CompletionPoller {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionPoller {
    /// Create a poller with the default budget.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_interval: DEFAULT_BASE_INTERVAL,
        }
    }

    /// Create a poller with an explicit budget.
    #[must_use]
    pub const fn with_budget(max_attempts: u32, base_interval: Duration) -> Self {
        Self {
            max_attempts,
            base_interval,
        }
    }

    /// Wait for `submission` to reach a terminal status.
    ///
    /// Returns `true` as soon as any terminal status is observed. Transient
    /// fetch errors are swallowed with a flat delay; only an exhausted
    /// attempt budget returns `false`, after which the caller proceeds with
    /// whatever output is currently available.
    pub async fn wait<E>(&self, executor: &E, submission: &Submission) -> bool
    where
        E: RemoteExecutor + ?Sized,
    {
        for attempt in 0..self.max_attempts {
            match executor.fetch(submission).await {
                Ok(outcome) if outcome.status.is_terminal() => return true,
                Ok(_) => {
                    tokio::time::sleep(backoff(self.base_interval, attempt)).await;
                }
                Err(err) => {
                    // Transient query failures do not abort polling.
                    tracing::debug!(handle = %submission.handle, %err, "status query failed, retrying");
                    tokio::time::sleep(self.base_interval).await;
                }
            }
        }
        tracing::warn!(
            handle = %submission.handle,
            attempts = self.max_attempts,
            "submission did not reach a terminal status within the poll budget"
        );
        false
    }

    /// Like [`CompletionPoller::wait`], but abortable through a oneshot
    /// channel so a caller can give up on a stuck wait without leaking the
    /// backoff loop. Cancellation returns `false`.
    pub async fn wait_cancellable<E>(
        &self,
        executor: &E,
        submission: &Submission,
        cancel_rx: oneshot::Receiver<()>,
    ) -> bool
    where
        E: RemoteExecutor + ?Sized,
    {
        tokio::select! {
            done = self.wait(executor, submission) => done,
            _ = cancel_rx => {
                tracing::debug!(handle = %submission.handle, "poll wait cancelled");
                false
            }
        }
    }
}
