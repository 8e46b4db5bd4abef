//! Remote execution trait and per-dispatch types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of one remote invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationStatus {
    /// Not finished yet; keep polling.
    Pending,
    /// Invocation completed successfully.
    Success,
    /// Invocation failed on the target.
    Failed,
    /// Invocation was cancelled.
    Cancelled,
    /// Invocation timed out on the target.
    TimedOut,
}

impl InvocationStatus {
    /// Whether polling stops at this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Handle for a command dispatched to a specific target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Opaque invocation id assigned by the service.
    pub handle: String,
    /// Instance identifier the command was sent to.
    pub target: String,
}

/// Current status and captured output of a submission.
///
/// `stdout` may be partial while the status is still `Pending`; callers that
/// exhaust their poll budget read it as best-effort output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationOutcome {
    pub status: InvocationStatus,
    pub stdout: String,
}

/// Executor error.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Submit failed: {0}")]
    SubmitFailed(String),
    #[error("Status fetch failed: {0}")]
    FetchFailed(String),
}

/// A stateless remote command-execution service.
///
/// Every submitted command runs in a fresh process on the target with no
/// memory of prior invocations. Callers poll [`RemoteExecutor::fetch`] until
/// the outcome reaches a terminal status.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Submit a shell command for execution on `target`.
    async fn submit(&self, target: &str, command: &str) -> Result<Submission, ExecutorError>;

    /// Fetch the current status and captured output of a submission.
    async fn fetch(&self, submission: &Submission) -> Result<InvocationOutcome, ExecutorError>;
}

#[async_trait]
impl<E: RemoteExecutor + ?Sized> RemoteExecutor for &E {
    async fn submit(&self, target: &str, command: &str) -> Result<Submission, ExecutorError> {
        (**self).submit(target, command).await
    }

    async fn fetch(&self, submission: &Submission) -> Result<InvocationOutcome, ExecutorError> {
        (**self).fetch(submission).await
    }
}

#[async_trait]
impl<E: RemoteExecutor + ?Sized> RemoteExecutor for std::sync::Arc<E> {
    async fn submit(&self, target: &str, command: &str) -> Result<Submission, ExecutorError> {
        (**self).submit(target, command).await
    }

    async fn fetch(&self, submission: &Submission) -> Result<InvocationOutcome, ExecutorError> {
        (**self).fetch(submission).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_non_terminal_status() {
        assert!(!InvocationStatus::Pending.is_terminal());
        assert!(InvocationStatus::Success.is_terminal());
        assert!(InvocationStatus::Failed.is_terminal());
        assert!(InvocationStatus::Cancelled.is_terminal());
        assert!(InvocationStatus::TimedOut.is_terminal());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&InvocationStatus::TimedOut).unwrap();
        assert_eq!(json, "\"timed_out\"");

        let parsed: InvocationStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, InvocationStatus::Pending);
    }
}
