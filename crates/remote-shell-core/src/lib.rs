//! Core abstractions for stateless remote command execution.
//!
//! This crate provides the fundamental building blocks:
//! - `RemoteExecutor` - Trait over a submit/poll command service
//! - `Submission` / `InvocationOutcome` - Per-dispatch types
//! - `CompletionPoller` - Capped exponential backoff until a terminal status

pub mod poller;
pub mod traits;

pub use poller::{CompletionPoller, backoff};
pub use traits::{ExecutorError, InvocationOutcome, InvocationStatus, RemoteExecutor, Submission};
