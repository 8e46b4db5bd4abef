//! The session facade: initialization, compound execution, handlers.

use std::time::Duration;

use remote_shell_core::{
    CompletionPoller, ExecutorError, InvocationOutcome, RemoteExecutor,
};

use crate::command::{self, CommandKind, DIRECTORY_NOT_FOUND};
use crate::state::{SessionSnapshot, SessionState};

/// Working directory assumed until the remote home is confirmed.
const DEFAULT_DIRECTORY: &str = "/home/ec2-user";
/// Fixed settle time between submitting the home probe and reading it back.
const INIT_SETTLE: Duration = Duration::from_secs(2);

/// Emulated persistent shell session over a stateless [`RemoteExecutor`].
///
/// One owner per session: `execute` takes `&mut self`, so sharing a session
/// across tasks requires external serialization. Atomic commands within one
/// `execute` call run strictly in order, each observing the directory and
/// variables set by its predecessors.
pub struct ShellSession<E> {
    executor: E,
    target: String,
    poller: CompletionPoller,
    state: SessionState,
}

impl<E: RemoteExecutor> ShellSession<E> {
    /// Connect a session to `target`, probing the remote home directory.
    ///
    /// Initialization is best-effort: on any failure (transport error, empty
    /// output) the session starts in the default directory and the cause is
    /// logged. Construction itself never fails.
    pub async fn connect(executor: E, target: impl Into<String>) -> Self {
        Self::connect_with_poller(executor, target, CompletionPoller::new()).await
    }

    /// Connect with an explicit poll budget.
    pub async fn connect_with_poller(
        executor: E,
        target: impl Into<String>,
        poller: CompletionPoller,
    ) -> Self {
        let mut session = Self {
            executor,
            target: target.into(),
            poller,
            state: SessionState::new(DEFAULT_DIRECTORY),
        };
        session.initialize().await;
        session
    }

    async fn initialize(&mut self) {
        match self.probe_home().await {
            Ok(home) if !home.is_empty() => {
                tracing::debug!(%home, "session initialized at remote home directory");
                self.state.set_current_directory(home);
            }
            Ok(_) => tracing::warn!(
                fallback = %self.state.current_directory(),
                "remote home probe returned empty output, using default directory"
            ),
            Err(err) => tracing::warn!(
                %err,
                fallback = %self.state.current_directory(),
                "failed to probe remote home directory, using default"
            ),
        }
    }

    async fn probe_home(&self) -> Result<String, ExecutorError> {
        let submission = self.executor.submit(&self.target, "echo $HOME").await?;
        tokio::time::sleep(INIT_SETTLE).await;
        let outcome = self.executor.fetch(&submission).await?;
        Ok(outcome.stdout.trim().to_string())
    }

    /// Execute a compound command, one atomic command at a time.
    ///
    /// The input is split on `&&`; atomic commands run strictly in order and
    /// a failure in one never aborts the rest, its error text simply joins
    /// the newline-separated aggregate result.
    pub async fn execute(&mut self, compound: &str) -> String {
        let mut results = Vec::new();
        for atomic in command::split_compound(compound) {
            let result = match CommandKind::classify(atomic) {
                CommandKind::DirectoryChange { path } => {
                    self.change_directory(atomic, &path).await
                }
                CommandKind::VariableAssignment { name, value } => {
                    self.apply_assignment(atomic, &name, &value).await
                }
                CommandKind::General { command } => self.run_general(&command).await,
            };
            results.push(result);
        }
        results.join("\n")
    }

    /// Point-in-time view of the emulated state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    /// Probe the target for the requested directory and adopt it on success.
    ///
    /// The directory is never advanced on a failed change: the sentinel (or
    /// an empty probe result) leaves the session where it was.
    async fn change_directory(&mut self, original: &str, path: &str) -> String {
        let probe = command::build_cd_probe(path, self.state.current_directory());
        let stdout = match self.dispatch(&probe).await {
            Ok(outcome) => outcome.stdout,
            Err(err) => return format!("Error executing command: {err}"),
        };

        let confirmed = stdout.trim();
        if confirmed.is_empty() || confirmed == DIRECTORY_NOT_FOUND {
            return DIRECTORY_NOT_FOUND.to_string();
        }

        self.state.set_current_directory(confirmed);
        self.state.record(original);
        format!("Changed to directory: {confirmed}")
    }

    /// Track the variable locally, then apply it remotely.
    ///
    /// The local update is optimistic: it reflects intent, happens before
    /// dispatch, and is not rolled back if the remote assignment fails, so
    /// local and remote environment state can diverge.
    async fn apply_assignment(&mut self, original: &str, name: &str, value: &str) -> String {
        if name.is_empty() {
            return format!("Error setting environment variable: missing name in '{original}'");
        }

        self.state.set_var(name, value);

        let remote = command::build_assignment(name, value, self.state.current_directory());
        match self.dispatch(&remote).await {
            Ok(_) => {
                self.state.record(original);
                format!("Set environment variable {name}={value}")
            }
            Err(err) => format!("Error setting environment variable: {err}"),
        }
    }

    /// Run a pass-through command and return its raw captured stdout.
    ///
    /// Output is returned untrimmed and never interpreted: an embedded `cd`
    /// inside the command has no effect on the tracked directory.
    async fn run_general(&mut self, atomic: &str) -> String {
        let remote = command::build_general(
            atomic,
            self.state.current_directory(),
            self.state.environment_vars(),
        );
        match self.dispatch(&remote).await {
            Ok(outcome) => {
                self.state.record(atomic);
                outcome.stdout
            }
            Err(err) => format!("Error executing command: {err}"),
        }
    }

    /// Submit, wait for completion, fetch whatever output is available.
    ///
    /// An exhausted poll budget is not an error: the fetch still happens and
    /// the caller gets best-effort output.
    async fn dispatch(&self, remote_command: &str) -> Result<InvocationOutcome, ExecutorError> {
        let submission = self.executor.submit(&self.target, remote_command).await?;
        if !self.poller.wait(&self.executor, &submission).await {
            tracing::warn!(
                handle = %submission.handle,
                "poll budget exhausted, proceeding with best-effort output"
            );
        }
        self.executor.fetch(&submission).await
    }
}
