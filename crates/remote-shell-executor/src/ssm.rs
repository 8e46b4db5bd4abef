//! AWS SSM Run Command implementation of [`RemoteExecutor`].

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::types::CommandInvocationStatus;
use remote_shell_core::{
    ExecutorError, InvocationOutcome, InvocationStatus, RemoteExecutor, Submission,
};

use crate::config::TargetConfig;

/// SSM document that runs an arbitrary shell script on the target.
const RUN_SHELL_SCRIPT: &str = "AWS-RunShellScript";

/// Remote executor backed by AWS Systems Manager Run Command.
///
/// `submit` maps to `SendCommand` and `fetch` to `GetCommandInvocation`;
/// every command runs in a fresh process on the instance.
pub struct SsmExecutor {
    client: Client,
}

impl SsmExecutor {
    /// Build a client from the target configuration.
    pub async fn new(config: &TargetConfig) -> Self {
        let credentials = Credentials::from_keys(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
        );
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;
        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl RemoteExecutor for SsmExecutor {
    async fn submit(&self, target: &str, command: &str) -> Result<Submission, ExecutorError> {
        let output = self
            .client
            .send_command()
            .instance_ids(target)
            .document_name(RUN_SHELL_SCRIPT)
            .parameters("commands", vec![command.to_string()])
            .send()
            .await
            .map_err(|err| ExecutorError::SubmitFailed(err.to_string()))?;

        let handle = output
            .command()
            .and_then(|cmd| cmd.command_id())
            .ok_or_else(|| {
                ExecutorError::SubmitFailed("SendCommand returned no command id".to_string())
            })?
            .to_string();

        tracing::debug!(%handle, %target, "submitted remote command");
        Ok(Submission {
            handle,
            target: target.to_string(),
        })
    }

    async fn fetch(&self, submission: &Submission) -> Result<InvocationOutcome, ExecutorError> {
        let output = self
            .client
            .get_command_invocation()
            .command_id(&submission.handle)
            .instance_id(&submission.target)
            .send()
            .await
            .map_err(|err| ExecutorError::FetchFailed(err.to_string()))?;

        let status = output
            .status()
            .map_or(InvocationStatus::Pending, map_status);
        let stdout = output
            .standard_output_content()
            .unwrap_or_default()
            .to_string();

        Ok(InvocationOutcome { status, stdout })
    }
}

/// Unknown or in-flight SSM states (InProgress, Delayed, Cancelling, and
/// anything the service adds later) stay non-terminal so polling continues
/// until the budget runs out.
fn map_status(status: &CommandInvocationStatus) -> InvocationStatus {
    match status {
        CommandInvocationStatus::Success => InvocationStatus::Success,
        CommandInvocationStatus::Failed => InvocationStatus::Failed,
        CommandInvocationStatus::Cancelled => InvocationStatus::Cancelled,
        CommandInvocationStatus::TimedOut => InvocationStatus::TimedOut,
        _ => InvocationStatus::Pending,
    }
}
