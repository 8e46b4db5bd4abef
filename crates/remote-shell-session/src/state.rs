//! Emulated session state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of history entries exposed through a snapshot.
pub const HISTORY_WINDOW: usize = 10;

/// The emulated persistent shell context: working directory, tracked
/// variables, and command history.
///
/// `current_directory` always names a directory confirmed to exist on the
/// remote target at the time it was last set; a failed change never advances
/// it.
#[derive(Debug, Clone)]
pub struct SessionState {
    current_directory: String,
    environment_vars: HashMap<String, String>,
    command_history: Vec<String>,
}

impl SessionState {
    /// Create state starting in `default_directory`.
    #[must_use]
    pub fn new(default_directory: impl Into<String>) -> Self {
        Self {
            current_directory: default_directory.into(),
            environment_vars: HashMap::new(),
            command_history: Vec::new(),
        }
    }

    /// Last confirmed remote working directory.
    #[must_use]
    pub fn current_directory(&self) -> &str {
        &self.current_directory
    }

    /// Adopt a remotely confirmed working directory.
    pub fn set_current_directory(&mut self, directory: impl Into<String>) {
        self.current_directory = directory.into();
    }

    /// Tracked environment variables.
    #[must_use]
    pub const fn environment_vars(&self) -> &HashMap<String, String> {
        &self.environment_vars
    }

    /// Track a variable, overwriting any previous value.
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.environment_vars.insert(name.into(), value.into());
    }

    /// Record a completed command in the history.
    pub fn record(&mut self, command: impl Into<String>) {
        self.command_history.push(command.into());
    }

    /// Point-in-time read view, history bounded to the most recent
    /// [`HISTORY_WINDOW`] entries in order.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let start = self.command_history.len().saturating_sub(HISTORY_WINDOW);
        SessionSnapshot {
            current_directory: self.current_directory.clone(),
            environment_vars: self.environment_vars.clone(),
            command_history: self.command_history[start..].to_vec(),
        }
    }
}

/// Read-only view of a session's emulated state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub current_directory: String,
    pub environment_vars: HashMap<String, String>,
    pub command_history: Vec<String>,
}
