//! Process-wide target configuration.

use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),
}

/// Target instance and credentials, read once at startup.
///
/// There is no hot reload: the values are captured when the process starts
/// and the environment is never consulted again.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub instance_id: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl TargetConfig {
    /// Load from the environment, honoring a `.env` file if present.
    ///
    /// # Errors
    /// Returns an error if any required variable is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; real environment variables still apply.
        let _ = dotenvy::dotenv();
        Ok(Self {
            instance_id: require("INSTANCE_ID")?,
            region: require("AWS_REGION")?,
            access_key_id: require("AWS_ACCESS_KEY_ID")?,
            secret_access_key: require("AWS_SECRET_ACCESS_KEY")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}
