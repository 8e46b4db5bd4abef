//! AWS SSM backend for the remote shell session.
//!
//! Provides:
//! - `SsmExecutor` - `RemoteExecutor` over SSM Run Command
//! - `TargetConfig` - Process-wide configuration from the environment

pub mod config;
pub mod ssm;

pub use config::{ConfigError, TargetConfig};
pub use ssm::SsmExecutor;
