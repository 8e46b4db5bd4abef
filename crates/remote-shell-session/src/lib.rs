//! Persistent shell session emulation over a stateless remote executor.
//!
//! Each remote invocation runs in a fresh process with no memory of prior
//! working directory or environment; this crate maintains the illusion of
//! continuity by tracking directory, variables, and history locally and
//! re-applying them on every dispatch.
//!
//! Provides:
//! - `ShellSession` - Top-level session facade
//! - `CommandKind` - Ordered classification of atomic commands
//! - `SessionState` / `SessionSnapshot` - Emulated state and its read view

pub mod command;
pub mod session;
pub mod state;

pub use command::{CommandKind, DIRECTORY_NOT_FOUND};
pub use session::ShellSession;
pub use state::{SessionSnapshot, SessionState};
