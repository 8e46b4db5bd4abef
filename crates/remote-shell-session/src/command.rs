//! Atomic command classification and remote command assembly.
//!
//! The builders here are pure string functions: they take the emulated state
//! as arguments and return the exact command text dispatched to the remote
//! target, which keeps the wire format unit-testable without an executor.

use std::collections::HashMap;

/// Literal printed by the remote probe when a `cd` target does not exist.
pub const DIRECTORY_NOT_FOUND: &str = "Directory not found";

/// Prefixes that disqualify an `=`-containing command from being treated as
/// a variable assignment.
const NON_ASSIGNMENT_PREFIXES: [&str; 3] = ["export ", "echo ", "printf "];

/// One atomic command, classified by shape.
///
/// Classification is ordered and first match wins: a leading `cd` token is
/// always a directory change, then a command containing `=` (unless it
/// starts with `export `, `echo `, or `printf `) is an assignment, and
/// everything else passes through unchanged. The precedence is deliberate:
/// `cd a=b` changes directory, it does not assign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// `cd [path]`; an empty path means "go to the home directory".
    DirectoryChange { path: String },
    /// `NAME=value`; the value may be empty, the name may not.
    VariableAssignment { name: String, value: String },
    /// Anything else, executed as-is in the emulated working directory.
    General { command: String },
}

impl CommandKind {
    /// Classify one trimmed atomic command.
    #[must_use]
    pub fn classify(command: &str) -> Self {
        if command == "cd" || command.starts_with("cd ") {
            let path = command[2..].trim().to_string();
            return Self::DirectoryChange { path };
        }

        if !NON_ASSIGNMENT_PREFIXES.iter().any(|p| command.starts_with(p)) {
            if let Some((name, value)) = command.split_once('=') {
                return Self::VariableAssignment {
                    name: name.to_string(),
                    value: value.to_string(),
                };
            }
        }

        Self::General {
            command: command.to_string(),
        }
    }
}

/// Split a compound command on `&&`, trimming whitespace and dropping empty
/// segments. Order is preserved.
#[must_use]
pub fn split_compound(input: &str) -> Vec<&str> {
    input
        .split("&&")
        .map(str::trim)
        .filter(|cmd| !cmd.is_empty())
        .collect()
}

/// Build the remote probe-and-change command for a `cd`.
///
/// The probe tests existence before changing so a missing directory prints
/// the [`DIRECTORY_NOT_FOUND`] sentinel instead of failing; on success it
/// prints the resulting absolute path for the session to adopt. Relative
/// paths are checked both against the current directory and bare, matching
/// how a shell would resolve them.
#[must_use]
pub fn build_cd_probe(path: &str, current_directory: &str) -> String {
    if path.is_empty() {
        "cd && pwd".to_string()
    } else if path.starts_with('/') {
        format!(
            "if [ -d '{path}' ]; then cd '{path}' && pwd; else echo '{DIRECTORY_NOT_FOUND}'; fi"
        )
    } else {
        format!(
            "if [ -d '{current_directory}/{path}' ] || [ -d '{path}' ]; then cd '{current_directory}' && cd '{path}' && pwd; else echo '{DIRECTORY_NOT_FOUND}'; fi"
        )
    }
}

/// Build the remote command that applies a variable assignment in the
/// emulated working directory and echoes a confirmation.
#[must_use]
pub fn build_assignment(name: &str, value: &str, current_directory: &str) -> String {
    format!("cd '{current_directory}' && {name}={value} && echo 'Set {name}={value}'")
}

/// Build the remote command for pass-through execution.
///
/// Re-enters the emulated working directory and re-applies every tracked
/// variable as a `name='value'` prefix, since the remote process starts
/// fresh on every invocation and remembers nothing.
#[must_use]
pub fn build_general(
    command: &str,
    current_directory: &str,
    environment_vars: &HashMap<String, String>,
) -> String {
    let env_vars = environment_vars
        .iter()
        .map(|(name, value)| format!("{name}='{value}'"))
        .collect::<Vec<_>>()
        .join(" ");
    let env_prefix = if env_vars.is_empty() {
        String::new()
    } else {
        format!("{env_vars} ")
    };
    format!("cd '{current_directory}' && {env_prefix}{command}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cd_prefix_wins_over_assignment() {
        assert_eq!(
            CommandKind::classify("cd a=b"),
            CommandKind::DirectoryChange { path: "a=b".into() }
        );
    }

    #[test]
    fn bare_cd_means_home() {
        assert_eq!(
            CommandKind::classify("cd"),
            CommandKind::DirectoryChange { path: String::new() }
        );
    }

    #[test]
    fn cd_with_argument() {
        assert_eq!(
            CommandKind::classify("cd /tmp"),
            CommandKind::DirectoryChange { path: "/tmp".into() }
        );
    }

    #[test]
    fn assignment_splits_on_first_equals() {
        assert_eq!(
            CommandKind::classify("FOO=a=b"),
            CommandKind::VariableAssignment {
                name: "FOO".into(),
                value: "a=b".into(),
            }
        );
    }

    #[test]
    fn assignment_value_may_be_empty() {
        assert_eq!(
            CommandKind::classify("FOO="),
            CommandKind::VariableAssignment {
                name: "FOO".into(),
                value: String::new(),
            }
        );
    }

    #[test]
    fn export_echo_printf_are_not_assignments() {
        for cmd in ["export FOO=bar", "echo a=b", "printf x=%s y"] {
            assert_eq!(
                CommandKind::classify(cmd),
                CommandKind::General { command: cmd.into() },
                "{cmd} should pass through"
            );
        }
    }

    #[test]
    fn plain_commands_are_general() {
        assert_eq!(
            CommandKind::classify("ls -la"),
            CommandKind::General {
                command: "ls -la".into()
            }
        );
    }

    #[test]
    fn split_compound_trims_and_drops_empties() {
        assert_eq!(
            split_compound("  mkdir -p d &&cd d&& pwd && "),
            vec!["mkdir -p d", "cd d", "pwd"]
        );
        assert!(split_compound("   ").is_empty());
    }

    #[test]
    fn cd_probe_for_empty_path_goes_home() {
        assert_eq!(build_cd_probe("", "/home/user"), "cd && pwd");
    }

    #[test]
    fn cd_probe_for_absolute_path_ignores_current_directory() {
        assert_eq!(
            build_cd_probe("/tmp", "/home/user"),
            "if [ -d '/tmp' ]; then cd '/tmp' && pwd; else echo 'Directory not found'; fi"
        );
    }

    #[test]
    fn cd_probe_for_relative_path_checks_both_resolutions() {
        assert_eq!(
            build_cd_probe("work", "/home/user"),
            "if [ -d '/home/user/work' ] || [ -d 'work' ]; then cd '/home/user' && cd 'work' && pwd; else echo 'Directory not found'; fi"
        );
    }

    #[test]
    fn assignment_command_confirms_remotely() {
        assert_eq!(
            build_assignment("FOO", "bar", "/tmp"),
            "cd '/tmp' && FOO=bar && echo 'Set FOO=bar'"
        );
    }

    #[test]
    fn general_command_without_vars_has_no_prefix() {
        let vars = HashMap::new();
        assert_eq!(build_general("pwd", "/tmp", &vars), "cd '/tmp' && pwd");
    }

    #[test]
    fn general_command_reapplies_tracked_vars() {
        let mut vars = HashMap::new();
        vars.insert("FOO".to_string(), "bar".to_string());
        assert_eq!(
            build_general("echo $FOO", "/tmp", &vars),
            "cd '/tmp' && FOO='bar' echo $FOO"
        );
    }
}
