//! Version-control command execution
//!
//! This module provides:
//! - A `CommandRunner` trait so higher layers can be tested with a
//!   recording mock
//! - `GitCli`, the production implementation over std::process
//! - `run_fatal` / `run_capturing_fatal` for steps whose partial
//!   completion would corrupt remote repository state

use crate::error::FatalError;
use log::{debug, warn};
use std::process::Command;

/// Exit state of an external command
///
/// A nonzero exit or a spawn failure is a status, never a panic or an
/// error return; callers decide what failure means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// True when the command exited with code 0
    pub success: bool,
    /// Exit code, None when the process could not be spawned or was
    /// terminated by a signal
    pub code: Option<i32>,
}

impl CommandStatus {
    /// Successful exit
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    /// Failed exit with an optional code
    pub fn failed(code: Option<i32>) -> Self {
        Self {
            success: false,
            code,
        }
    }
}

/// Trait for running external version-control commands
pub trait CommandRunner {
    /// Run a command given as a list of tokens, inheriting stdio
    fn run(&self, argv: &[&str]) -> CommandStatus;

    /// Run a command and capture its stdout
    ///
    /// The output is empty when the command fails.
    fn run_capturing(&self, argv: &[&str]) -> (CommandStatus, String);
}

/// Production runner that executes real commands
#[derive(Debug, Default)]
pub struct GitCli;

impl GitCli {
    /// Creates a new runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for GitCli {
    fn run(&self, argv: &[&str]) -> CommandStatus {
        let Some((program, args)) = argv.split_first() else {
            return CommandStatus::failed(None);
        };
        debug!("[exec] {}", argv.join(" "));

        match Command::new(program).args(args).status() {
            Ok(status) if status.success() => CommandStatus::ok(),
            Ok(status) => {
                warn!(
                    "command '{}' failed with return code: {:?}",
                    argv.join(" "),
                    status.code()
                );
                CommandStatus::failed(status.code())
            }
            Err(e) => {
                warn!("command '{}' could not be started: {}", argv.join(" "), e);
                CommandStatus::failed(None)
            }
        }
    }

    fn run_capturing(&self, argv: &[&str]) -> (CommandStatus, String) {
        let Some((program, args)) = argv.split_first() else {
            return (CommandStatus::failed(None), String::new());
        };
        debug!("[exec] {}", argv.join(" "));

        match Command::new(program).args(args).output() {
            Ok(output) if output.status.success() => (
                CommandStatus::ok(),
                String::from_utf8_lossy(&output.stdout).into_owned(),
            ),
            Ok(output) => {
                warn!(
                    "command '{}' failed with return code: {:?}",
                    argv.join(" "),
                    output.status.code()
                );
                (CommandStatus::failed(output.status.code()), String::new())
            }
            Err(e) => {
                warn!("command '{}' could not be started: {}", argv.join(" "), e);
                (CommandStatus::failed(None), String::new())
            }
        }
    }
}

/// Run a command whose failure aborts the whole batch
pub fn run_fatal(runner: &dyn CommandRunner, argv: &[&str]) -> Result<(), FatalError> {
    let status = runner.run(argv);
    if status.success {
        Ok(())
    } else {
        Err(FatalError::CommandFailed {
            command: argv.join(" "),
            code: status.code,
        })
    }
}

/// Run a batch-aborting command and capture its stdout
pub fn run_capturing_fatal(
    runner: &dyn CommandRunner,
    argv: &[&str],
) -> Result<String, FatalError> {
    let (status, output) = runner.run_capturing(argv);
    if status.success {
        Ok(output)
    } else {
        Err(FatalError::CommandFailed {
            command: argv.join(" "),
            code: status.code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRunner {
        status: CommandStatus,
        output: String,
    }

    impl CommandRunner for FixedRunner {
        fn run(&self, _argv: &[&str]) -> CommandStatus {
            self.status
        }

        fn run_capturing(&self, _argv: &[&str]) -> (CommandStatus, String) {
            (self.status, self.output.clone())
        }
    }

    #[test]
    fn test_command_status_constructors() {
        assert!(CommandStatus::ok().success);
        assert_eq!(CommandStatus::ok().code, Some(0));

        let failed = CommandStatus::failed(Some(128));
        assert!(!failed.success);
        assert_eq!(failed.code, Some(128));
    }

    #[test]
    fn test_run_fatal_success() {
        let runner = FixedRunner {
            status: CommandStatus::ok(),
            output: String::new(),
        };
        assert!(run_fatal(&runner, &["git", "fetch", "upstream"]).is_ok());
    }

    #[test]
    fn test_run_fatal_failure_carries_command_line() {
        let runner = FixedRunner {
            status: CommandStatus::failed(Some(1)),
            output: String::new(),
        };
        let err = run_fatal(&runner, &["git", "push", "-f", "origin"]).unwrap_err();
        assert!(format!("{}", err).contains("git push -f origin"));
    }

    #[test]
    fn test_run_capturing_fatal() {
        let runner = FixedRunner {
            status: CommandStatus::ok(),
            output: "  master\n* devel\n".to_string(),
        };
        let output = run_capturing_fatal(&runner, &["git", "branch"]).unwrap();
        assert!(output.contains("devel"));

        let runner = FixedRunner {
            status: CommandStatus::failed(None),
            output: String::new(),
        };
        assert!(run_capturing_fatal(&runner, &["git", "branch"]).is_err());
    }

    #[test]
    fn test_git_cli_empty_argv() {
        let runner = GitCli::new();
        assert!(!runner.run(&[]).success);
        let (status, output) = runner.run_capturing(&[]);
        assert!(!status.success);
        assert!(output.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_git_cli_runs_real_commands() {
        let runner = GitCli::new();
        assert!(runner.run(&["true"]).success);

        let status = runner.run(&["false"]);
        assert!(!status.success);
        assert_eq!(status.code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn test_git_cli_captures_output() {
        let runner = GitCli::new();
        let (status, output) = runner.run_capturing(&["echo", "hello"]);
        assert!(status.success);
        assert_eq!(output.trim(), "hello");
    }

    #[test]
    fn test_git_cli_spawn_failure_is_a_status() {
        let runner = GitCli::new();
        let status = runner.run(&["exup-no-such-binary-xyz"]);
        assert!(!status.success);
        assert_eq!(status.code, None);
    }
}
