use std::{path::PathBuf, process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::ActivityError;

/// Runs the GitHub CLI. Abstracted so the provider can be tested without `gh` installed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the command with `args` and returns its stdout. A non-zero exit is an error.
    async fn run(&self, args: &[String]) -> Result<String, ActivityError>;
}

pub struct GhCli {
    program: PathBuf,
    timeout: Duration,
}

impl GhCli {
    pub fn new(program: PathBuf, timeout: Duration) -> Self {
        Self { program, timeout }
    }
}

#[async_trait]
impl CommandRunner for GhCli {
    async fn run(&self, args: &[String]) -> Result<String, ActivityError> {
        let command_line = format!("{} {}", self.program.display(), args.join(" "));
        debug!("Running {command_line}");

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| ActivityError::Timeout {
                target: command_line.clone(),
                timeout: self.timeout,
            })?
            .map_err(|e| ActivityError::Subprocess {
                command: command_line.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ActivityError::Subprocess {
                command: command_line,
                message: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| ActivityError::Subprocess {
            command: command_line,
            message: format!("stdout is not UTF-8: {e}"),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use super::{CommandRunner, GhCli};
    use crate::error::ActivityError;

    #[tokio::test]
    async fn returns_stdout_of_successful_command() {
        let runner = GhCli::new(PathBuf::from("echo"), Duration::from_secs(5));
        let output = runner.run(&["[]".to_owned()]).await.unwrap();
        assert_eq!(output.trim(), "[]");
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let runner = GhCli::new(PathBuf::from("false"), Duration::from_secs(5));
        let result = runner.run(&[]).await;
        assert!(matches!(result, Err(ActivityError::Subprocess { .. })));
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let runner = GhCli::new(
            PathBuf::from("/nonexistent/daily-activity-gh"),
            Duration::from_secs(5),
        );
        let result = runner.run(&[]).await;
        assert!(matches!(result, Err(ActivityError::Subprocess { .. })));
    }

    #[tokio::test]
    async fn slow_program_times_out() {
        let runner = GhCli::new(PathBuf::from("sleep"), Duration::from_millis(100));
        let result = runner.run(&["5".to_owned()]).await;
        assert!(matches!(result, Err(ActivityError::Timeout { .. })));
    }
}
