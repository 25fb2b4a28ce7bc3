//! # Command runner
//!
//! Executes a rendered command line through the configured shell. The
//! [`CommandRunner`] trait is the seam between the reducer and the outside
//! world: production uses [`ShellRunner`], tests substitute a canned
//! implementation so flows stay deterministic.

use async_trait::async_trait;

/// Captured result of one shell invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    /// Launch failure or non-zero exit, when either happened.
    pub error: Option<String>,
}

impl RunOutput {
    /// Text shown in the output panel. Success shows stdout; failure shows
    /// stderr followed by the error description, so a bad pattern reads the
    /// same as it would in a terminal.
    pub fn display_text(&self) -> String {
        match &self.error {
            None => self.stdout.clone(),
            Some(error) => {
                if self.stderr.is_empty() {
                    error.clone()
                } else if self.stderr.ends_with('\n') {
                    format!("{}{}", self.stderr, error)
                } else {
                    format!("{}\n{}", self.stderr, error)
                }
            }
        }
    }
}

/// Runs rendered command lines. Implementations must be cheap to share;
/// the session holds one behind an `Arc` for the lifetime of the program.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command_line: &str) -> RunOutput;
}

/// Runs command lines through `<shell> <flag> <command>`.
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn default_shell() -> &'static str {
        if cfg!(windows) { "powershell" } else { "sh" }
    }

    fn flag(&self) -> &'static str {
        if cfg!(windows) { "-command" } else { "-c" }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command_line: &str) -> RunOutput {
        let result = tokio::process::Command::new(&self.shell)
            .arg(self.flag())
            .arg(command_line)
            .output()
            .await;

        match result {
            Ok(output) => RunOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                error: exit_error(output.status),
            },
            Err(e) => RunOutput {
                error: Some(format!("Failed to launch {}: {}", self.shell, e)),
                ..RunOutput::default()
            },
        }
    }
}

fn exit_error(status: std::process::ExitStatus) -> Option<String> {
    if status.success() {
        return None;
    }
    match status.code() {
        Some(code) => Some(format!("exit status {code}")),
        None => Some("terminated by signal".to_string()),
    }
}
