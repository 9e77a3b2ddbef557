/// External command execution
///
/// Every OS interaction goes through the `CommandRunner` trait so screens and
/// managers can be tested against a mock instead of the live system.

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};

use thiserror::Error;
use tracing::{debug, warn};

/// Placeholder shown when a successful command produced no output.
pub const NO_OUTPUT: &str = "No output from command.";

/// One external command invocation: program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandRequest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("command or script '{program}' not found")]
    NotFound { program: String },

    #[error("failed to make '{path}' executable: {detail}")]
    Permission { path: String, detail: String },

    #[error("command exited with status {code}: {stderr}")]
    ExitStatus { code: i32, stderr: String },

    #[error("unexpected error: {0}")]
    Io(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Runs the command directly and returns its captured stdout, trimmed.
    fn run(&self, request: &CommandRequest) -> Result<String, RunnerError>;

    /// Runs the command behind the elevation prefix and returns combined
    /// stdout+stderr, trimmed.
    fn run_elevated(&self, request: &CommandRequest) -> Result<String, RunnerError>;
}

/// `CommandRunner` backed by `std::process::Command`. Strictly synchronous:
/// one command at a time, blocking until it exits.
pub struct SystemRunner {
    elevation: Option<String>,
}

impl SystemRunner {
    /// `elevation` is prepended to privileged commands; an empty string
    /// disables elevation entirely.
    pub fn new(elevation: &str) -> Self {
        let elevation = elevation.trim();
        Self {
            elevation: if elevation.is_empty() {
                None
            } else {
                Some(elevation.to_string())
            },
        }
    }

    pub fn without_elevation() -> Self {
        Self { elevation: None }
    }

    /// Best-effort permission fix: scripts are frequently unpacked without
    /// the executable bit. Non-file programs (bare command names resolved
    /// via PATH) are left alone.
    fn ensure_executable(program: &str) -> Result<(), RunnerError> {
        let path = Path::new(program);
        if !path.is_file() {
            return Ok(());
        }
        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(_) => return Ok(()),
        };
        if metadata.permissions().mode() & 0o111 != 0 {
            return Ok(());
        }
        let mut permissions = metadata.permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(path, permissions).map_err(|e| RunnerError::Permission {
            path: program.to_string(),
            detail: e.to_string(),
        })
    }

    fn spawn(&self, request: &CommandRequest, elevate: bool) -> Result<Output, RunnerError> {
        let mut command = match (&self.elevation, elevate) {
            (Some(elevation), true) => {
                let mut c = Command::new(elevation);
                c.arg(&request.program);
                c
            }
            _ => Command::new(&request.program),
        };
        command.args(&request.args);

        debug!(program = %request.program, args = ?request.args, elevate, "running command");

        command.output().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RunnerError::NotFound {
                program: request.program.clone(),
            },
            _ => RunnerError::Io(e.to_string()),
        })
    }

    fn check_status(request: &CommandRequest, output: &Output) -> Result<(), RunnerError> {
        if output.status.success() {
            return Ok(());
        }
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(program = %request.program, code, %stderr, "command failed");
        Err(RunnerError::ExitStatus {
            code,
            stderr: if stderr.is_empty() {
                "no output".to_string()
            } else {
                stderr
            },
        })
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, request: &CommandRequest) -> Result<String, RunnerError> {
        Self::ensure_executable(&request.program)?;
        let output = self.spawn(request, false)?;
        Self::check_status(request, &output)?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if stdout.is_empty() {
            NO_OUTPUT.to_string()
        } else {
            stdout
        })
    }

    fn run_elevated(&self, request: &CommandRequest) -> Result<String, RunnerError> {
        Self::ensure_executable(&request.program)?;
        let output = self.spawn(request, true)?;
        Self::check_status(request, &output)?;

        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        let combined = combined.trim().to_string();
        Ok(if combined.is_empty() {
            NO_OUTPUT.to_string()
        } else {
            combined
        })
    }
}
