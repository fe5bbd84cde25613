use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

use crate::cancel::CancelToken;
use crate::errors::GitdepsError;

/// Default time budget for a single child process.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Builder for constructing and executing external processes.
///
/// Provides a fluent API for setting program, arguments, working directory,
/// and a per-invocation timeout. The child is killed if the timeout elapses
/// or the future is dropped.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    timeout: Duration,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Override the default timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Execute the command and return its output.
    ///
    /// The cancellation token is consulted before spawning; a child that is
    /// already running is not interrupted mid-flight but is bounded by the
    /// timeout.
    pub async fn exec(&self, cancel: &CancelToken) -> Result<Output, GitdepsError> {
        cancel.check()?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(Path::new(dir));
        }
        cmd.kill_on_drop(true);

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => result.map_err(GitdepsError::from),
            Err(_) => Err(GitdepsError::Timeout {
                op: self.program.clone(),
                seconds: self.timeout.as_secs(),
            }),
        }
    }
}
