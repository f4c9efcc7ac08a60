//! TmuxCommandRunner trait and TmuxExecutor (async subprocess wrapper with a
//! hard per-call timeout).

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::BridgeError;

/// Per-invocation timeout guarding against tmux itself hanging.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for executing tmux commands. Enables mock injection for testing.
///
/// Implementations return stdout verbatim; sanitizing is the caller's job.
#[async_trait]
pub trait TmuxCommandRunner: Send + Sync {
    async fn run(&self, args: &[&str]) -> Result<String, BridgeError>;
}

#[async_trait]
impl<T: TmuxCommandRunner + ?Sized> TmuxCommandRunner for &T {
    async fn run(&self, args: &[&str]) -> Result<String, BridgeError> {
        (**self).run(args).await
    }
}

#[async_trait]
impl<T: TmuxCommandRunner + ?Sized> TmuxCommandRunner for std::sync::Arc<T> {
    async fn run(&self, args: &[&str]) -> Result<String, BridgeError> {
        (**self).run(args).await
    }
}

/// Real tmux executor using `tokio::process::Command`.
#[derive(Debug, Clone)]
pub struct TmuxExecutor {
    tmux_bin: String,
    socket_path: Option<String>,
    socket_name: Option<String>,
    call_timeout: Duration,
}

impl TmuxExecutor {
    pub fn new(tmux_bin: impl Into<String>) -> Self {
        Self {
            tmux_bin: tmux_bin.into(),
            socket_path: None,
            socket_name: None,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_socket_name(mut self, name: impl Into<String>) -> Self {
        self.socket_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn tmux_bin(&self) -> &str {
        &self.tmux_bin
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.tmux_bin);
        // Socket path takes precedence over socket name
        if let Some(ref path) = self.socket_path {
            cmd.args(["-S", path]);
        } else if let Some(ref name) = self.socket_name {
            cmd.args(["-L", name]);
        }
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new("tmux")
    }
}

#[async_trait]
impl TmuxCommandRunner for TmuxExecutor {
    async fn run(&self, args: &[&str]) -> Result<String, BridgeError> {
        debug!(bin = %self.tmux_bin, args = ?args, "invoking tmux");
        let output = match tokio::time::timeout(self.call_timeout, self.command(args).output()).await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BridgeError::ToolUnavailable {
                    bin: self.tmux_bin.clone(),
                });
            }
            Ok(Err(e)) => return Err(BridgeError::Io(e)),
            // Dropping the output future kills the child (kill_on_drop).
            Err(_) => {
                return Err(BridgeError::ToolTimeout {
                    args: args.join(" "),
                    timeout: self.call_timeout,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BridgeError::ToolCommandFailed {
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
                args: args.join(" "),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
