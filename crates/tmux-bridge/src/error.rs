//! Error types for the tmux bridge.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{bin} is not installed or not in PATH")]
    ToolUnavailable { bin: String },

    #[error("tmux command timed out after {:.1}s: {args}", .timeout.as_secs_f64())]
    ToolTimeout { args: String, timeout: Duration },

    #[error("tmux command failed (exit {}): {args}\nstderr: {stderr}", display_code(.code))]
    ToolCommandFailed {
        /// `None` when the process was killed by a signal.
        code: Option<i32>,
        stderr: String,
        args: String,
    },

    #[error("tmux io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tmux session '{target}' does not exist. Available sessions: {available:?}")]
    SessionNotFound {
        target: String,
        available: Vec<String>,
    },

    #[error("command did not complete within {:.1}s: {command:?}", .timeout.as_secs_f64())]
    CommandTimeout { timeout: Duration, command: String },

    #[error("invalid prompt pattern: {0}")]
    InvalidPromptPattern(#[from] regex::Error),

    #[error("invalid target {0:?}: expected session[:window[.pane]]")]
    InvalidTarget(String),
}

impl BridgeError {
    /// True for the logical polling timeout, as opposed to a hung tmux call.
    pub fn is_command_timeout(&self) -> bool {
        matches!(self, BridgeError::CommandTimeout { .. })
    }
}

fn display_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "signal".into())
}
