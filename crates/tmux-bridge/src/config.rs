//! Execution defaults bound to a session handle, plus per-call overrides.

use std::time::Duration;

/// Matches a trailing `$`, `#` or `>` prompt at end of line. The space is
/// optional because `capture-pane` trims trailing whitespace.
pub const DEFAULT_PROMPT_PATTERN: &str = r"[$#>] ?$";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Pause between the start-marker echo and the command itself.
pub const DEFAULT_MARKER_SETTLE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Regex for the prompt-fallback protocol.
    pub prompt_pattern: String,
    pub default_timeout: Duration,
    pub poll_interval: Duration,
    pub marker_settle: Duration,
    /// Wait for the start marker to render instead of sleeping `marker_settle`.
    pub confirm_start_marker: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt_pattern: DEFAULT_PROMPT_PATTERN.to_string(),
            default_timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            marker_settle: DEFAULT_MARKER_SETTLE,
            confirm_start_marker: false,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_prompt_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.prompt_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn with_marker_settle(mut self, settle: Duration) -> Self {
        self.marker_settle = settle;
        self
    }

    #[must_use]
    pub fn with_confirm_start_marker(mut self, confirm: bool) -> Self {
        self.confirm_start_marker = confirm;
        self
    }
}

/// Per-call overrides for `execute_and_wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOptions {
    pub timeout: Option<Duration>,
    pub poll_interval: Option<Duration>,
    pub use_markers: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_interval: None,
            use_markers: true,
        }
    }
}

impl ExecOptions {
    /// Prompt-pattern fallback instead of markers.
    pub fn prompt_fallback() -> Self {
        Self {
            use_markers: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }
}
