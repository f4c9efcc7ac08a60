//! Synchronous command execution on top of a session handle.
//!
//! tmux has no completion notification, so both protocols poll the pane's
//! rendered scroll-back until a completion signal shows up or the deadline
//! passes.
//!
//! Marker protocol (default):
//!
//! ```text
//! send  echo '__BRIDGE_START_<tok>__'   then settle (or wait for it to render)
//! send  <command>
//! send  echo '__BRIDGE_END_<tok>__'     runs only after <command> returns
//! poll  capture -S -  until  ...START..<output>..END...  is rendered
//! ```
//!
//! The end marker is a separate submission rather than `cmd && echo`, so a
//! failing command still terminates the wait.
//!
//! Prompt fallback: capture before sending, then poll until the newest line
//! of the positional diff (or the visible screen) matches the prompt pattern.
//! The baseline capture is measured without its trailing padding rows, so
//! the first new line is the remainder of the prompt line: the echoed
//! command.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

use crate::config::ExecOptions;
use crate::error::BridgeError;
use crate::executor::TmuxCommandRunner;
use crate::markers::{MarkerPair, clean_marker_output};
use crate::prompt::{completed_output, last_content_line, positional_suffix, strip_echo_and_prompt};
use crate::session::TmuxSession;

impl<R: TmuxCommandRunner> TmuxSession<R> {
    /// Run `command` in the pane and return exactly what it printed.
    ///
    /// Fails with `CommandTimeout` if completion isn't observed within the
    /// timeout; any tmux failure along the way aborts immediately.
    pub async fn execute_and_wait(
        &self,
        command: &str,
        opts: ExecOptions,
    ) -> Result<String, BridgeError> {
        let timeout = opts.timeout.unwrap_or(self.config.default_timeout);
        let interval = opts.poll_interval.unwrap_or(self.config.poll_interval);
        let deadline = Instant::now() + timeout;

        let poll = Poll {
            command,
            timeout,
            interval,
            deadline,
        };
        if opts.use_markers {
            self.execute_with_markers(&poll).await
        } else {
            self.execute_with_prompt(&poll).await
        }
    }

    async fn execute_with_markers(&self, poll: &Poll<'_>) -> Result<String, BridgeError> {
        let markers = MarkerPair::generate();
        debug!(pane = %self.target(), start = %markers.start, "executing with markers");

        self.send_keys(&markers.start_echo(), true).await?;
        if self.config.confirm_start_marker {
            self.await_start_marker(&markers, poll).await?;
        } else {
            sleep(self.config.marker_settle).await;
        }
        self.send_keys(poll.command, true).await?;
        self.send_keys(&markers.end_echo(), true).await?;

        loop {
            let buf = self.read_buffer(None, true).await?;
            if let Some(raw) = markers.extract(&buf) {
                debug!(pane = %self.target(), "end marker observed");
                return Ok(clean_marker_output(raw, poll.command));
            }
            poll.tick().await?;
        }
    }

    /// Block until the start marker's echo output is on screen, so the
    /// command cannot render ahead of it.
    async fn await_start_marker(
        &self,
        markers: &MarkerPair,
        poll: &Poll<'_>,
    ) -> Result<(), BridgeError> {
        loop {
            let buf = self.read_buffer(None, true).await?;
            if markers.start_rendered(&buf) {
                return Ok(());
            }
            poll.tick().await?;
        }
    }

    async fn execute_with_prompt(&self, poll: &Poll<'_>) -> Result<String, BridgeError> {
        debug!(pane = %self.target(), pattern = %self.prompt, "executing with prompt fallback");
        let pre_buffer = self.read_buffer(None, true).await?;
        self.send_keys(poll.command, true).await?;

        loop {
            poll.tick().await?;

            let buf = self.read_buffer(None, true).await?;
            let new_content = positional_suffix(pre_buffer.trim_end(), &buf);
            if let Some(output) = completed_output(new_content, &self.prompt) {
                return Ok(output);
            }

            // Until the command echo renders, the visible prompt is still the
            // one from before the command was sent.
            if last_content_line(new_content).is_none() {
                continue;
            }
            let visible = self.read_buffer(None, false).await?;
            if last_content_line(&visible).is_some_and(|line| self.prompt.is_match(line)) {
                trace!(pane = %self.target(), "prompt seen on visible screen");
                return Ok(strip_echo_and_prompt(new_content, &self.prompt));
            }
        }
    }
}

/// Deadline bookkeeping shared by every wait in one call.
struct Poll<'a> {
    command: &'a str,
    timeout: Duration,
    interval: Duration,
    deadline: Instant,
}

impl Poll<'_> {
    /// Sleep one interval (clamped to the deadline), or fail once the
    /// deadline has passed.
    async fn tick(&self) -> Result<(), BridgeError> {
        let now = Instant::now();
        if now >= self.deadline {
            return Err(BridgeError::CommandTimeout {
                timeout: self.timeout,
                command: self.command.to_string(),
            });
        }
        let remaining = self.deadline - now;
        trace!(?remaining, "completion not observed yet");
        sleep(self.interval.min(remaining)).await;
        Ok(())
    }
}
