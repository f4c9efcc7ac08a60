//! Session handle bound to one tmux pane: existence check at construction,
//! key sending, buffer capture, and best-effort session listing.

use regex::Regex;
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::BridgeError;
use crate::executor::TmuxCommandRunner;
use crate::sanitize::strip_control_sequences;
use crate::target::Target;

/// A pane the caller has already authenticated in.
///
/// Not synchronized: two callers driving the same pane concurrently will
/// interleave keystrokes and corrupt each other's marker extraction.
pub struct TmuxSession<R> {
    pub(crate) runner: R,
    target: Target,
    pub(crate) config: SessionConfig,
    pub(crate) prompt: Regex,
}

impl<R: TmuxCommandRunner> TmuxSession<R> {
    /// Resolve `target` and verify its session exists.
    ///
    /// A failing `has-session` becomes `SessionNotFound`, listing whatever
    /// sessions can be enumerated. tmux being missing or hung is propagated
    /// as-is.
    pub async fn connect(
        runner: R,
        target: &str,
        config: SessionConfig,
    ) -> Result<Self, BridgeError> {
        let target = Target::parse(target)?;
        let prompt = Regex::new(&config.prompt_pattern)?;

        match runner.run(&["has-session", "-t", target.session()]).await {
            Ok(_) => {}
            Err(BridgeError::ToolCommandFailed { .. }) => {
                return Err(BridgeError::SessionNotFound {
                    target: target.to_string(),
                    available: list_sessions(&runner).await,
                });
            }
            Err(e) => return Err(e),
        }
        debug!(pane = %target, "attached to tmux session");

        Ok(Self {
            runner,
            target,
            config,
            prompt,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Type `text` literally into the pane, optionally followed by Enter.
    ///
    /// Nothing is escaped: shell metacharacters reach the shell as typed.
    pub async fn send_keys(&self, text: &str, enter: bool) -> Result<(), BridgeError> {
        let target = self.target.as_str();
        if !text.is_empty() {
            self.runner
                .run(&["send-keys", "-t", target, "-l", "--", text])
                .await?;
        }
        if enter {
            self.runner.run(&["send-keys", "-t", target, "Enter"]).await?;
        }
        Ok(())
    }

    /// Send a tmux key name such as `C-c`, `Escape` or `Up`.
    pub async fn send_key(&self, key: &str) -> Result<(), BridgeError> {
        self.runner
            .run(&["send-keys", "-t", self.target.as_str(), key])
            .await?;
        Ok(())
    }

    /// Capture the pane (plus scroll-back when `history`), stripped of
    /// control sequences. With `lines`, only the last `lines` lines.
    pub async fn read_buffer(
        &self,
        lines: Option<usize>,
        history: bool,
    ) -> Result<String, BridgeError> {
        let mut args = vec!["capture-pane", "-p", "-t", self.target.as_str()];
        if history {
            args.extend(["-S", "-"]);
        }
        let raw = self.runner.run(&args).await?;
        let cleaned = strip_control_sequences(&raw);

        Ok(match lines {
            Some(n) => tail_lines(&cleaned, n),
            None => cleaned.into_owned(),
        })
    }
}

fn tail_lines(text: &str, n: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    all[all.len().saturating_sub(n)..].join("\n")
}

/// Names of all current tmux sessions. Empty when listing fails, since this
/// is only used for display.
pub async fn list_sessions(runner: &impl TmuxCommandRunner) -> Vec<String> {
    match runner.run(&["list-sessions", "-F", "#{session_name}"]).await {
        Ok(out) => out
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Err(e) => {
            warn!(error = %e, "listing tmux sessions failed");
            Vec::new()
        }
    }
}

pub async fn session_exists(runner: &impl TmuxCommandRunner, name: &str) -> bool {
    list_sessions(runner).await.iter().any(|s| s == name)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Answers from a closure and records every invocation.
    struct Recorder<F> {
        respond: F,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl<F> Recorder<F>
    where
        F: Fn(&[&str]) -> Result<String, BridgeError> + Send + Sync,
    {
        fn new(respond: F) -> Self {
            Self {
                respond,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<F> TmuxCommandRunner for Recorder<F>
    where
        F: Fn(&[&str]) -> Result<String, BridgeError> + Send + Sync,
    {
        async fn run(&self, args: &[&str]) -> Result<String, BridgeError> {
            self.calls
                .lock()
                .unwrap()
                .push(args.iter().map(|a| a.to_string()).collect());
            (self.respond)(args)
        }
    }

    fn failed(args: &[&str]) -> BridgeError {
        BridgeError::ToolCommandFailed {
            code: Some(1),
            stderr: "no server running".into(),
            args: args.join(" "),
        }
    }

    fn tmux_with_sessions(args: &[&str]) -> Result<String, BridgeError> {
        match args[0] {
            "has-session" if args[2] == "dev" || args[2] == "work" => Ok(String::new()),
            "has-session" => Err(failed(args)),
            "list-sessions" => Ok("dev\nwork\n".into()),
            _ => Ok(String::new()),
        }
    }

    #[tokio::test]
    async fn connect_existing_session() {
        let runner = Recorder::new(tmux_with_sessions);
        let session = TmuxSession::connect(&runner, "work:1.0", SessionConfig::default())
            .await
            .expect("session exists");
        assert_eq!(session.target().as_str(), "work:1.0");
        assert_eq!(runner.calls()[0], ["has-session", "-t", "work"]);
    }

    #[tokio::test]
    async fn connect_missing_session_lists_available() {
        let runner = Recorder::new(tmux_with_sessions);
        let err = TmuxSession::connect(&runner, "prod", SessionConfig::default())
            .await
            .err()
            .expect("should fail");
        match err {
            BridgeError::SessionNotFound { target, available } => {
                assert_eq!(target, "prod");
                assert_eq!(available, ["dev", "work"]);
            }
            other => panic!("expected SessionNotFound, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connect_missing_session_listing_failure_degrades() {
        let runner = Recorder::new(|args: &[&str]| Err(failed(args)));
        let err = TmuxSession::connect(&runner, "prod", SessionConfig::default())
            .await
            .err()
            .expect("should fail");
        assert!(
            matches!(err, BridgeError::SessionNotFound { ref available, .. } if available.is_empty()),
            "got: {err:?}"
        );
    }

    #[tokio::test]
    async fn connect_propagates_tool_unavailable() {
        let runner = Recorder::new(|_: &[&str]| {
            Err(BridgeError::ToolUnavailable {
                bin: "tmux".into(),
            })
        });
        let err = TmuxSession::connect(&runner, "dev", SessionConfig::default())
            .await
            .err()
            .expect("should fail");
        assert!(matches!(err, BridgeError::ToolUnavailable { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn connect_rejects_bad_prompt_pattern() {
        let runner = Recorder::new(tmux_with_sessions);
        let cfg = SessionConfig::default().with_prompt_pattern("[unclosed");
        let err = TmuxSession::connect(&runner, "dev", cfg)
            .await
            .err()
            .expect("should fail");
        assert!(matches!(err, BridgeError::InvalidPromptPattern(_)));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn send_keys_literal_then_enter() {
        let runner = Recorder::new(tmux_with_sessions);
        let session = TmuxSession::connect(&runner, "dev", SessionConfig::default())
            .await
            .expect("connect");
        session.send_keys("ls -la | grep 'x'", true).await.expect("send");
        let calls = runner.calls();
        assert_eq!(
            calls[1],
            ["send-keys", "-t", "dev", "-l", "--", "ls -la | grep 'x'"]
        );
        assert_eq!(calls[2], ["send-keys", "-t", "dev", "Enter"]);
    }

    #[tokio::test]
    async fn send_keys_without_enter() {
        let runner = Recorder::new(tmux_with_sessions);
        let session = TmuxSession::connect(&runner, "dev", SessionConfig::default())
            .await
            .expect("connect");
        session.send_keys(":wq", false).await.expect("send");
        assert_eq!(runner.calls().len(), 2);
    }

    #[tokio::test]
    async fn send_key_by_name() {
        let runner = Recorder::new(tmux_with_sessions);
        let session = TmuxSession::connect(&runner, "dev", SessionConfig::default())
            .await
            .expect("connect");
        session.send_key("C-c").await.expect("send");
        assert_eq!(runner.calls()[1], ["send-keys", "-t", "dev", "C-c"]);
    }

    #[tokio::test]
    async fn read_buffer_sanitizes_then_truncates() {
        let raw: String = (1..=10)
            .map(|i| format!("\x1b[3{}mline {i}\x1b[0m\n", i % 8))
            .collect();
        let runner = Recorder::new(move |args: &[&str]| match args[0] {
            "capture-pane" => Ok(raw.clone()),
            _ => Ok(String::new()),
        });
        let session = TmuxSession::connect(&runner, "dev", SessionConfig::default())
            .await
            .expect("connect");

        let tail = session.read_buffer(Some(2), false).await.expect("read");
        assert_eq!(tail, "line 9\nline 10");

        let full = session.read_buffer(None, false).await.expect("read");
        assert!(!full.contains('\x1b'));
        assert!(full.starts_with("line 1\nline 2\n"));
        assert_eq!(runner.calls()[1], ["capture-pane", "-p", "-t", "dev"]);
    }

    #[tokio::test]
    async fn read_buffer_with_history() {
        let runner = Recorder::new(tmux_with_sessions);
        let session = TmuxSession::connect(&runner, "dev", SessionConfig::default())
            .await
            .expect("connect");
        let out = session.read_buffer(None, true).await.expect("read");
        assert_eq!(out, "");
        assert_eq!(
            runner.calls()[1],
            ["capture-pane", "-p", "-t", "dev", "-S", "-"]
        );
    }

    #[test]
    fn tail_lines_edges() {
        assert_eq!(tail_lines("a\nb\nc\n", 5), "a\nb\nc");
        assert_eq!(tail_lines("a\nb\nc\n", 0), "");
        assert_eq!(tail_lines("", 3), "");
    }

    #[tokio::test]
    async fn list_sessions_skips_blank_lines() {
        let runner = Recorder::new(|_: &[&str]| Ok("dev\n\n  work  \n".to_string()));
        assert_eq!(list_sessions(&runner).await, ["dev", "work"]);
        assert!(session_exists(&runner, "work").await);
        assert!(!session_exists(&runner, "prod").await);
    }

    #[tokio::test]
    async fn list_sessions_never_fails() {
        let runner = Recorder::new(|_: &[&str]| {
            Err(BridgeError::ToolTimeout {
                args: "list-sessions".into(),
                timeout: std::time::Duration::from_secs(10),
            })
        });
        assert!(list_sessions(&runner).await.is_empty());
        assert!(!session_exists(&runner, "dev").await);
    }
}
