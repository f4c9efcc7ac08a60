//! `tmux-bridge send`: type into the pane without waiting.

use anyhow::bail;
use tmux_bridge::{SessionConfig, TmuxExecutor, TmuxSession};

use crate::cli::SendOpts;

/// tmux key name for Ctrl+`key`: `C-a`..`C-z`, or `Escape` for `[`.
pub(crate) fn ctrl_key_name(key: &str) -> Option<String> {
    let lower = key.to_ascii_lowercase();
    match lower.as_bytes() {
        [b'['] => Some("Escape".to_string()),
        [c] if c.is_ascii_lowercase() => Some(format!("C-{lower}")),
        _ => None,
    }
}

pub async fn cmd_send(executor: TmuxExecutor, opts: &SendOpts) -> anyhow::Result<()> {
    let ctrl = match opts.ctrl.as_deref() {
        Some(key) => match ctrl_key_name(key) {
            Some(name) => Some(name),
            None => bail!("Unknown ctrl key: {key:?}"),
        },
        None => None,
    };

    let session = TmuxSession::connect(executor, &opts.session, SessionConfig::default()).await?;
    if let Some(name) = ctrl {
        session.send_key(&name).await?;
    }
    if let Some(ref name) = opts.key {
        session.send_key(name).await?;
    }
    if let Some(ref text) = opts.text {
        session.send_keys(text, !opts.no_enter).await?;
    }
    Ok(())
}
