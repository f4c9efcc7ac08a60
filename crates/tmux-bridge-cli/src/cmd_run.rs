//! `tmux-bridge run`: execute a command and print its output.

use std::time::Duration;

use anyhow::Context;
use tmux_bridge::{ExecOptions, SessionConfig, TmuxExecutor, TmuxSession};

use crate::cli::RunOpts;

pub(crate) fn session_config(opts: &RunOpts) -> anyhow::Result<SessionConfig> {
    let timeout = Duration::try_from_secs_f64(opts.timeout)
        .with_context(|| format!("invalid --timeout {}", opts.timeout))?;
    let mut config = SessionConfig::default()
        .with_default_timeout(timeout)
        .with_confirm_start_marker(opts.confirm_start);
    if let Some(ref pattern) = opts.prompt_pattern {
        config = config.with_prompt_pattern(pattern);
    }
    if let Some(ms) = opts.poll_interval_ms {
        config = config.with_poll_interval(Duration::from_millis(ms));
    }
    Ok(config)
}

pub async fn cmd_run(executor: TmuxExecutor, opts: &RunOpts) -> anyhow::Result<()> {
    let config = session_config(opts)?;
    let session = TmuxSession::connect(executor, &opts.session, config).await?;
    let exec = ExecOptions {
        use_markers: !opts.no_markers,
        ..ExecOptions::default()
    };
    let output = session.execute_and_wait(&opts.command, exec).await?;
    println!("{output}");
    Ok(())
}
