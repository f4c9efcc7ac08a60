//! `tmux-bridge read`: print the pane buffer.

use tmux_bridge::{SessionConfig, TmuxExecutor, TmuxSession};

use crate::cli::ReadOpts;

pub async fn cmd_read(executor: TmuxExecutor, opts: &ReadOpts) -> anyhow::Result<()> {
    let session = TmuxSession::connect(executor, &opts.session, SessionConfig::default()).await?;
    let output = session.read_buffer(opts.lines, opts.history).await?;
    println!("{output}");
    Ok(())
}
