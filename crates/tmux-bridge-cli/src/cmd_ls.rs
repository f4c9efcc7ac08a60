//! `tmux-bridge ls`: list sessions.

use std::process::ExitCode;

use tmux_bridge::{TmuxExecutor, list_sessions};

pub async fn cmd_ls(executor: &TmuxExecutor, json: bool) -> anyhow::Result<ExitCode> {
    let sessions = list_sessions(executor).await;

    if json {
        println!("{}", serde_json::to_string(&sessions)?);
        return Ok(ExitCode::SUCCESS);
    }

    if sessions.is_empty() {
        eprintln!("No tmux sessions found.");
        eprintln!("Start one with: tmux new -s <name>");
        return Ok(ExitCode::FAILURE);
    }
    for name in &sessions {
        println!("{name}");
    }
    Ok(ExitCode::SUCCESS)
}
