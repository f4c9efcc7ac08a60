//! Shared setup for every subcommand: logging and the tmux executor.

use std::time::Duration;

use tmux_bridge::TmuxExecutor;
use tracing_subscriber::EnvFilter;

use crate::cli::TmuxOpts;

/// Log to stderr; stdout carries pane text and command output.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("TMUX_BRIDGE_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string())
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

pub fn build_executor(opts: &TmuxOpts) -> TmuxExecutor {
    let mut executor = TmuxExecutor::new(&opts.tmux_bin)
        .with_call_timeout(Duration::from_millis(opts.call_timeout_ms));
    if let Some(ref path) = opts.socket_path {
        executor = executor.with_socket_path(path);
    }
    if let Some(ref name) = opts.socket_name {
        executor = executor.with_socket_name(name);
    }
    executor
}
