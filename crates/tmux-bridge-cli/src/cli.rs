//! CLI definition using clap derive.

use clap::{ArgGroup, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tmux-bridge",
    version,
    about = "Drive an already-authenticated tmux session: read, type, run"
)]
pub struct Cli {
    #[command(flatten)]
    pub tmux: TmuxOpts,

    /// Log at debug level (overrides TMUX_BRIDGE_LOG / RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// How to reach tmux.
#[derive(clap::Args)]
pub struct TmuxOpts {
    /// tmux binary
    #[arg(long, global = true, env = "TMUX_BRIDGE_TMUX_BIN", default_value = "tmux")]
    pub tmux_bin: String,

    /// tmux socket name (-L)
    #[arg(long, global = true, env = "TMUX_BRIDGE_SOCKET_NAME")]
    pub socket_name: Option<String>,

    /// tmux socket path (-S), takes precedence over --socket-name
    #[arg(long, global = true, env = "TMUX_BRIDGE_SOCKET_PATH")]
    pub socket_path: Option<String>,

    /// Hard limit for each individual tmux invocation, in milliseconds
    #[arg(
        long,
        global = true,
        env = "TMUX_BRIDGE_CALL_TIMEOUT_MS",
        default_value = "10000"
    )]
    pub call_timeout_ms: u64,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the pane's current contents
    Read(ReadOpts),
    /// Type text or a control key without waiting for anything
    Send(SendOpts),
    /// Run a command and print only its output
    Run(RunOpts),
    /// List tmux sessions
    Ls(LsOpts),
}

#[derive(clap::Args)]
pub struct ReadOpts {
    /// Target: session, or session:window.pane
    pub session: String,

    /// Only the last N lines
    #[arg(long)]
    pub lines: Option<usize>,

    /// Include scroll-back history
    #[arg(long)]
    pub history: bool,
}

#[derive(clap::Args)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["text", "ctrl", "key"])
))]
pub struct SendOpts {
    /// Target: session, or session:window.pane
    pub session: String,

    /// Text to type literally
    pub text: Option<String>,

    /// Do not press Enter after the text
    #[arg(long)]
    pub no_enter: bool,

    /// Send Ctrl+KEY (a-z, or `[` for Escape)
    #[arg(long, value_name = "KEY")]
    pub ctrl: Option<String>,

    /// Send a raw tmux key name (e.g. Up, Tab, F5)
    #[arg(long, value_name = "NAME")]
    pub key: Option<String>,
}

#[derive(clap::Args)]
pub struct RunOpts {
    /// Target: session, or session:window.pane
    pub session: String,

    /// Command to execute
    pub command: String,

    /// Seconds to wait for completion
    #[arg(long, default_value_t = 30.0)]
    pub timeout: f64,

    /// Milliseconds between pane captures while waiting
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Detect completion by prompt pattern instead of echo markers
    #[arg(long)]
    pub no_markers: bool,

    /// Prompt regex for --no-markers
    #[arg(long)]
    pub prompt_pattern: Option<String>,

    /// Wait for the start marker to render before typing the command
    #[arg(long)]
    pub confirm_start: bool,
}

#[derive(clap::Args)]
pub struct LsOpts {
    /// Print a JSON array instead of one name per line
    #[arg(long)]
    pub json: bool,
}
