//! tmux-bridge: drive an already-authenticated tmux pane from an agent.
//!
//! Sends keystrokes, reads sanitized pane text, and runs commands
//! synchronously by bracketing them with echoed markers (or, as a weaker
//! fallback, by watching for a shell prompt). tmux itself is reached only
//! through [`TmuxCommandRunner`], so everything above it can be tested with
//! scripted panes.

pub mod config;
pub mod error;
mod execute;
pub mod executor;
pub mod markers;
pub mod prompt;
pub mod sanitize;
pub mod session;
pub mod target;

pub use config::{ExecOptions, SessionConfig};
pub use error::BridgeError;
pub use executor::{TmuxCommandRunner, TmuxExecutor};
pub use markers::MarkerPair;
pub use sanitize::strip_control_sequences;
pub use session::{TmuxSession, list_sessions, session_exists};
pub use target::Target;
