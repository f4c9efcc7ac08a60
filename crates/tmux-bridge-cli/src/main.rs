//! tmux-bridge: command-line front end for driving an authenticated tmux
//! session.
//!
//! Exit codes: 0 success, 1 failure, 2 `run` timed out.

use std::process::ExitCode;

use clap::Parser;
use tmux_bridge::BridgeError;

mod cli;
mod cmd_ls;
mod cmd_read;
mod cmd_run;
mod cmd_send;
mod context;

const EXIT_TIMEOUT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Cli::parse();
    context::init_tracing(args.verbose);

    let executor = context::build_executor(&args.tmux);
    tracing::debug!(
        tmux_bin = %executor.tmux_bin(),
        call_timeout = ?executor.call_timeout(),
        "tmux-bridge starting"
    );
    let result = match args.command {
        cli::Command::Read(opts) => cmd_read::cmd_read(executor, &opts)
            .await
            .map(|()| ExitCode::SUCCESS),
        cli::Command::Send(opts) => cmd_send::cmd_send(executor, &opts)
            .await
            .map(|()| ExitCode::SUCCESS),
        cli::Command::Run(opts) => cmd_run::cmd_run(executor, &opts)
            .await
            .map(|()| ExitCode::SUCCESS),
        cli::Command::Ls(opts) => cmd_ls::cmd_ls(&executor, opts.json).await,
    };

    result.unwrap_or_else(|err| report(&err))
}

fn report(err: &anyhow::Error) -> ExitCode {
    tracing::debug!(error = ?err, "command failed");
    let timed_out = err
        .downcast_ref::<BridgeError>()
        .is_some_and(BridgeError::is_command_timeout);
    if timed_out {
        eprintln!("TIMEOUT: {err:#}");
        ExitCode::from(EXIT_TIMEOUT)
    } else {
        eprintln!("ERROR: {err:#}");
        ExitCode::FAILURE
    }
}
