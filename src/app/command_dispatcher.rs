//! CLI command routing: runs exactly one command per invocation and returns
//! its exit outcome.

use std::io;

use anyhow::Result;

use crate::cli::Command;
use crate::{ProcessExit, commands};

/// Runs `command`, writing its user-facing report to stdout.
pub(crate) async fn dispatch(command: &Command) -> Result<ProcessExit> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Send(send_args) => commands::run_send_command(send_args, &mut out).await,
        Command::GetConfig(get_args) => commands::run_get_config_command(get_args, &mut out),
        Command::SetConfig(set_args) => commands::run_set_config_command(set_args, &mut out),
        Command::InteractiveConfig => {
            let stdin = io::stdin();
            commands::run_interactive_config_command(&mut stdin.lock(), &mut out)
        }
        Command::Version => commands::run_version_command(&mut out),
    }
}
