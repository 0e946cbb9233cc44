use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::ProcessExit;
use crate::app::{command_dispatcher, terminal};
use crate::cli::Cli;

pub(crate) async fn run() -> Result<ProcessExit> {
    let cli = Cli::parse();

    let no_color = terminal::should_disable_color(
        terminal::no_color_env_requested(),
        terminal::is_dumb_terminal(),
    );
    terminal::init_tracing(terminal::default_log_level(cli.verbose, cli.quiet), no_color);

    debug!(?cli, "CLI arguments parsed");

    command_dispatcher::dispatch(&cli.command).await
}
