//! CLI entry point for gutenberg2kindle.

use std::process::ExitCode;

mod app;
mod cli;
mod commands;

/// Process outcome of a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Failure => ExitCode::FAILURE,
        }
    }
}

// One command per invocation, every network call awaited in order.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match app::runtime::run().await {
        Ok(exit) => exit.into(),
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
