//! CLI command handlers.

mod config;
mod send;
mod version;

pub(crate) use config::{
    run_get_config_command, run_interactive_config_command, run_set_config_command,
};
pub(crate) use send::run_send_command;
pub(crate) use version::run_version_command;
