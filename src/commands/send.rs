//! Send command handler: resolve settings and credentials, then run the loop.

use std::env;
use std::io::Write;

use anyhow::{Context, Result};
use gutenberg2kindle_core::{GutenbergClient, MAX_FILE_SIZE_MB, SettingsStore, SmtpMailer};
use tracing::{debug, warn};

use crate::ProcessExit;
use crate::app::exit_handler::determine_exit_outcome;
use crate::app::send_orchestrator::{SendRequest, run_send};
use crate::cli::SendArgs;

/// Environment variable that supplies the SMTP password non-interactively.
pub(crate) const SMTP_PASSWORD_ENV: &str = "SMTP_PASSWORD";

const PASSWORD_PROMPT: &str = "Please enter your SMTP password: ";

pub(crate) async fn run_send_command<W: Write>(
    args: &SendArgs,
    out: &mut W,
) -> Result<ProcessExit> {
    let store = SettingsStore::open_default().context("failed to open settings")?;
    let settings = store.settings();
    let format = settings.format_preference()?;
    let mail_settings = settings.mail_settings()?;

    let password = smtp_password(env::var(SMTP_PASSWORD_ENV).ok())?;

    let mailer = match SmtpMailer::new(&mail_settings, &password) {
        Ok(mailer) => mailer,
        Err(error) => {
            warn!(server = %mail_settings.smtp_server, "Could not configure SMTP transport");
            writeln!(
                out,
                "SMTP credentials are invalid! Please validate your current config."
            )?;
            writeln!(out, "Server error message: {error}")?;
            return Ok(ProcessExit::Failure);
        }
    };
    let source = GutenbergClient::new().context("failed to build HTTP client")?;

    let request = SendRequest {
        book_ids: args.book_ids.clone(),
        format,
        ignore_errors: args.ignore_errors,
        max_file_size_mb: MAX_FILE_SIZE_MB,
    };
    debug!(?request, "Starting send run");

    let summary = run_send(&source, &mailer, &mail_settings, &request, out).await?;
    Ok(determine_exit_outcome(&summary))
}

/// Uses the environment value when it is non-empty, otherwise prompts
/// without echo.
fn smtp_password(from_env: Option<String>) -> Result<String> {
    match from_env {
        Some(password) if !password.is_empty() => {
            debug!("Using SMTP password from {SMTP_PASSWORD_ENV}");
            Ok(password)
        }
        _ => rpassword::prompt_password(PASSWORD_PROMPT).context("failed to read SMTP password"),
    }
}
