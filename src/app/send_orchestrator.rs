//! Sequential fetch → size check → send loop behind the `send` command.
//!
//! Books are processed strictly in the order requested. A book that cannot be
//! downloaded stops the run unless errors are ignored; an oversized book is
//! reported and skipped; an SMTP failure always stops the run.

use std::io::Write;

use anyhow::{Context, Result};
use gutenberg2kindle_core::{
    BookId, BookSource, FormatPreference, MailError, MailSettings, Mailer, bytes_to_mb,
    is_valid_file_size, send_book,
};
use tracing::{debug, info, warn};

/// Everything the loop needs besides its collaborators.
#[derive(Debug, Clone)]
pub(crate) struct SendRequest {
    pub(crate) book_ids: Vec<BookId>,
    pub(crate) format: FormatPreference,
    pub(crate) ignore_errors: bool,
    pub(crate) max_file_size_mb: u64,
}

/// Why a run ended before the last book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SendStop {
    DownloadFailed(BookId),
    Transport,
}

/// Outcome of a send run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SendSummary {
    pub(crate) sent: usize,
    pub(crate) skipped: usize,
    pub(crate) stopped: Option<SendStop>,
}

/// Runs the send loop, writing the per-book report to `out`.
///
/// Transport-level download errors are returned as `Err` and end the run.
pub(crate) async fn run_send(
    source: &dyn BookSource,
    mailer: &dyn Mailer,
    mail_settings: &MailSettings,
    request: &SendRequest,
    out: &mut dyn Write,
) -> Result<SendSummary> {
    let mut summary = SendSummary::default();

    for &book_id in &request.book_ids {
        let book = source
            .download_book(book_id, request.format)
            .await
            .with_context(|| format!("failed to download book {book_id}"))?;

        let Some(book) = book else {
            writeln!(out, "Book `{book_id}` could not be downloaded!")?;
            if request.ignore_errors {
                writeln!(out, "Skipping book `{book_id}`...")?;
                summary.skipped += 1;
                continue;
            }
            warn!(book_id = %book_id, "Stopping: book could not be downloaded");
            summary.stopped = Some(SendStop::DownloadFailed(book_id));
            return Ok(summary);
        };

        writeln!(out, "Sending book `{book_id}`...")?;
        out.flush()?;

        if !is_valid_file_size(book.content(), request.max_file_size_mb) {
            let size_mb = bytes_to_mb(book.len());
            writeln!(
                out,
                "Book `{book_id}` could not be sent, please check its file size ({size_mb} MB, limit is {} MB).",
                request.max_file_size_mb
            )?;
            info!(book_id = %book_id, size_mb, "Skipping oversized book");
            summary.skipped += 1;
            continue;
        }

        match send_book(mailer, mail_settings, book).await {
            Ok(()) => {
                writeln!(out, "Book `{book_id}` sent!")?;
                summary.sent += 1;
            }
            Err(MailError::Transport(error)) => {
                writeln!(
                    out,
                    "SMTP credentials are invalid! Please validate your current config."
                )?;
                writeln!(out, "Server error message: {error}")?;
                warn!(book_id = %book_id, "Stopping: SMTP transport failed");
                summary.stopped = Some(SendStop::Transport);
                return Ok(summary);
            }
            Err(other) => {
                return Err(other).with_context(|| format!("failed to send book {book_id}"));
            }
        }
    }

    if request.book_ids.len() > 1 {
        writeln!(out, "{} books sent successfully!", summary.sent)?;
    }
    debug!(sent = summary.sent, skipped = summary.skipped, "Send run finished");
    Ok(summary)
}
