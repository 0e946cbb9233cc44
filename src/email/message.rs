//! Book email composition and attachment size checks.

use lettre::Message;
use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Attachment, Body, Mailbox, MultiPart, SinglePart};

use super::error::MailError;
use crate::gutenberg::FetchedBook;

/// Subject line of every book email.
pub const EMAIL_SUBJECT: &str = "Your Project Gutenberg ebook!";

/// Plain-text body of every book email.
pub const EMAIL_BODY: &str = "- Sent with gutenberg2kindle. Happy reading!";

/// Largest attachment sent, in whole megabytes.
pub const MAX_FILE_SIZE_MB: u64 = 25;

const BYTES_PER_MB: u64 = 1_048_576;

const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// Converts a byte count to whole megabytes, rounding up.
#[must_use]
pub fn bytes_to_mb(bytes: u64) -> u64 {
    bytes.div_ceil(BYTES_PER_MB)
}

/// Whether `content` fits under `limit_mb` once rounded up to whole megabytes.
#[must_use]
pub fn is_valid_file_size(content: &[u8], limit_mb: u64) -> bool {
    bytes_to_mb(content.len() as u64) <= limit_mb
}

struct BookAttachment {
    filename: String,
    content: Vec<u8>,
}

/// A book email before it is turned into a MIME message.
pub struct BookEmail {
    from: Mailbox,
    to: Mailbox,
    attachment: Option<BookAttachment>,
}

/// Builds the base email: fixed subject and body, no attachment yet.
///
/// # Errors
///
/// Returns [`MailError::InvalidAddress`] when either address does not parse.
pub fn create_base_email(sender: &str, recipient: &str) -> Result<BookEmail, MailError> {
    Ok(BookEmail {
        from: parse_mailbox(sender)?,
        to: parse_mailbox(recipient)?,
        attachment: None,
    })
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|source| MailError::invalid_address(address, source))
}

impl BookEmail {
    /// Sender mailbox.
    #[must_use]
    pub fn from(&self) -> &Mailbox {
        &self.from
    }

    /// Recipient mailbox.
    #[must_use]
    pub fn to(&self) -> &Mailbox {
        &self.to
    }

    /// Attaches a downloaded book as `<id>.mobi`.
    #[must_use]
    pub fn with_book(mut self, book: FetchedBook) -> Self {
        let filename = book.id().attachment_filename();
        self.attachment = Some(BookAttachment {
            filename,
            content: book.into_content(),
        });
        self
    }

    /// Assembles the `multipart/mixed` message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Attachment`] if the attachment cannot be encoded
    /// and [`MailError::Build`] if the message headers are rejected.
    pub fn into_message(self) -> Result<Message, MailError> {
        let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(EMAIL_BODY.to_string()));

        if let Some(attachment) = self.attachment {
            parts = parts.singlepart(attachment_part(attachment)?);
        }

        let message = Message::builder()
            .from(self.from)
            .to(self.to)
            .subject(EMAIL_SUBJECT)
            .multipart(parts)?;
        Ok(message)
    }
}

fn attachment_part(attachment: BookAttachment) -> Result<SinglePart, MailError> {
    let BookAttachment { filename, content } = attachment;
    let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE).map_err(|error| {
        MailError::Attachment {
            filename: filename.clone(),
            reason: error.to_string(),
        }
    })?;
    let body = Body::new_with_encoding(content, ContentTransferEncoding::Base64).map_err(|_| {
        MailError::Attachment {
            filename: filename.clone(),
            reason: "content cannot be base64 encoded".to_string(),
        }
    })?;
    Ok(Attachment::new(filename).body(body, content_type))
}
