//! Book email composition and SMTP delivery.
//!
//! Books travel as a single `multipart/mixed` message: a short plain-text
//! note plus the `.mobi` file as a base64 attachment. Sizes are checked in
//! whole megabytes, rounded up, before anything is sent.

mod error;
mod mailer;
mod message;

pub use error::MailError;
pub use mailer::{IMPLICIT_TLS_PORT, Mailer, SMTP_TIMEOUT_SECS, SmtpMailer, send_book};
pub use message::{
    BookEmail, EMAIL_BODY, EMAIL_SUBJECT, MAX_FILE_SIZE_MB, bytes_to_mb, create_base_email,
    is_valid_file_size,
};
