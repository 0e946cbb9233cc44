//! Mailer trait and SMTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, instrument};

use super::error::MailError;
use super::message::create_base_email;
use crate::config::MailSettings;
use crate::gutenberg::FetchedBook;

/// Port that expects TLS from the first byte instead of STARTTLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP connection timeout.
pub const SMTP_TIMEOUT_SECS: u64 = 30;

/// Delivers composed messages.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Transport`] on connection, TLS, or
    /// authentication failure.
    async fn send(&self, message: Message) -> Result<(), MailError>;
}

/// SMTP mailer using lettre, authenticated as the configured sender.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Builds a transport for the configured server.
    ///
    /// Port 465 uses implicit TLS; every other port upgrades with STARTTLS.
    /// No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Transport`] if the TLS parameters for the host
    /// cannot be created.
    pub fn new(settings: &MailSettings, password: &str) -> Result<Self, MailError> {
        let builder = if settings.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_server)?
        };

        let transport = builder
            .port(settings.smtp_port)
            .timeout(Some(Duration::from_secs(SMTP_TIMEOUT_SECS)))
            .credentials(Credentials::new(
                settings.sender_email.clone(),
                password.to_string(),
            ))
            .build();

        debug!(
            server = %settings.smtp_server,
            port = settings.smtp_port,
            "SMTP transport configured"
        );
        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: Message) -> Result<(), MailError> {
        let response = self.transport.send(message).await?;
        debug!(code = %response.code(), "SMTP server accepted message");
        Ok(())
    }
}

/// Attaches a book to a fresh base email and hands it to `mailer`.
///
/// Transport failures are returned unchanged so the caller can stop the run.
///
/// # Errors
///
/// Returns [`MailError`] if composing or sending the message fails.
#[instrument(skip(mailer, settings, book), fields(book_id = %book.id(), bytes = book.len()))]
pub async fn send_book(
    mailer: &dyn Mailer,
    settings: &MailSettings,
    book: FetchedBook,
) -> Result<(), MailError> {
    let message = create_base_email(&settings.sender_email, &settings.kindle_email)?
        .with_book(book)
        .into_message()?;
    mailer.send(message).await?;
    info!(recipient = %settings.kindle_email, "Book email sent");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::gutenberg::BookId;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<Message>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: Message) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    fn mail_settings() -> MailSettings {
        MailSettings {
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            sender_email: "sender@example.com".to_string(),
            kindle_email: "reader@kindle.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_book_delivers_message_with_attachment() {
        let mailer = RecordingMailer::default();
        let book = FetchedBook::new(BookId::new(84).unwrap(), b"frankenstein".to_vec());

        send_book(&mailer, &mail_settings(), book).await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let envelope = sent[0].envelope();
        assert_eq!(envelope.from().unwrap().to_string(), "sender@example.com");
        assert_eq!(envelope.to()[0].to_string(), "reader@kindle.com");
        let text = String::from_utf8(sent[0].formatted()).unwrap();
        assert!(text.contains("84.mobi"));
    }

    #[tokio::test]
    async fn test_send_book_rejects_bad_recipient_before_sending() {
        let mailer = RecordingMailer::default();
        let settings = MailSettings {
            kindle_email: "broken".to_string(),
            ..mail_settings()
        };
        let book = FetchedBook::new(BookId::new(1).unwrap(), b"x".to_vec());

        let err = send_book(&mailer, &settings, book).await.unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress { .. }));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }
}
