//! Error types for email composition and delivery.

use thiserror::Error;

/// Errors that can occur while composing or sending a book email.
#[derive(Debug, Error)]
pub enum MailError {
    /// An address could not be parsed into a mailbox.
    #[error("invalid email address `{address}`: {source}")]
    InvalidAddress {
        /// The rejected address.
        address: String,
        /// The underlying parse error.
        #[source]
        source: lettre::address::AddressError,
    },

    /// The attachment part could not be encoded.
    #[error("failed to attach {filename}: {reason}")]
    Attachment {
        /// Attachment filename.
        filename: String,
        /// Why the part could not be built.
        reason: String,
    },

    /// The MIME message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// Connection, TLS, authentication, or delivery failure reported by the
    /// SMTP transport.
    #[error(transparent)]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl MailError {
    /// Creates an invalid address error.
    pub fn invalid_address(
        address: impl Into<String>,
        source: lettre::address::AddressError,
    ) -> Self {
        Self::InvalidAddress {
            address: address.into(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_address_display() {
        let source = "nope".parse::<lettre::Address>().unwrap_err();
        let error = MailError::invalid_address("nope", source);
        let msg = error.to_string();
        assert!(msg.contains("`nope`"), "Expected address in: {msg}");
        assert!(matches!(error, MailError::InvalidAddress { .. }));
    }
}
