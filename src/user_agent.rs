//! User-Agent string for requests to Project Gutenberg.

/// Default User-Agent for book downloads (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("gutenberg2kindle/{version} (ebook-to-kindle mailer)")
}
