//! gutenberg2kindle core library
//!
//! Downloads public-domain ebooks from Project Gutenberg and mails them as
//! attachments to a Kindle address over SMTP.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Settings store: typed names, validation, JSON persistence
//! - [`gutenberg`] - Book fetcher with the images / no-images fallback policy
//! - [`email`] - Book email composition, size checks, and SMTP delivery
//!
//! The binary wires these together behind its `send`, `get-config`,
//! `set-config`, `interactive-config` and `version` commands.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod email;
pub mod gutenberg;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use config::{
    ConfigError, FormatPreference, MailSettings, SettingName, SettingValue, Settings,
    SettingsStore, prompt_settings,
};
pub use email::{
    MAX_FILE_SIZE_MB, MailError, Mailer, SmtpMailer, bytes_to_mb, create_base_email,
    is_valid_file_size, send_book,
};
pub use gutenberg::{BookId, BookSource, FetchError, FetchedBook, GutenbergClient};
