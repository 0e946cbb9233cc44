//! Book fetcher for Project Gutenberg.
//!
//! Every book has two Kindle downloads, one with images and one without. The
//! stored [`FormatPreference`](crate::config::FormatPreference) picks which one
//! to request:
//!
//! - `images` / `no_images`: only that variant
//! - `auto`: images first, then no images if that request did not return 200

mod book;
mod client;
mod constants;
mod error;

pub use book::{BookId, BookUrls, FetchedBook, InvalidBookId};
pub use client::{BookSource, GutenbergClient};
pub use constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_BASE_URL, IMAGES_SUFFIX, NO_IMAGES_SUFFIX, READ_TIMEOUT_SECS,
};
pub use error::FetchError;
