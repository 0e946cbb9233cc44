//! Book identifiers, download URLs, and fetched book payloads.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use super::constants::{IMAGES_SUFFIX, NO_IMAGES_SUFFIX};
use super::error::FetchError;

/// A Project Gutenberg ebook number. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(u32);

/// Rejected book id input.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a valid book id (expected a positive integer)")]
pub struct InvalidBookId(pub String);

impl BookId {
    /// Creates a book id, rejecting zero.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Returns the numeric id.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Attachment filename used when mailing this book.
    #[must_use]
    pub fn attachment_filename(self) -> String {
        format!("{}.mobi", self.0)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidBookId(s.to_string()))
    }
}

/// The two download variants of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookUrls {
    /// Kindle file with images.
    pub images: Url,
    /// Kindle file without images.
    pub no_images: Url,
}

impl BookUrls {
    /// Builds both variants from a base URL ending in `/`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the joined URL is not valid.
    pub fn for_book(base_url: &Url, id: BookId) -> Result<Self, FetchError> {
        Ok(Self {
            images: join_book_path(base_url, id, IMAGES_SUFFIX)?,
            no_images: join_book_path(base_url, id, NO_IMAGES_SUFFIX)?,
        })
    }
}

fn join_book_path(base_url: &Url, id: BookId, suffix: &str) -> Result<Url, FetchError> {
    let relative = format!("ebooks/{id}.{suffix}");
    base_url
        .join(&relative)
        .map_err(|_| FetchError::invalid_url(format!("{base_url}{relative}")))
}

/// A downloaded book held in memory until it is mailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBook {
    id: BookId,
    content: Vec<u8>,
}

impl FetchedBook {
    /// Wraps downloaded bytes.
    #[must_use]
    pub fn new(id: BookId, content: Vec<u8>) -> Self {
        Self { id, content }
    }

    /// Book the bytes belong to.
    #[must_use]
    pub fn id(&self) -> BookId {
        self.id
    }

    /// Raw file contents.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Size of the file in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.content.len() as u64
    }

    /// Whether the download was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Consumes the book, returning its bytes.
    #[must_use]
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}
