//! HTTP client for fetching Kindle files from Project Gutenberg.
//!
//! A fetch is a single GET. `200 OK` yields the body; any other status is a
//! soft failure that is logged and reported as "no book" so the caller can
//! move on to the next id.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::book::{BookId, BookUrls, FetchedBook};
use super::constants::{CONNECT_TIMEOUT_SECS, DEFAULT_BASE_URL, READ_TIMEOUT_SECS};
use super::error::FetchError;
use crate::config::FormatPreference;
use crate::user_agent;

/// Source of book files, keyed by id and format preference.
///
/// Implemented by [`GutenbergClient`]; the seam exists so the send pipeline
/// can run against an in-memory source.
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Downloads a book, returning `Ok(None)` when no variant was available.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] for transport-level failures only.
    async fn download_book(
        &self,
        id: BookId,
        format: FormatPreference,
    ) -> Result<Option<FetchedBook>, FetchError>;
}

/// Project Gutenberg HTTP client.
///
/// Create once and reuse for every book in a run.
///
/// # Example
///
/// ```no_run
/// use gutenberg2kindle_core::config::FormatPreference;
/// use gutenberg2kindle_core::gutenberg::{BookId, BookSource, GutenbergClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GutenbergClient::new()?;
/// let id: BookId = "1342".parse()?;
/// if let Some(book) = client.download_book(id, FormatPreference::Auto).await? {
///     println!("{} bytes", book.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GutenbergClient {
    client: Client,
    base_url: Url,
}

impl GutenbergClient {
    /// Creates a client pointed at `https://www.gutenberg.org`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        let base_url =
            Url::parse(DEFAULT_BASE_URL).map_err(|_| FetchError::invalid_url(DEFAULT_BASE_URL))?;
        Self::with_base_url(base_url)
    }

    /// Creates a client against another origin (a mirror, or a mock server).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be built.
    pub fn with_base_url(mut base_url: Url) -> Result<Self, FetchError> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(user_agent::default_user_agent())
            .gzip(true)
            .build()
            .map_err(FetchError::ClientBuild)?;
        debug!(base_url = %base_url, "Gutenberg client ready");
        Ok(Self { client, base_url })
    }

    /// Origin the download URLs are built from.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Both download URLs for a book.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the URLs cannot be built.
    pub fn book_urls(&self, id: BookId) -> Result<BookUrls, FetchError> {
        BookUrls::for_book(&self.base_url, id)
    }

    /// Issues one GET, returning the body on `200 OK` and `None` otherwise.
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch(&self, id: BookId, url: &Url) -> Result<Option<Vec<u8>>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|error| FetchError::from_reqwest(url.as_str(), error))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                status = status.as_u16(),
                book_id = %id,
                "Invalid status code `{}` while fetching book {id}",
                status.as_u16()
            );
            return Ok(None);
        }

        let body = response
            .bytes()
            .await
            .map_err(|error| FetchError::from_reqwest(url.as_str(), error))?;
        debug!(bytes = body.len(), "Fetched book body");
        Ok(Some(body.to_vec()))
    }
}

#[async_trait]
impl BookSource for GutenbergClient {
    async fn download_book(
        &self,
        id: BookId,
        format: FormatPreference,
    ) -> Result<Option<FetchedBook>, FetchError> {
        let urls = self.book_urls(id)?;

        let content = match format {
            FormatPreference::NoImages => self.fetch(id, &urls.no_images).await?,
            FormatPreference::Images => self.fetch(id, &urls.images).await?,
            FormatPreference::Auto => match self.fetch(id, &urls.images).await? {
                Some(content) => Some(content),
                None => {
                    info!(book_id = %id, "Images variant unavailable, falling back to no images");
                    self.fetch(id, &urls.no_images).await?
                }
            },
        };

        Ok(content.map(|content| FetchedBook::new(id, content)))
    }
}
