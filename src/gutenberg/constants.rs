//! Constants for the Project Gutenberg fetcher (endpoints, timeouts).

/// Project Gutenberg origin all book URLs are built from.
pub const DEFAULT_BASE_URL: &str = "https://www.gutenberg.org";

/// Suffix of the Kindle download with images.
pub const IMAGES_SUFFIX: &str = "kindle.images";

/// Suffix of the Kindle download without images.
pub const NO_IMAGES_SUFFIX: &str = "kindle.noimages";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large books).
pub const READ_TIMEOUT_SECS: u64 = 300;
