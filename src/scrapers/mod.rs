//! Page fetching and link extraction.

pub mod extract;
pub mod http_client;

pub use extract::{extract_links, resolve_href, AnchorFilter, ExtractedLink};
pub use http_client::{Fetch, FetchError, HttpFetcher, RawPage};

/// Error type for markup and response parsing.
///
/// Recoverable: a page that fails to parse contributes zero candidates.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid CSS selector: {0}")]
    Selector(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}
