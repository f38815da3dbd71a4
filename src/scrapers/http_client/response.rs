//! Fetched page wrapper.

/// Raw markup retrieved for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    /// URL that was requested.
    pub url: String,
    /// HTTP status code (always 2xx for pages returned by a fetcher).
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl RawPage {
    pub fn new(url: &str, body: String) -> Self {
        Self {
            url: url.to_string(),
            status: 200,
            body,
        }
    }
}
