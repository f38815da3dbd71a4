//! Opportunity discovery from fixed sites and search providers.
//!
//! A source is either a configured site whose anchors become candidates, or
//! one search provider queried with one preference term. Failures are
//! reported per source as [`SourceError`]; the aggregator decides what to do
//! with them.

mod result;
pub mod sources;
pub mod url_utils;

pub use result::SearchResult;
pub use sources::search::{build_providers, QueryBuilder, SearchProvider};
pub use sources::SiteSource;

use crate::scrapers::{FetchError, ParseError};

/// Error type for a single source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
