//! Search result type.

use crate::models::Candidate;

/// A single search engine hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub snippet: Option<String>,
}

impl SearchResult {
    /// Convert into a candidate labelled with the provider query.
    ///
    /// Results without a title are labelled with their URL.
    pub fn into_candidate(self, source_label: &str) -> Candidate {
        let title = if self.title.trim().is_empty() {
            self.url.clone()
        } else {
            self.title.trim().to_string()
        };
        Candidate::new(title, self.url, source_label.to_string()).with_snippet(self.snippet)
    }
}
