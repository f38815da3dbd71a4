//! Extracted opportunity candidates.

use serde::{Deserialize, Serialize};

/// A link found on a source page or search results page.
///
/// Candidates are deduplicated by exact `url` within one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Anchor text, search result title, or the URL when the anchor was empty.
    pub display_text: String,
    /// Absolute URL.
    pub url: String,
    /// Label of the site or provider query this candidate came from.
    pub source_label: String,
    /// Search result snippet, when the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Link exactly as it appeared on the source page, before resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Candidate {
    /// Create a new candidate without a snippet.
    pub fn new(display_text: String, url: String, source_label: String) -> Self {
        Self {
            display_text,
            url,
            source_label,
            snippet: None,
            href: None,
        }
    }

    /// Record the page-relative link this candidate was resolved from.
    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string()).filter(|h| !h.is_empty());
        self
    }

    /// Attach a search result snippet.
    pub fn with_snippet(mut self, snippet: Option<String>) -> Self {
        self.snippet = snippet.filter(|s| !s.trim().is_empty());
        self
    }

    /// Display text and snippet joined by a space.
    pub fn combined_text(&self) -> String {
        match &self.snippet {
            Some(snippet) => format!("{} {}", self.display_text, snippet),
            None => self.display_text.clone(),
        }
    }

    /// Text used for categorization: combined text plus the href as written.
    ///
    /// The resolved URL is never used, so a keyword in the site's host name
    /// cannot decide the category.
    pub fn categorization_text(&self) -> String {
        match &self.href {
            Some(href) => format!("{} {}", self.combined_text(), href),
            None => self.combined_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_text_without_snippet() {
        let c = Candidate::new(
            "Job Fair".to_string(),
            "https://example.org/fair".to_string(),
            "example.org".to_string(),
        );
        assert_eq!(c.combined_text(), "Job Fair");
        assert_eq!(c.categorization_text(), "Job Fair");
    }

    #[test]
    fn categorization_uses_raw_href_not_host() {
        let c = Candidate::new(
            "Scholarship guide".to_string(),
            "https://www.refugeeemployment.org/guide".to_string(),
            "refugeeemployment.org".to_string(),
        )
        .with_href("/guide");
        assert_eq!(c.categorization_text(), "Scholarship guide /guide");
        assert!(!c.categorization_text().contains("employment"));
    }

    #[test]
    fn blank_snippet_is_dropped() {
        let c = Candidate::new("a".into(), "https://a.org".into(), "a.org".into())
            .with_snippet(Some("   ".to_string()));
        assert!(c.snippet.is_none());

        let c = c.with_snippet(Some("apply now".to_string()));
        assert_eq!(c.combined_text(), "a apply now");
    }
}
