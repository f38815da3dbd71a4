//! Google Custom Search JSON API provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::SearchProvider;
use crate::discovery::{SearchResult, SourceError};
use crate::scrapers::{Fetch, ParseError};

const GOOGLE_CSE_URL: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: Option<String>,
}

/// Search provider backed by a Google Programmable Search Engine.
#[derive(Debug, Clone)]
pub struct GoogleCustomSearchProvider {
    api_key: String,
    engine_id: String,
}

impl GoogleCustomSearchProvider {
    pub fn new(api_key: &str, engine_id: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}?key={}&cx={}&q={}",
            GOOGLE_CSE_URL,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.engine_id),
            urlencoding::encode(query)
        )
    }

    fn parse_results(body: &str) -> Result<Vec<SearchResult>, ParseError> {
        let response: CseResponse = serde_json::from_str(body)
            .map_err(|e| ParseError::Malformed(format!("Google CSE response: {}", e)))?;

        Ok(response
            .items
            .into_iter()
            .filter(|item| !item.link.trim().is_empty())
            .map(|item| SearchResult {
                url: item.link.trim().to_string(),
                title: item.title.trim().to_string(),
                snippet: item
                    .snippet
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            })
            .collect())
    }
}

#[async_trait]
impl SearchProvider for GoogleCustomSearchProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn search(
        &self,
        fetcher: &dyn Fetch,
        query: &str,
    ) -> Result<Vec<SearchResult>, SourceError> {
        debug!("Google CSE search: {}", query);
        let page = fetcher.fetch(&self.search_url(query)).await?;
        let results = Self::parse_results(&page.body)?;
        debug!("Parsed {} results from Google CSE", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_includes_credentials() {
        let provider = GoogleCustomSearchProvider::new("k&1", "cx");
        assert_eq!(
            provider.search_url("refugee jobs 2026"),
            "https://www.googleapis.com/customsearch/v1?key=k%261&cx=cx&q=refugee%20jobs%202026"
        );
    }

    #[test]
    fn parses_items() {
        let body = r#"{
            "kind": "customsearch#search",
            "items": [
                {"title": " Refugee Scholarships ", "link": "https://example.org/s", "snippet": "Deadline in May"},
                {"title": "No link"},
                {"title": "Jobs", "link": "https://example.org/j", "snippet": ""}
            ]
        }"#;
        let results = GoogleCustomSearchProvider::parse_results(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Refugee Scholarships");
        assert_eq!(results[0].snippet.as_deref(), Some("Deadline in May"));
        assert_eq!(results[1].snippet, None);
    }

    #[test]
    fn response_without_items_is_empty() {
        let results = GoogleCustomSearchProvider::parse_results("{}").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert!(matches!(
            GoogleCustomSearchProvider::parse_results("<html>"),
            Err(ParseError::Malformed(_))
        ));
    }
}
