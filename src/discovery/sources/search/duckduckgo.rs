//! DuckDuckGo HTML search provider.
//!
//! Scrapes the no-JavaScript results page.

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

use super::SearchProvider;
use crate::discovery::{SearchResult, SourceError};
use crate::scrapers::{Fetch, ParseError};

/// DuckDuckGo search URL.
const DDG_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

/// Search provider scraping DuckDuckGo's HTML endpoint.
#[derive(Debug, Default)]
pub struct DuckDuckGoProvider {}

impl DuckDuckGoProvider {
    pub fn new() -> Self {
        Self {}
    }

    fn search_url(query: &str) -> String {
        format!(
            "{}?q={}&kl=us-en",
            DDG_SEARCH_URL,
            urlencoding::encode(query)
        )
    }

    /// Parse search results from HTML.
    fn parse_results(&self, html: &str) -> Result<Vec<SearchResult>, ParseError> {
        let document = Html::parse_document(html);

        let result_selector = selector("div.result:not(.result--ad)")?;
        let link_selector = selector("a.result__a")?;
        let snippet_selector = selector(".result__snippet")?;

        let mut results = Vec::new();
        for container in document.select(&result_selector) {
            let Some(link) = container.select(&link_selector).next() else {
                continue;
            };
            let Some(url) = link.value().attr("href").and_then(|h| self.extract_url(h)) else {
                continue;
            };

            let title = collapse(&link.text().collect::<String>());
            let snippet = container
                .select(&snippet_selector)
                .next()
                .map(|s| collapse(&s.text().collect::<String>()))
                .filter(|s| !s.is_empty());

            results.push(SearchResult {
                url,
                title,
                snippet,
            });
        }

        debug!("Parsed {} results from DuckDuckGo", results.len());
        Ok(results)
    }

    /// Extract the actual URL from DuckDuckGo's redirect URL.
    fn extract_url(&self, href: &str) -> Option<String> {
        if href.starts_with("//duckduckgo.com/l/") || href.starts_with("/l/") {
            // Redirect form: //duckduckgo.com/l/?uddg=<encoded_url>&rut=...
            let uddg_start = href.find("uddg=")?;
            let encoded = &href[uddg_start + 5..];
            let end = encoded.find('&').unwrap_or(encoded.len());
            urlencoding::decode(&encoded[..end])
                .ok()
                .map(|s| s.into_owned())
        } else if href.starts_with("http://") || href.starts_with("https://") {
            Some(href.to_string())
        } else if href.starts_with("//") {
            Some(format!("https:{}", href))
        } else {
            None
        }
    }
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector(format!("{}: {:?}", css, e)))
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(
        &self,
        fetcher: &dyn Fetch,
        query: &str,
    ) -> Result<Vec<SearchResult>, SourceError> {
        debug!("DuckDuckGo search: {}", query);
        let page = fetcher.fetch(&Self::search_url(query)).await?;
        Ok(self.parse_results(&page.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_HTML: &str = r#"
        <div class="result results_links result--ad">
          <h2 class="result__title"><a class="result__a" href="https://ads.example.com/">Sponsored</a></h2>
        </div>
        <div class="result results_links web-result">
          <h2 class="result__title">
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org%2Fjobs%3Fid%3D1&amp;rut=abc">Refugee
              Jobs 2026</a>
          </h2>
          <a class="result__snippet" href="//duckduckgo.com/l/?uddg=x">Open <b>positions</b> for newcomers</a>
        </div>
        <div class="result results_links web-result">
          <h2 class="result__title"><a class="result__a" href="https://example.net/grants">Grants</a></h2>
        </div>
    "#;

    #[test]
    fn extract_direct_url() {
        let provider = DuckDuckGoProvider::new();
        assert_eq!(
            provider.extract_url("https://example.org/doc"),
            Some("https://example.org/doc".to_string())
        );
    }

    #[test]
    fn extract_protocol_relative_url() {
        let provider = DuckDuckGoProvider::new();
        assert_eq!(
            provider.extract_url("//example.org/doc"),
            Some("https://example.org/doc".to_string())
        );
    }

    #[test]
    fn extract_redirect_url() {
        let provider = DuckDuckGoProvider::new();
        assert_eq!(
            provider.extract_url("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org%2Fa&rut=1"),
            Some("https://example.org/a".to_string())
        );
        assert_eq!(provider.extract_url("/relative"), None);
    }

    #[test]
    fn search_url_encodes_query() {
        assert_eq!(
            DuckDuckGoProvider::search_url("refugee online courses 2026"),
            "https://html.duckduckgo.com/html/?q=refugee%20online%20courses%202026&kl=us-en"
        );
    }

    #[test]
    fn parses_results_skipping_ads() {
        let provider = DuckDuckGoProvider::new();
        let results = provider.parse_results(RESULTS_HTML).unwrap();

        assert_eq!(
            results,
            vec![
                SearchResult {
                    url: "https://example.org/jobs?id=1".to_string(),
                    title: "Refugee Jobs 2026".to_string(),
                    snippet: Some("Open positions for newcomers".to_string()),
                },
                SearchResult {
                    url: "https://example.net/grants".to_string(),
                    title: "Grants".to_string(),
                    snippet: None,
                },
            ]
        );
    }
}
