//! Search provider sources.
//!
//! Each provider turns a query string into result titles, URLs and snippets
//! by scraping a results page or calling a JSON API.

mod duckduckgo;
mod google;
mod query;

pub use duckduckgo::DuckDuckGoProvider;
pub use google::GoogleCustomSearchProvider;
pub use query::{QueryBuilder, DEFAULT_QUERY_TEMPLATE};

use async_trait::async_trait;

use crate::config::{Config, ConfigError, KNOWN_PROVIDERS};
use crate::discovery::{SearchResult, SourceError};
use crate::scrapers::Fetch;

/// An external search engine queried once per preference term.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Identifier used in bucket labels and logs (e.g. "duckduckgo").
    fn name(&self) -> &str;

    /// Run `query` and return results in rank order.
    async fn search(
        &self,
        fetcher: &dyn Fetch,
        query: &str,
    ) -> Result<Vec<SearchResult>, SourceError>;
}

/// Instantiate the providers listed in `config.search.providers`, in order.
pub fn build_providers(config: &Config) -> Result<Vec<Box<dyn SearchProvider>>, ConfigError> {
    let mut providers: Vec<Box<dyn SearchProvider>> = Vec::new();

    for name in &config.search.providers {
        match name.to_lowercase().as_str() {
            "duckduckgo" => providers.push(Box::new(DuckDuckGoProvider::new())),
            "google" => {
                let (Some(key), Some(cx)) = (
                    config.search.google_api_key.as_deref(),
                    config.search.google_cse_id.as_deref(),
                ) else {
                    return Err(ConfigError::Invalid(
                        "google provider requires GOOGLE_API_KEY and GOOGLE_CSE_ID".to_string(),
                    ));
                };
                providers.push(Box::new(GoogleCustomSearchProvider::new(key, cx)));
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown search provider: {} (known: {})",
                    other,
                    KNOWN_PROVIDERS.join(", ")
                )))
            }
        }
    }

    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_duckduckgo() {
        let providers = build_providers(&Config::default()).unwrap();
        let names: Vec<_> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["duckduckgo"]);
    }

    #[test]
    fn google_without_credentials_is_rejected() {
        let mut config = Config::default();
        config.search.providers = vec!["google".to_string()];
        config.search.google_api_key = None;
        config.search.google_cse_id = None;
        assert!(matches!(
            build_providers(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn providers_keep_configured_order() {
        let mut config = Config::default();
        config.search.providers = vec!["google".to_string(), "DuckDuckGo".to_string()];
        config.search.google_api_key = Some("key".to_string());
        config.search.google_cse_id = Some("cx".to_string());

        let providers = build_providers(&config).unwrap();
        let names: Vec<_> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["google", "duckduckgo"]);
    }
}
