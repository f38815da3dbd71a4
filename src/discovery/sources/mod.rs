//! Discovery source implementations.

pub mod search;

use tracing::debug;

use super::url_utils::site_label;
use super::SourceError;
use crate::config::SiteConfig;
use crate::models::Candidate;
use crate::scrapers::{extract_links, AnchorFilter, Fetch};

/// A fixed site whose anchors become candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSource {
    pub url: String,
    pub label: String,
}

impl SiteSource {
    pub fn new(url: &str, label: &str) -> Self {
        Self {
            url: url.to_string(),
            label: label.to_string(),
        }
    }

    /// Build from config, labelling unnamed sites by host.
    pub fn from_config(site: &SiteConfig) -> Self {
        let label = site
            .name
            .clone()
            .unwrap_or_else(|| site_label(&site.url));
        Self {
            url: site.url.clone(),
            label,
        }
    }

    /// Fetch the site and turn every extracted anchor into a candidate.
    pub async fn collect(
        &self,
        fetcher: &dyn Fetch,
        filter: AnchorFilter<'_>,
    ) -> Result<Vec<Candidate>, SourceError> {
        let page = fetcher.fetch(&self.url).await?;
        let links = extract_links(&page.body, &self.url, filter)?;
        debug!("{}: {} anchors", self.label, links.len());

        Ok(links
            .into_iter()
            .map(|link| {
                Candidate::new(link.text, link.url, self.label.clone()).with_href(&link.href)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_defaults_to_host() {
        let source = SiteSource::from_config(&SiteConfig::new("https://www.tent.org"));
        assert_eq!(source.label, "tent.org");

        let source = SiteSource::from_config(&SiteConfig {
            url: "https://www.tent.org".to_string(),
            name: Some("Tent Partnership".to_string()),
        });
        assert_eq!(source.label, "Tent Partnership");
    }
}
