//! Anchor extraction from fetched pages.
//!
//! Relative hrefs are joined naively: anything that does not start with
//! `http` is appended to `scheme://host/` with its leading slashes removed.
//! Query-only hrefs, fragments and `../` segments are not resolved; they are
//! concatenated as-is.

use scraper::{Html, Selector};
use tracing::debug;

use super::ParseError;

/// An anchor's visible text and resolved URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    pub text: String,
    pub url: String,
    /// The `href` attribute as written in the page, trimmed.
    pub href: String,
}

/// Controls which textless anchors survive extraction.
#[derive(Debug, Clone, Copy)]
pub enum AnchorFilter<'a> {
    /// Keep every anchor; textless ones are labelled with their URL.
    KeepAll,
    /// Drop textless anchors whose href contains none of these keywords.
    RequireKeyword(&'a [String]),
}

/// Extract `(text, absolute URL)` pairs from every `<a href>` in `html`.
pub fn extract_links(
    html: &str,
    base_url: &str,
    filter: AnchorFilter<'_>,
) -> Result<Vec<ExtractedLink>, ParseError> {
    let base = site_root(base_url)?;
    let selector = Selector::parse("a[href]")
        .map_err(|e| ParseError::Selector(format!("{:?}", e)))?;
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        let text = normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "));

        if text.is_empty() {
            if let AnchorFilter::RequireKeyword(keywords) = filter {
                let href_lower = href.to_lowercase();
                if !keywords
                    .iter()
                    .any(|k| href_lower.contains(&k.to_lowercase()))
                {
                    continue;
                }
            }
        }

        let url = join_href(&base, href);
        let text = if text.is_empty() { url.clone() } else { text };
        links.push(ExtractedLink {
            text,
            url,
            href: href.to_string(),
        });
    }

    debug!("Extracted {} links from {}", links.len(), base_url);
    Ok(links)
}

/// Resolve `href` against the scheme and host of `base_url`.
pub fn resolve_href(base_url: &str, href: &str) -> Result<String, ParseError> {
    Ok(join_href(&site_root(base_url)?, href.trim()))
}

fn join_href(root: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}/{}", root, href.trim_start_matches('/'))
    }
}

/// `scheme://host[:port]` of a URL.
fn site_root(base_url: &str) -> Result<String, ParseError> {
    let parsed =
        url::Url::parse(base_url).map_err(|_| ParseError::InvalidBaseUrl(base_url.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ParseError::InvalidBaseUrl(base_url.to_string()))?;
    Ok(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
