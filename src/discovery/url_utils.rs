//! URL helpers for source labelling.

/// Extract the host from a URL, or return the input unchanged.
pub fn extract_domain(target: &str) -> String {
    if target.starts_with("http") {
        url::Url::parse(target)
            .ok()
            .and_then(|u| u.host_str().map(|s| s.to_string()))
            .unwrap_or_else(|| target.to_string())
    } else {
        target.to_string()
    }
}

/// Display label for a site: its host without a leading `www.`.
pub fn site_label(url: &str) -> String {
    let domain = extract_domain(url);
    domain
        .strip_prefix("www.")
        .map(|s| s.to_string())
        .unwrap_or(domain)
}
