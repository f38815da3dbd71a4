//! Keyword matching helpers.

/// Lowercase every keyword, dropping blanks.
pub fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// True if `text` contains any of `keywords` (already lowercased) as a
/// case-insensitive substring.
pub fn matches_any(text: &str, keywords: &[String]) -> bool {
    first_match(text, keywords).is_some()
}

/// First keyword (already lowercased) contained in `text`, ignoring case.
pub fn first_match<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .find(|k| lower.contains(k.as_str()))
        .map(|k| k.as_str())
}
