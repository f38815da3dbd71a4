//! Keyword substring relevance strategy.

use super::RelevanceClassifier;
use crate::utils::{lowercase_all, matches_any};

/// Relevant when the text contains any configured keyword, ignoring case.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keywords: Vec<String>,
}

impl KeywordClassifier {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: lowercase_all(keywords),
        }
    }
}

impl RelevanceClassifier for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    fn is_relevant(&self, text: &str) -> bool {
        matches_any(text, &self.keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_any_keyword() {
        let classifier = KeywordClassifier::new(&["Refugee".to_string(), "job".to_string()]);
        assert!(classifier.is_relevant("refugee resettlement"));
        assert!(classifier.is_relevant("Jobs board"));
        assert!(!classifier.is_relevant("Donate today"));
    }
}
