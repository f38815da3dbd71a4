//! OR-composition of two relevance strategies.

use super::RelevanceClassifier;

/// Relevant when either the primary or the fallback strategy says so.
pub struct FallbackClassifier {
    primary: Box<dyn RelevanceClassifier>,
    fallback: Box<dyn RelevanceClassifier>,
    name: String,
}

impl FallbackClassifier {
    pub fn new(
        primary: Box<dyn RelevanceClassifier>,
        fallback: Box<dyn RelevanceClassifier>,
    ) -> Self {
        let name = format!("{}+{}", primary.name(), fallback.name());
        Self {
            primary,
            fallback,
            name,
        }
    }
}

impl RelevanceClassifier for FallbackClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_relevant(&self, text: &str) -> bool {
        self.primary.is_relevant(text) || self.fallback.is_relevant(text)
    }

    fn score(&self, text: &str) -> Option<f64> {
        self.primary.score(text).or_else(|| self.fallback.score(text))
    }
}
