//! Relevance classification.
//!
//! Two interchangeable strategies implement [`RelevanceClassifier`]: keyword
//! substring matching and a trained TF-IDF + logistic regression model. The
//! model is normally OR-composed with the keyword matcher through
//! [`FallbackClassifier`], favouring recall.

mod fallback;
mod keyword;
mod model;

pub use fallback::FallbackClassifier;
pub use keyword::KeywordClassifier;
pub use model::{LogisticRegression, ModelBundle, TfidfVectorizer, TrainedClassifier};

use std::path::PathBuf;

use tracing::info;

use crate::config::{Config, RelevanceMode};

/// Error type for classifier construction.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// The model artifact is missing or unreadable. Fatal at startup.
    #[error("Relevance model unavailable at {path}: {reason}")]
    ModelUnavailable { path: PathBuf, reason: String },

    #[error("Invalid relevance model: {0}")]
    InvalidModel(String),
}

/// Decides whether a piece of text describes a relevant opportunity.
///
/// Implementations are immutable after construction and safe to share
/// across runs.
pub trait RelevanceClassifier: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn is_relevant(&self, text: &str) -> bool;

    /// Probability of relevance, for strategies that produce one.
    fn score(&self, _text: &str) -> Option<f64> {
        None
    }
}

/// Build the classifier selected by `config.relevance`.
///
/// In model mode a missing artifact is an error; it is never replaced by the
/// keyword strategy here.
pub fn build_classifier(config: &Config) -> Result<Box<dyn RelevanceClassifier>, ClassifierError> {
    let keywords = KeywordClassifier::new(&config.keywords.relevance);

    match config.relevance.mode {
        RelevanceMode::Keyword => Ok(Box::new(keywords)),
        RelevanceMode::Model => {
            let path = config.model_path();
            let model = TrainedClassifier::load(&path)?;
            info!("Loaded relevance model from {}", path.display());

            if config.relevance.keyword_fallback {
                Ok(Box::new(FallbackClassifier::new(
                    Box::new(model),
                    Box::new(keywords),
                )))
            } else {
                Ok(Box::new(model))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_mode_builds_keyword_classifier() {
        let classifier = build_classifier(&Config::default()).unwrap();
        assert_eq!(classifier.name(), "keyword");
        assert!(classifier.is_relevant("Refugee Job Fair"));
        assert!(!classifier.is_relevant("About Us"));
        assert_eq!(classifier.score("Refugee Job Fair"), None);
    }

    #[test]
    fn model_mode_fails_fast_when_artifact_missing() {
        let mut config = Config::default();
        config.relevance.mode = RelevanceMode::Model;
        config.relevance.model_path = PathBuf::from("/nonexistent/relevance-model.json");

        match build_classifier(&config) {
            Err(ClassifierError::ModelUnavailable { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/relevance-model.json"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(c) => panic!("expected ModelUnavailable, got classifier {}", c.name()),
        }
    }

    #[test]
    fn model_mode_composes_keyword_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, model::tests::REJECTING_MODEL_JSON).unwrap();

        let mut config = Config::default();
        config.relevance.mode = RelevanceMode::Model;
        config.relevance.model_path = path.clone();

        let classifier = build_classifier(&config).unwrap();
        assert_eq!(classifier.name(), "model+keyword");
        assert!(classifier.is_relevant("Scholarship news roundup"));
        let score = classifier.score("Scholarship news roundup").unwrap();
        assert!(score < 0.5);

        config.relevance.keyword_fallback = false;
        let classifier = build_classifier(&config).unwrap();
        assert_eq!(classifier.name(), "model");
        assert!(!classifier.is_relevant("Scholarship news roundup"));
    }
}
