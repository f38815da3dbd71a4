//! Trained text classifier: TF-IDF vectorizer feeding a binary logistic
//! regression.
//!
//! The bundle is produced offline and stored as JSON:
//!
//! ```json
//! {
//!   "vectorizer": { "vocabulary": {"job": 0, "fair": 1}, "idf": [1.2, 2.3] },
//!   "classifier": { "coefficients": [1.7, 0.4], "intercept": -0.3 }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ClassifierError, RelevanceClassifier};

/// Tokens of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Vector normalization applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

/// TF-IDF weighting over a fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term (or space-joined n-gram) to feature index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    /// Inclusive `(min_n, max_n)` token n-gram range.
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    /// Use `1 + ln(tf)` instead of raw counts.
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

impl TfidfVectorizer {
    /// Number of features.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        TOKEN_PATTERN
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                grams.push(window.join(" "));
            }
        }
        grams
    }

    /// Sparse TF-IDF vector as `(feature index, weight)` pairs, sorted by index.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for gram in self.ngrams(&self.tokenize(text)) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .filter(|(idx, _)| *idx < self.idf.len())
            .map(|(idx, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.idf[idx])
            })
            .collect();
        features.sort_by_key(|(idx, _)| *idx);

        let norm = match self.norm {
            Norm::L2 => features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Norm::L1 => features.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if norm > 0.0 {
            for (_, w) in &mut features {
                *w /= norm;
            }
        }
        features
    }
}

/// Binary linear classifier over TF-IDF features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    /// Signed distance from the decision boundary.
    pub fn decision_function(&self, features: &[(usize, f64)]) -> f64 {
        features
            .iter()
            .filter_map(|(idx, w)| self.coefficients.get(*idx).map(|c| c * w))
            .sum::<f64>()
            + self.intercept
    }

    /// Probability of the positive class.
    pub fn probability(&self, features: &[(usize, f64)]) -> f64 {
        1.0 / (1.0 + (-self.decision_function(features)).exp())
    }

    /// Positive class when the decision function is above zero.
    pub fn predict(&self, features: &[(usize, f64)]) -> bool {
        self.decision_function(features) > 0.0
    }
}

/// Serialized `(vectorizer, classifier)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub vectorizer: TfidfVectorizer,
    pub classifier: LogisticRegression,
}

impl ModelBundle {
    fn validate(&self) -> Result<(), ClassifierError> {
        let dim = self.vectorizer.dimension();
        if dim != self.classifier.coefficients.len() {
            return Err(ClassifierError::InvalidModel(format!(
                "vectorizer has {} features but classifier has {} coefficients",
                dim,
                self.classifier.coefficients.len()
            )));
        }
        if let Some((term, idx)) = self.vectorizer.vocabulary.iter().find(|(_, i)| **i >= dim) {
            return Err(ClassifierError::InvalidModel(format!(
                "vocabulary term '{}' maps to index {} outside {} features",
                term, idx, dim
            )));
        }
        let (min_n, max_n) = self.vectorizer.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::InvalidModel(format!(
                "invalid ngram range ({}, {})",
                min_n, max_n
            )));
        }
        Ok(())
    }
}

/// Relevance strategy backed by a trained model. Read-only after load.
#[derive(Debug, Clone)]
pub struct TrainedClassifier {
    bundle: ModelBundle,
}

impl TrainedClassifier {
    /// Wrap an in-memory bundle after checking its dimensions agree.
    pub fn new(bundle: ModelBundle) -> Result<Self, ClassifierError> {
        bundle.validate()?;
        Ok(Self { bundle })
    }

    /// Load a JSON bundle. Any failure is reported as `ModelUnavailable`.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let unavailable = |reason: String| ClassifierError::ModelUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        let raw = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let bundle: ModelBundle =
            serde_json::from_str(&raw).map_err(|e| unavailable(e.to_string()))?;
        Self::new(bundle).map_err(|e| unavailable(e.to_string()))
    }

    /// Probability that `text` is relevant.
    pub fn probability(&self, text: &str) -> f64 {
        let features = self.bundle.vectorizer.transform(text);
        self.bundle.classifier.probability(&features)
    }
}

impl RelevanceClassifier for TrainedClassifier {
    fn name(&self) -> &str {
        "model"
    }

    fn is_relevant(&self, text: &str) -> bool {
        let features = self.bundle.vectorizer.transform(text);
        self.bundle.classifier.predict(&features)
    }

    fn score(&self, text: &str) -> Option<f64> {
        Some(self.probability(text))
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;

    /// Model that rejects everything it has vocabulary for.
    pub(crate) const REJECTING_MODEL_JSON: &str = r#"{
        "vectorizer": {
            "vocabulary": {"scholarship": 0, "news": 1, "roundup": 2},
            "idf": [1.0, 1.0, 1.0]
        },
        "classifier": {"coefficients": [-2.0, -1.0, -1.0], "intercept": -0.5}
    }"#;

    fn job_model() -> TrainedClassifier {
        let vocabulary = [("job", 0), ("fair", 1), ("donate", 2), ("job fair", 3)]
            .into_iter()
            .map(|(t, i)| (t.to_string(), i))
            .collect();
        TrainedClassifier::new(ModelBundle {
            vectorizer: TfidfVectorizer {
                vocabulary,
                idf: vec![1.5, 2.0, 1.0, 2.5],
                lowercase: true,
                ngram_range: (1, 2),
                sublinear_tf: false,
                norm: Norm::L2,
            },
            classifier: LogisticRegression {
                coefficients: vec![3.0, 0.5, -4.0, 1.0],
                intercept: -0.5,
            },
        })
        .unwrap()
    }

    #[test]
    fn transform_is_l2_normalized() {
        let model = job_model();
        let features = model.bundle.vectorizer.transform("Job fair, job fair!");
        let norm: f64 = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        let indices: Vec<_> = features.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 3]);
    }

    #[test]
    fn single_character_tokens_are_ignored() {
        let model = job_model();
        assert!(model.bundle.vectorizer.transform("a b c").is_empty());
    }

    #[test]
    fn predicts_from_weights() {
        let model = job_model();
        assert!(model.is_relevant("Refugee Job Fair"));
        assert!(!model.is_relevant("Donate now"));
        // No known vocabulary: decision equals the negative intercept.
        assert!(!model.is_relevant("About us"));
        assert!(model.probability("job") > 0.5);
        assert_eq!(model.score("job"), Some(model.probability("job")));
    }

    #[test]
    fn load_reads_json_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, REJECTING_MODEL_JSON).unwrap();

        let model = TrainedClassifier::load(&path).unwrap();
        assert!(!model.is_relevant("scholarship"));
    }

    #[test]
    fn load_missing_file_is_model_unavailable() {
        let err = TrainedClassifier::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ClassifierError::ModelUnavailable { .. }));
    }

    #[test]
    fn load_garbage_is_model_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            TrainedClassifier::load(&path),
            Err(ClassifierError::ModelUnavailable { .. })
        ));
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let bundle = ModelBundle {
            vectorizer: TfidfVectorizer {
                vocabulary: HashMap::from([("job".to_string(), 0)]),
                idf: vec![1.0],
                lowercase: true,
                ngram_range: (1, 1),
                sublinear_tf: false,
                norm: Norm::L2,
            },
            classifier: LogisticRegression {
                coefficients: vec![1.0, 2.0],
                intercept: 0.0,
            },
        };
        assert!(matches!(
            TrainedClassifier::new(bundle),
            Err(ClassifierError::InvalidModel(_))
        ));
    }
}
