//! Shared setup for CLI commands.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::Config;
use crate::discovery::{build_providers, SearchProvider};
use crate::relevance::{build_classifier, ClassifierError, KeywordClassifier, RelevanceClassifier};
use crate::scrapers::HttpFetcher;
use crate::services::Aggregator;

use super::icons;

/// Build the configured classifier.
///
/// A missing model is fatal unless `degrade` is set, in which case the
/// keyword strategy is substituted and the substitution is reported.
pub fn load_classifier(
    config: &Config,
    degrade: bool,
) -> anyhow::Result<Box<dyn RelevanceClassifier>> {
    match build_classifier(config) {
        Ok(classifier) => Ok(classifier),
        Err(e @ ClassifierError::ModelUnavailable { .. }) if degrade => {
            warn!("{}; using keyword classifier", e);
            eprintln!("{} {}", icons::warn(), e);
            eprintln!("  {} Falling back to keyword matching", icons::dim_arrow());
            Ok(Box::new(KeywordClassifier::new(&config.keywords.relevance)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Everything a digest run borrows, constructed once per process.
pub struct AppContext {
    pub config: Config,
    pub fetcher: HttpFetcher,
    pub classifier: Box<dyn RelevanceClassifier>,
    pub providers: Vec<Box<dyn SearchProvider>>,
}

impl AppContext {
    pub fn build(config: Config, degrade: bool) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.fetch)?;
        let classifier = load_classifier(&config, degrade)?;
        let providers = build_providers(&config)?;
        Ok(Self {
            config,
            fetcher,
            classifier,
            providers,
        })
    }

    /// Aggregator over this context, optionally pinned to `year`.
    pub fn aggregator(&self, year: Option<i32>) -> Aggregator<'_> {
        let aggregator = Aggregator::new(
            &self.config,
            &self.fetcher,
            self.classifier.as_ref(),
            &self.providers,
        );
        match year {
            Some(year) => aggregator.with_year(year),
            None => aggregator,
        }
    }
}

/// Make a user-supplied path absolute against the working directory.
pub fn absolute_from_cwd(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelevanceMode;

    #[test]
    fn missing_model_is_fatal_without_degrade() {
        let mut config = Config::default();
        config.relevance.mode = RelevanceMode::Model;
        config.relevance.model_path = PathBuf::from("/nonexistent/model.json");

        let err = load_classifier(&config, false).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ClassifierError>(),
            Some(ClassifierError::ModelUnavailable { .. })
        ));

        let classifier = load_classifier(&config, true).unwrap();
        assert_eq!(classifier.name(), "keyword");
    }

    #[test]
    fn relative_paths_join_cwd() {
        let path = absolute_from_cwd(Path::new("model.json")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("model.json"));
    }
}
