//! Per-user opportunity aggregation.
//!
//! Sources are processed one at a time in configured order: every fixed
//! site first, then every preference term against every search provider.
//! A failing source contributes nothing and the run carries on.

use std::collections::HashSet;

use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::categorize::Categorizer;
use super::staleness::StalenessFilter;
use crate::config::{Config, GroupBy};
use crate::discovery::{QueryBuilder, SearchProvider, SiteSource, SourceError};
use crate::models::{Candidate, Digest, DigestEntry, UserPreferences};
use crate::relevance::RelevanceClassifier;
use crate::scrapers::{AnchorFilter, Fetch};

/// A source that failed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedSource {
    pub label: String,
    pub error: String,
}

/// Counters describing one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub sources_attempted: usize,
    pub failed_sources: Vec<FailedSource>,
    pub candidates_seen: usize,
    pub stale: usize,
    pub irrelevant: usize,
    pub duplicates: usize,
    pub over_cap: usize,
    pub accepted: usize,
}

/// Digest plus run counters.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateOutcome {
    pub digest: Digest,
    pub report: AggregateReport,
}

/// State scoped to a single run; never shared between users.
#[derive(Default)]
struct RunState {
    seen: HashSet<String>,
    digest: Digest,
    report: AggregateReport,
}

/// Drives fetch, extraction, filtering and categorization for one user.
pub struct Aggregator<'a> {
    config: &'a Config,
    fetcher: &'a dyn Fetch,
    classifier: &'a dyn RelevanceClassifier,
    providers: &'a [Box<dyn SearchProvider>],
    sites: Vec<SiteSource>,
    link_keywords: Vec<String>,
    categorizer: Categorizer,
    staleness: StalenessFilter,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        config: &'a Config,
        fetcher: &'a dyn Fetch,
        classifier: &'a dyn RelevanceClassifier,
        providers: &'a [Box<dyn SearchProvider>],
    ) -> Self {
        Self {
            config,
            fetcher,
            classifier,
            providers,
            sites: config.sites.iter().map(SiteSource::from_config).collect(),
            link_keywords: config.keywords.categories.all().cloned().collect(),
            categorizer: Categorizer::new(&config.keywords.categories),
            staleness: StalenessFilter::new(
                &config.staleness.phrases,
                chrono::Utc::now().year(),
            ),
        }
    }

    /// Override the year used for query stamps and staleness checks.
    pub fn with_year(mut self, year: i32) -> Self {
        self.staleness = StalenessFilter::new(&self.config.staleness.phrases, year);
        self
    }

    pub fn current_year(&self) -> i32 {
        self.staleness.current_year()
    }

    /// Build the digest for `user`.
    pub async fn aggregate(&self, user: &UserPreferences) -> Digest {
        self.run(user).await.digest
    }

    /// Build the digest for `user`, returning run counters alongside it.
    pub async fn run(&self, user: &UserPreferences) -> AggregateOutcome {
        let mut state = RunState::default();

        for site in &self.sites {
            let result = site.collect(self.fetcher, self.anchor_filter()).await;
            let check_staleness = self.config.staleness.apply_to_sites;
            self.absorb(&mut state, &site.label, result, check_staleness);
        }

        for term in &user.preference_terms {
            let query = QueryBuilder::new(&self.config.search.query_template)
                .term(term)
                .year(self.current_year())
                .build();

            for provider in self.providers {
                let label = format!("{}: {}", provider.name(), query);
                let result = self.search(provider.as_ref(), &query, &label).await;
                self.absorb(&mut state, &label, result, true);
            }
        }

        info!(
            "Digest for {}: {} entries in {} buckets ({} of {} sources failed)",
            user.display_name,
            state.digest.len(),
            state.digest.buckets().len(),
            state.report.failed_sources.len(),
            state.report.sources_attempted
        );

        AggregateOutcome {
            digest: state.digest,
            report: state.report,
        }
    }

    fn anchor_filter(&self) -> AnchorFilter<'_> {
        if self.config.keywords.link_prefilter {
            AnchorFilter::RequireKeyword(&self.link_keywords)
        } else {
            AnchorFilter::KeepAll
        }
    }

    async fn search(
        &self,
        provider: &dyn SearchProvider,
        query: &str,
        label: &str,
    ) -> Result<Vec<Candidate>, SourceError> {
        let mut results = provider.search(self.fetcher, query).await?;
        let max = self.config.search.max_results;
        if max > 0 && results.len() > max {
            results.truncate(max);
        }
        Ok(results
            .into_iter()
            .map(|r| r.into_candidate(label))
            .collect())
    }

    /// Fold one source's result into the run. Errors become empty contributions.
    fn absorb(
        &self,
        state: &mut RunState,
        label: &str,
        result: Result<Vec<Candidate>, SourceError>,
        check_staleness: bool,
    ) {
        state.report.sources_attempted += 1;

        let candidates = match result {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Skipping source {}: {}", label, e);
                state.report.failed_sources.push(FailedSource {
                    label: label.to_string(),
                    error: e.to_string(),
                });
                return;
            }
        };

        for candidate in candidates {
            state.report.candidates_seen += 1;
            let text = candidate.combined_text();

            if check_staleness {
                if let Some(reason) = self.staleness.stale_reason(&text) {
                    debug!("Stale ({}): {}", reason, candidate.url);
                    state.report.stale += 1;
                    continue;
                }
            }

            if !self.classifier.is_relevant(&text) {
                state.report.irrelevant += 1;
                continue;
            }

            if state.seen.contains(&candidate.url) {
                state.report.duplicates += 1;
                continue;
            }

            let category = self.categorizer.categorize(&candidate.categorization_text());
            let bucket = match self.config.digest.group_by {
                GroupBy::Source => label.to_string(),
                GroupBy::Category => category.as_str().to_string(),
            };

            let cap = self.config.digest.max_per_bucket;
            if cap > 0 && state.digest.bucket(&bucket).is_some_and(|b| b.len() >= cap) {
                state.report.over_cap += 1;
                continue;
            }

            state.seen.insert(candidate.url.clone());
            state.report.accepted += 1;
            state.digest.push(
                &bucket,
                DigestEntry {
                    candidate,
                    category,
                },
            );
        }
    }
}
