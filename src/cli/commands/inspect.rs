//! Commands for checking classifier and extractor behaviour by hand.

use chrono::Datelike;
use console::style;

use crate::cli::helpers::load_classifier;
use crate::cli::icons::{error, info, success};
use crate::config::Config;
use crate::discovery::url_utils::site_label;
use crate::discovery::SiteSource;
use crate::scrapers::{AnchorFilter, HttpFetcher};
use crate::services::{Categorizer, StalenessFilter};

/// Print relevance verdict, category and staleness for each text.
pub fn cmd_classify(config: &Config, degrade: bool, texts: &[String]) -> anyhow::Result<()> {
    let classifier = load_classifier(config, degrade)?;
    let categorizer = Categorizer::new(&config.keywords.categories);
    let staleness = StalenessFilter::new(&config.staleness.phrases, chrono::Utc::now().year());

    eprintln!("{} Using {} relevance", info(), classifier.name());
    for text in texts {
        let mark = if classifier.is_relevant(text) {
            success()
        } else {
            error()
        };
        let score = classifier
            .score(text)
            .map(|p| format!(" p={:.2}", p))
            .unwrap_or_default();
        let stale = staleness
            .stale_reason(text)
            .map(|reason| format!(" (stale: {})", reason))
            .unwrap_or_default();
        println!(
            "{} [{}] {}{}{}",
            mark,
            categorizer.categorize(text),
            text,
            style(score).dim(),
            style(stale).dim()
        );
    }
    Ok(())
}

/// Fetch one page and list its extracted links.
pub async fn cmd_links(
    config: &Config,
    degrade: bool,
    url: &str,
    keep_all: bool,
    relevant_only: bool,
) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::from_config(&config.fetch)?;
    let classifier = if relevant_only {
        Some(load_classifier(config, degrade)?)
    } else {
        None
    };

    let keywords: Vec<String> = config.keywords.categories.all().cloned().collect();
    let filter = if keep_all || !config.keywords.link_prefilter {
        AnchorFilter::KeepAll
    } else {
        AnchorFilter::RequireKeyword(&keywords)
    };

    let source = SiteSource::new(url, &site_label(url));
    let candidates = source.collect(&fetcher, filter).await?;

    let mut shown = 0;
    for candidate in &candidates {
        if let Some(classifier) = &classifier {
            if !classifier.is_relevant(&candidate.combined_text()) {
                continue;
            }
        }
        println!("- {}\n  → {}", candidate.display_text, candidate.url);
        shown += 1;
    }

    eprintln!(
        "{} {} of {} links from {}",
        success(),
        shown,
        candidates.len(),
        source.label
    );
    Ok(())
}
