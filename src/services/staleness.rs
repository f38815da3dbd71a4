//! Staleness filter for year-stamped search results.
//!
//! Text referring to a past year, or matching a retrospective phrase such as
//! "annual report", is treated as stale.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::{first_match, lowercase_all};

/// Standalone 4-digit years from 1900 to 2099.
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap());

/// Why a text was judged stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    PastYear(i32),
    Phrase(String),
}

impl std::fmt::Display for StaleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PastYear(year) => write!(f, "mentions past year {}", year),
            Self::Phrase(phrase) => write!(f, "matches phrase '{}'", phrase),
        }
    }
}

/// Rejects candidates that mention a past year or a staleness phrase.
#[derive(Debug, Clone)]
pub struct StalenessFilter {
    phrases: Vec<String>,
    current_year: i32,
}

impl StalenessFilter {
    pub fn new(phrases: &[String], current_year: i32) -> Self {
        Self {
            phrases: lowercase_all(phrases),
            current_year,
        }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Reason `text` is stale, if any. Past years are checked before phrases.
    pub fn stale_reason(&self, text: &str) -> Option<StaleReason> {
        let past_year = YEAR_PATTERN
            .find_iter(text)
            .filter_map(|m| m.as_str().parse::<i32>().ok())
            .find(|year| *year < self.current_year);
        if let Some(year) = past_year {
            return Some(StaleReason::PastYear(year));
        }

        first_match(text, &self.phrases).map(|p| StaleReason::Phrase(p.to_string()))
    }

    pub fn is_stale(&self, text: &str) -> bool {
        self.stale_reason(text).is_some()
    }
}
