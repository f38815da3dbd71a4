//! Registered user preferences.

use serde::{Deserialize, Serialize};

/// Read-only input to the aggregator, supplied by the registration subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub display_name: String,
    pub contact_address: String,
    /// Ordered preference terms, e.g. `["jobs", "scholarships"]`.
    pub preference_terms: Vec<String>,
}

impl UserPreferences {
    pub fn new(display_name: &str, contact_address: &str, preference_terms: Vec<String>) -> Self {
        Self {
            display_name: display_name.to_string(),
            contact_address: contact_address.to_string(),
            preference_terms,
        }
    }

    /// Parse a comma separated preference list the way the registration form does.
    pub fn parse_terms(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_terms_trims_and_lowercases() {
        assert_eq!(
            UserPreferences::parse_terms(" Jobs, online courses ,,Scholarships"),
            vec!["jobs", "online courses", "scholarships"]
        );
    }
}
