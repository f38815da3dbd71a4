//! Registered users, as written by the registration subsystem.
//!
//! One JSON object per line:
//!
//! ```text
//! {"first_name": "Amina", "last_name": "Y", "email": "amina@example.org",
//!  "preferences": ["jobs", "scholarships"], "frequency": "weekly"}
//! ```
//!
//! `preferences` may also be a single comma separated string.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::UserPreferences;

#[derive(Debug, Error)]
pub enum UserFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Preferences {
    List(Vec<String>),
    Csv(String),
}

impl Preferences {
    fn terms(&self) -> Vec<String> {
        match self {
            Preferences::List(items) => items
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            Preferences::Csv(raw) => UserPreferences::parse_terms(raw),
        }
    }
}

/// One registration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub preferences: Preferences,
    #[serde(default)]
    pub frequency: Option<String>,
}

impl RegisteredUser {
    pub fn to_preferences(&self) -> UserPreferences {
        UserPreferences::new(
            self.first_name.trim(),
            self.email.trim(),
            self.preferences.terms(),
        )
    }
}

/// Parse a JSON-lines document. Blank lines are ignored; malformed lines are
/// skipped with a warning.
pub fn parse_users(raw: &str) -> Vec<RegisteredUser> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| match serde_json::from_str(line) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Skipping user record on line {}: {}", idx + 1, e);
                None
            }
        })
        .collect()
}

pub fn load_users(path: &Path) -> Result<Vec<RegisteredUser>, UserFileError> {
    let raw = std::fs::read_to_string(path).map_err(|source| UserFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_users(&raw))
}
