//! Configuration for refugee-digest.
//!
//! Every field has a default, so an empty or missing config file yields the
//! built-in site list, keyword lists and a keyword-only relevance filter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::discovery::sources::search::DEFAULT_QUERY_TEMPLATE;

/// File name looked up in the working directory.
pub const CONFIG_FILENAME: &str = "refugee-digest.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "REFUGEE_DIGEST_CONFIG";

/// Default per-fetch timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Desktop browser user agent sent by default.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/122.0 Safari/537.36";

/// Search providers this build knows how to query.
pub const KNOWN_PROVIDERS: &[&str] = &["duckduckgo", "google"];

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A fixed source site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub url: String,
    /// Display name; defaults to the host without a leading `www.`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SiteConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            name: None,
        }
    }
}

/// Search provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider ids, queried in this order for every preference term.
    pub providers: Vec<String>,
    /// Query pattern with `{term}` and `{year}` placeholders.
    pub query_template: String,
    /// Results kept per provider and query (0 = unlimited).
    pub max_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_cse_id: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            providers: vec!["duckduckgo".to_string()],
            query_template: DEFAULT_QUERY_TEMPLATE.to_string(),
            max_results: 10,
            google_api_key: None,
            google_cse_id: None,
        }
    }
}

/// Keyword sets per category, checked in category declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryKeywords {
    pub employment: Vec<String>,
    pub training: Vec<String>,
    pub scholarships: Vec<String>,
    pub courses: Vec<String>,
    pub support: Vec<String>,
}

impl Default for CategoryKeywords {
    fn default() -> Self {
        Self {
            employment: strings(&["job", "work", "employment", "career", "hire"]),
            training: strings(&["training", "skill", "coach"]),
            scholarships: strings(&["scholarship", "funding", "tuition", "grant"]),
            courses: strings(&["course", "online", "class", "learn"]),
            support: strings(&["support", "aid", "help", "service", "resource"]),
        }
    }
}

impl CategoryKeywords {
    /// Every category keyword, used by the link pre-filter.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.employment
            .iter()
            .chain(&self.training)
            .chain(&self.scholarships)
            .chain(&self.courses)
            .chain(&self.support)
    }
}

/// Keyword lists for relevance and categorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Any case-insensitive substring match marks a text relevant.
    pub relevance: Vec<String>,
    pub categories: CategoryKeywords,
    /// Drop anchors with no text whose href contains no category keyword.
    pub link_prefilter: bool,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            relevance: strings(&[
                "refugee",
                "asylum",
                "job",
                "employment",
                "career",
                "scholarship",
                "internship",
                "fellowship",
                "apprenticeship",
                "training",
                "course",
                "grant",
                "tuition",
            ]),
            categories: CategoryKeywords::default(),
            link_prefilter: true,
        }
    }
}

/// Staleness filter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StalenessConfig {
    /// Phrases marking retrospective content.
    pub phrases: Vec<String>,
    /// Also filter fixed-site candidates (search results are always filtered).
    pub apply_to_sites: bool,
}

impl Default for StalenessConfig {
    fn default() -> Self {
        Self {
            phrases: strings(&["annual report", "celebrates", "review"]),
            apply_to_sites: false,
        }
    }
}

/// HTTP fetch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    /// Custom user agent, or `"impersonate"` for a random real browser.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Relevance strategy selector.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceMode {
    /// Keyword substring matching only
    #[default]
    Keyword,
    /// Trained text classifier loaded from `model_path`
    Model,
}

/// Relevance classifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
    pub mode: RelevanceMode,
    /// Serialized vectorizer + classifier bundle (JSON).
    pub model_path: PathBuf,
    /// OR the trained classifier with the keyword matcher.
    pub keyword_fallback: bool,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            mode: RelevanceMode::Keyword,
            model_path: PathBuf::from("relevance-model.json"),
            keyword_fallback: true,
        }
    }
}

/// How digest buckets are keyed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// One bucket per site and per provider query
    #[default]
    Source,
    /// One bucket per category
    Category,
}

/// Digest rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub group_by: GroupBy,
    /// Entries kept per bucket (0 = unlimited).
    pub max_per_bucket: usize,
    pub subject: String,
    pub signature: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            group_by: GroupBy::Source,
            max_per_bucket: 0,
            subject: "Your Refugee Opportunity Updates".to_string(),
            signature: "Refugee Opportunities Team".to_string(),
        }
    }
}

/// Outgoing mail hand-off settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Sender address written into the From header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Directory where messages are spooled; printed to stdout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spool_dir: Option<PathBuf>,
}

/// Top-level configuration, constructed once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sites: Vec<SiteConfig>,
    pub search: SearchConfig,
    pub keywords: KeywordConfig,
    pub staleness: StalenessConfig,
    pub fetch: FetchConfig,
    pub relevance: RelevanceConfig,
    pub digest: DigestConfig,
    pub mail: MailConfig,
    /// File this config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sites: default_sites(),
            search: SearchConfig::default(),
            keywords: KeywordConfig::default(),
            staleness: StalenessConfig::default(),
            fetch: FetchConfig::default(),
            relevance: RelevanceConfig::default(),
            digest: DigestConfig::default(),
            mail: MailConfig::default(),
            source_path: None,
        }
    }
}

fn default_sites() -> Vec<SiteConfig> {
    [
        "https://www.unhcr.org",
        "https://www.rescue.org",
        "https://www.tent.org",
        "https://refugees.org",
        "https://www.opportunitiesforrefugees.org",
        "https://help.rescue.org",
        "https://www.upwardlyglobal.org",
        "https://rcusa.org/for-refugees/",
        "https://www.refugeeemployment.org/",
    ]
    .iter()
    .map(|url| SiteConfig::new(url))
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Options for locating the config file.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using the discovery order, then apply env overrides.
    pub fn load(options: &LoadOptions) -> Result<Self, ConfigError> {
        let mut config = match discover_config_path(options.config_path.as_deref()) {
            Some(path) => Self::load_from_path(&path)?,
            None => {
                debug!("No config file found, using built-in defaults");
                Self::default()
            }
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse TOML text.
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Fill unset search credentials from `GOOGLE_API_KEY` / `GOOGLE_CSE_ID`.
    pub fn apply_env(&mut self) {
        if self.search.google_api_key.is_none() {
            self.search.google_api_key = non_empty_env("GOOGLE_API_KEY");
        }
        if self.search.google_cse_id.is_none() {
            self.search.google_cse_id = non_empty_env("GOOGLE_CSE_ID");
        }
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if let Some(site) = self.sites.iter().find(|s| !s.url.starts_with("http")) {
            return Err(ConfigError::Invalid(format!(
                "site URL must start with http: {}",
                site.url
            )));
        }
        if let Some(unknown) = self
            .search
            .providers
            .iter()
            .find(|p| !KNOWN_PROVIDERS.contains(&p.to_lowercase().as_str()))
        {
            return Err(ConfigError::Invalid(format!(
                "unknown search provider: {} (known: {})",
                unknown,
                KNOWN_PROVIDERS.join(", ")
            )));
        }
        if !self.search.query_template.contains("{term}") {
            return Err(ConfigError::Invalid(
                "search.query_template must contain {term}".to_string(),
            ));
        }
        Ok(())
    }

    /// Directory relative paths resolve against: the config file's directory, or CWD.
    pub fn base_dir(&self) -> PathBuf {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve a possibly relative path against [`Config::base_dir`].
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Absolute location of the relevance model bundle.
    pub fn model_path(&self) -> PathBuf {
        self.resolve_path(&self.relevance.model_path)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Find the config file: explicit path, env var, working directory, user config dir.
fn discover_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = non_empty_env(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(CONFIG_FILENAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("refugee-digest").join("config.toml"))
        .filter(|path| path.exists())
}
