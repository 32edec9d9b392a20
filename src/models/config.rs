//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::MenuId;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Menu text parsing rules
    #[serde(default)]
    pub parser: ParserConfig,

    /// Cached menu storage
    #[serde(default)]
    pub cache: CacheConfig,

    /// Remote menu provider settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.parser.base_url)
            .map_err(|e| AppError::validation(format!("parser.base_url is invalid: {e}")))?;
        for pattern in &self.parser.footer_patterns {
            Regex::new(pattern).map_err(|e| AppError::pattern(pattern, e))?;
        }
        if self.cache.directory.as_os_str().is_empty() {
            return Err(AppError::validation("cache.directory is empty"));
        }
        self.cache.timezone()?;
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.menu_ids.is_empty() {
            return Err(AppError::validation("No menu ids to fetch"));
        }
        Ok(())
    }
}

/// Parsing rules for menu text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Prefix for the public menu page URL
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Boilerplate lines, matched case-insensitively against the whole line
    #[serde(default = "defaults::footer_patterns")]
    pub footer_patterns: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            footer_patterns: defaults::footer_patterns(),
        }
    }
}

/// Cached menu storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Root directory holding one subdirectory per menu
    #[serde(default = "defaults::cache_directory")]
    pub directory: PathBuf,

    /// IANA zone whose calendar picks the week and year of a save
    #[serde(default = "defaults::timezone")]
    pub timezone: String,
}

impl CacheConfig {
    /// Parse the configured timezone name.
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|e| {
            AppError::validation(format!("cache.timezone '{}' is invalid: {e}", self.timezone))
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: defaults::cache_directory(),
            timezone: defaults::timezone(),
        }
    }
}

/// Remote menu provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Endpoint returning all weekly menus keyed by id
    #[serde(default = "defaults::api_url")]
    pub api_url: String,

    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Menus to parse and cache on each update
    #[serde(default = "defaults::menu_ids")]
    pub menu_ids: Vec<MenuId>,

    /// Minimum time between two updates
    #[serde(default = "defaults::min_interval")]
    pub min_interval_minutes: u64,

    /// File recording when the last update finished
    #[serde(default = "defaults::status_file")]
    pub status_file: PathBuf,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::api_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            menu_ids: defaults::menu_ids(),
            min_interval_minutes: defaults::min_interval(),
            status_file: defaults::status_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use crate::models::MenuId;

    // Parser defaults
    pub fn base_url() -> String {
        "https://eatery.se/".into()
    }
    pub fn footer_patterns() -> Vec<String> {
        [
            "(.*)Eaterykortet*(.*)",
            "(.*)ingår(.*)",
            "(.*)Rädda maten!(.*)",
            "(.*)Om vi får över mat från lunchen(.*)",
            r"(.*)Endast \d+kr, bra för miljön och för din plånbok.(.*)",
            "(.*)Early Bird(.*)",
            "(.*)L = Laktos",
            "(.*)G = Gluten",
            "(.*)N = Nötter",
            "(.*)S = Skaldjur",
            "(.*)F = Fisk",
            "(.*)allergier(.*)",
            "(.*)Ta mer(.*)",
            "(.*)inte är nöjd(.*)",
            "(.*)rabatt(.*)",
            "(.*)välkommen(.*)",
            r"(.*)kl\.(.*)",
            "(.*)Eatery-kortet(.*)",
            "(.*)detta får du(.*)",
            "(.*)något sött till(.*)",
            // Buffet and bread promotions
            "(.*)((Salladsbuffé)|(nybakat bröd)|(bubbelvatten))(.*)",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    // Cache defaults
    pub fn cache_directory() -> PathBuf {
        PathBuf::from("cached")
    }
    pub fn timezone() -> String {
        "Europe/Stockholm".into()
    }

    // Fetcher defaults
    pub fn api_url() -> String {
        "https://api.eatery.se/wp-json/eatery/v1/menues".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; eatery-menu/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn menu_ids() -> Vec<MenuId> {
        vec![MenuId::from("/kista-nod")]
    }
    pub fn min_interval() -> u64 {
        15
    }
    pub fn status_file() -> PathBuf {
        PathBuf::from("status.json")
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
