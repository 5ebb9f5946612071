//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use feed_core::PreviewCaps;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::telemetry::LogFormat;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub feed: FeedConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
    pub log_format: LogFormat,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// Preview caps and page sizes used when posts are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub reaction_preview_cap: usize,
    pub comment_preview_cap: usize,
    pub reply_preview_cap: usize,
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl FeedConfig {
    #[must_use]
    pub fn preview_caps(&self) -> PreviewCaps {
        PreviewCaps::new(
            self.reaction_preview_cap,
            self.comment_preview_cap,
            self.reply_preview_cap,
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let caps = [
            ("FEED_REACTION_PREVIEW_CAP", self.reaction_preview_cap),
            ("FEED_COMMENT_PREVIEW_CAP", self.comment_preview_cap),
            ("FEED_REPLY_PREVIEW_CAP", self.reply_preview_cap),
        ];
        if let Some(&(name, _)) = caps.iter().find(|(_, cap)| *cap == 0) {
            return Err(ConfigError::InvalidValue(name, "must be at least 1".to_string()));
        }
        if self.max_page_size < 1 {
            return Err(ConfigError::InvalidValue(
                "FEED_MAX_PAGE_SIZE",
                "must be at least 1".to_string(),
            ));
        }
        if self.default_page_size < 1 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidValue(
                "FEED_DEFAULT_PAGE_SIZE",
                format!("must be between 1 and {}", self.max_page_size),
            ));
        }
        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            reaction_preview_cap: PreviewCaps::DEFAULT_REACTIONS,
            comment_preview_cap: PreviewCaps::DEFAULT_COMMENTS,
            reply_preview_cap: PreviewCaps::DEFAULT_REPLIES,
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "social-feed".to_string()
}

fn default_page_size() -> i64 {
    10
}

fn default_max_page_size() -> i64 {
    100
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but cannot be parsed, or if
    /// the resulting feed settings are inconsistent
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let feed = FeedConfig {
            reaction_preview_cap: parse_or(&lookup, "FEED_REACTION_PREVIEW_CAP", PreviewCaps::DEFAULT_REACTIONS)?,
            comment_preview_cap: parse_or(&lookup, "FEED_COMMENT_PREVIEW_CAP", PreviewCaps::DEFAULT_COMMENTS)?,
            reply_preview_cap: parse_or(&lookup, "FEED_REPLY_PREVIEW_CAP", PreviewCaps::DEFAULT_REPLIES)?,
            default_page_size: parse_or(&lookup, "FEED_DEFAULT_PAGE_SIZE", default_page_size())?,
            max_page_size: parse_or(&lookup, "FEED_MAX_PAGE_SIZE", default_max_page_size())?,
        };
        feed.validate()?;

        let worker_id: u16 = parse_or(&lookup, "WORKER_ID", 0)?;
        if worker_id >= 1024 {
            return Err(ConfigError::InvalidValue("WORKER_ID", worker_id.to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .map(|s| s.parse())
                    .transpose()?
                    .unwrap_or_default(),
                log_format: match lookup("LOG_FORMAT") {
                    Some(s) => s
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("LOG_FORMAT", s))?,
                    None => LogFormat::default(),
                },
            },
            feed,
            snowflake: SnowflakeConfig { worker_id },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
