//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram configuration
    pub telegram: TelegramConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// LinkedIn enrichment configuration
    #[serde(default)]
    pub linkedin: LinkedInConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: String,

    /// Bot API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Long-poll timeout for getUpdates
    #[serde(default = "default_poll_timeout", with = "humantime_serde")]
    pub poll_timeout: Duration,

    /// Outbound request timeout
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedInConfig {
    /// Authenticated session cookie (li_at). Enrichment is disabled when
    /// absent.
    #[serde(default)]
    pub session_cookie: Option<String>,

    /// CSRF token (JSESSIONID)
    #[serde(default)]
    pub csrf_token: Option<String>,

    /// Profile API base URL
    #[serde(default = "default_linkedin_url")]
    pub base_url: String,

    /// Request timeout
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Retry attempts for transient lookup failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Comma-separated admin user ids
    #[serde(default)]
    pub admin_ids: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Rate limit: admissions per window
    #[serde(default = "default_rate_limit")]
    pub rate_limit: usize,

    /// Rate limit window
    #[serde(default = "default_rate_window", with = "humantime_serde")]
    pub rate_window: Duration,

    /// Profiles per page in the user list
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            session_cookie: None,
            csrf_token: None,
            base_url: default_linkedin_url(),
            timeout: default_request_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            admin_ids: String::new(),
            log_level: default_log_level(),
            rate_limit: default_rate_limit(),
            rate_window: default_rate_window(),
            page_size: default_page_size(),
        }
    }
}

impl BotConfig {
    /// Parse the comma-separated admin list, skipping malformed entries.
    pub fn admin_ids(&self) -> Vec<i64> {
        self.admin_ids
            .split(',')
            .filter_map(|id| id.trim().parse().ok())
            .collect()
    }
}

// Default value functions
fn default_api_url() -> String {
    "https://api.telegram.org".into()
}

fn default_poll_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_database_url() -> String {
    "sqlite://network_bot.db".into()
}

fn default_linkedin_url() -> String {
    "https://www.linkedin.com/voyager/api".into()
}

fn default_max_retries() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".into()
}

fn default_rate_limit() -> usize {
    5
}

fn default_rate_window() -> Duration {
    Duration::from_secs(60)
}

fn default_page_size() -> i64 {
    4
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Keep strings as strings: bot tokens and admin id lists
                    // must not be parsed as numbers.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .map(Self::normalized)
            .context("Failed to deserialize configuration")
    }

    /// Pagination arithmetic divides by the page size, so zero or negative
    /// values are pulled up to 1.
    fn normalized(mut self) -> Self {
        self.bot.page_size = self.bot.page_size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_ids_parsing() {
        let bot = BotConfig {
            admin_ids: "123, 456,bogus,789".into(),
            ..Default::default()
        };
        assert_eq!(bot.admin_ids(), vec![123, 456, 789]);
    }

    #[test]
    fn test_admin_ids_empty() {
        assert!(BotConfig::default().admin_ids().is_empty());
    }

    #[test]
    fn test_page_size_clamped_to_one() {
        let config = Config {
            telegram: TelegramConfig {
                bot_token: "token".into(),
                api_url: default_api_url(),
                poll_timeout: default_poll_timeout(),
                request_timeout: default_request_timeout(),
            },
            database: DatabaseConfig::default(),
            linkedin: LinkedInConfig::default(),
            bot: BotConfig {
                page_size: 0,
                ..Default::default()
            },
        };

        assert_eq!(config.normalized().bot.page_size, 1);
    }

    #[test]
    fn test_defaults() {
        let bot = BotConfig::default();
        assert_eq!(bot.rate_limit, 5);
        assert_eq!(bot.rate_window, Duration::from_secs(60));
        assert_eq!(bot.page_size, 4);
    }
}
