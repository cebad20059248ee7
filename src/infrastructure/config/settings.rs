//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the Telegram bot token is never
//! read from the file and comes from `TELEGRAM_BOT_TOKEN` instead.
//!
//! # Example
//!
//! ```no_run
//! use fuelwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use crate::adapter::outbound::price::PriceFeedFormat;
use crate::application::alert::EngineConfig;
use crate::error::{ConfigError, Result};

/// Where prices come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceSourceConfig {
    /// Feed endpoint.
    pub url: String,
    /// Payload shape served at `url`.
    pub format: PriceFeedFormat,
}

impl Default for PriceSourceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000/api/fuel".to_string(),
            format: PriceFeedFormat::default(),
        }
    }
}

/// Poll loop timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between completed cycles.
    pub interval_secs: u64,
    /// Seconds to wait after a failed fetch or directory read.
    pub retry_interval_secs: u64,
    /// Upper bound on every external call, in seconds.
    pub request_timeout_secs: u64,
    /// Delay before the first cycle, giving the command listener a head start.
    pub startup_delay_secs: u64,
    /// Deliveries in flight at once.
    pub max_concurrent_sends: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            retry_interval_secs: 60,
            request_timeout_secs: 10,
            startup_delay_secs: 2,
            max_concurrent_sends: 8,
        }
    }
}

impl PollConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }
}

/// Deduplication settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Forget entries for rules that disappeared from the directory.
    pub reconcile: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self { reconcile: true }
    }
}

/// Subscriber directory backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryBackend {
    /// SQLite database at `database_url`.
    #[default]
    Sqlite,
    /// Process-local directory; empty on every start.
    Memory,
}

/// Subscriber directory settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub backend: DirectoryBackend,
    /// Path to SQLite database file.
    pub database_url: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            backend: DirectoryBackend::default(),
            database_url: "fuelwatch.db".to_string(),
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Telegram delivery and command settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Deliver alerts and serve commands through Telegram.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub price_source: PriceSourceConfig,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub dedup: DedupConfig,

    #[serde(default)]
    pub directory: DirectoryConfig,

    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Log alerts instead of delivering them.
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Parsed price feed URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or unparsable.
    #[allow(clippy::result_large_err)]
    pub fn price_source_url(&self) -> Result<Url> {
        let raw = self.price_source.url.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingField {
                field: "price_source.url",
            }
            .into());
        }
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
            field: "price_source.url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "price_source.url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }
        Ok(url)
    }

    /// Engine settings derived from `[poll]` and `[dedup]`.
    #[must_use]
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            poll_interval: Duration::from_secs(self.poll.interval_secs),
            retry_interval: Duration::from_secs(self.poll.retry_interval_secs),
            request_timeout: self.poll.request_timeout(),
            max_concurrent_sends: self.poll.max_concurrent_sends,
            reconcile_dedup: self.dedup.reconcile,
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.price_source_url()?;

        let positive = [
            ("poll.interval_secs", self.poll.interval_secs),
            ("poll.retry_interval_secs", self.poll.retry_interval_secs),
            ("poll.request_timeout_secs", self.poll.request_timeout_secs),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        if self.poll.max_concurrent_sends == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll.max_concurrent_sends",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.directory.backend == DirectoryBackend::Sqlite
            && self.directory.database_url.trim().is_empty()
        {
            return Err(ConfigError::MissingField {
                field: "directory.database_url",
            }
            .into());
        }

        Ok(())
    }
}
