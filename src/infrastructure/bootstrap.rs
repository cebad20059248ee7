//! Composition root: turns a [`Config`] into running services.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::adapter::outbound::dedup::InMemoryDeduplicator;
use crate::adapter::outbound::directory::InMemoryDirectory;
use crate::adapter::outbound::notifier::LogNotifier;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramNotifier};
use crate::adapter::outbound::price::HttpPriceSource;
use crate::adapter::outbound::sqlite::database::open;
use crate::adapter::outbound::sqlite::SqliteDirectory;
use crate::application::alert::AlertEngine;
use crate::error::Result;
use crate::infrastructure::config::{Config, DirectoryBackend};
use crate::port::{Notifier, PriceSource, SubscriberDirectory};

/// Everything `run` needs, wired from configuration.
pub struct Services {
    pub engine: AlertEngine,
    pub directory: Arc<dyn SubscriberDirectory>,
    /// Bot used for the command listener, when Telegram is active.
    #[cfg(feature = "telegram")]
    pub bot: Option<teloxide::Bot>,
}

/// Build the HTTP price source described by `[price_source]`.
///
/// # Errors
/// Returns an error if the URL is invalid or the HTTP client cannot be built.
pub fn build_price_source(config: &Config) -> Result<Arc<dyn PriceSource>> {
    let source = HttpPriceSource::new(
        config.price_source_url()?,
        config.price_source.format,
        config.poll.request_timeout(),
    )?;
    Ok(Arc::new(source))
}

/// Open the subscriber directory described by `[directory]`.
///
/// # Errors
/// Returns an error if the SQLite database cannot be opened or migrated.
pub fn build_directory(config: &Config) -> Result<Arc<dyn SubscriberDirectory>> {
    match config.directory.backend {
        DirectoryBackend::Sqlite => {
            let pool = open(&config.directory.database_url)?;
            info!(database = %config.directory.database_url, "SQLite directory opened");
            Ok(Arc::new(SqliteDirectory::new(pool)))
        }
        DirectoryBackend::Memory => {
            warn!("Using in-memory directory; registrations are lost on restart");
            Ok(Arc::new(InMemoryDirectory::new()))
        }
    }
}

/// Wire every service from configuration.
///
/// # Errors
/// Returns an error if the price source or directory cannot be built.
pub fn build_services(config: &Config) -> Result<Services> {
    let prices = build_price_source(config)?;
    let directory = build_directory(config)?;

    #[cfg(feature = "telegram")]
    let bot = telegram_bot(config);
    #[cfg(feature = "telegram")]
    let notifier: Arc<dyn Notifier> = match (&bot, config.dry_run) {
        (Some(bot), false) => Arc::new(TelegramNotifier::new(bot.clone())),
        _ => Arc::new(LogNotifier),
    };
    #[cfg(not(feature = "telegram"))]
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    if config.dry_run {
        info!("Dry-run mode: alerts are logged, not delivered");
    }

    let engine = AlertEngine::new(
        prices,
        Arc::clone(&directory),
        notifier,
        Arc::new(InMemoryDeduplicator::new()),
        config.engine(),
    );

    Ok(Services {
        engine,
        directory,
        #[cfg(feature = "telegram")]
        bot,
    })
}

#[cfg(feature = "telegram")]
fn telegram_bot(config: &Config) -> Option<teloxide::Bot> {
    if !config.telegram.enabled {
        return None;
    }
    let Some(tg_config) = TelegramConfig::from_env() else {
        warn!("Telegram enabled but TELEGRAM_BOT_TOKEN not set; alerts will only be logged");
        return None;
    };
    info!("Telegram notifier enabled");
    Some(tg_config.bot())
}

/// Run the engine and command listener until Ctrl-C.
///
/// # Errors
/// Returns an error if wiring fails.
pub async fn run(config: Config) -> Result<()> {
    let services = build_services(&config)?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    #[cfg(feature = "telegram")]
    let listener = services.bot.clone().map(|bot| {
        tokio::spawn(crate::adapter::inbound::telegram::run_command_listener(
            bot,
            Arc::clone(&services.directory),
        ))
    });

    let interrupted = tokio::select! {
        () = sleep(config.poll.startup_delay()) => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        info!("Shutdown requested before first cycle");
        #[cfg(feature = "telegram")]
        if let Some(handle) = listener {
            handle.abort();
        }
        return Ok(());
    }

    let engine = services.engine;
    let engine_task = tokio::spawn(async move { engine.run(shutdown_rx).await });

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
    }
    info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);

    if let Err(e) = engine_task.await {
        warn!(error = %e, "Engine task ended abnormally");
    }

    #[cfg(feature = "telegram")]
    if let Some(handle) = listener {
        handle.abort();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_starts_empty() {
        let config = Config::parse_toml("[directory]\nbackend = \"memory\"\n").unwrap();
        let directory = build_directory(&config).unwrap();
        assert!(directory.list_subscribers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sqlite_backend_creates_database() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = dir.path().join("wired.db");
        let toml = format!("[directory]\ndatabase_url = \"{}\"\n", db.display());
        let config = Config::parse_toml(&toml).unwrap();

        let directory = build_directory(&config).unwrap();

        assert!(directory.list_subscribers().await.unwrap().is_empty());
        assert!(db.exists());
    }

    #[test]
    fn services_wire_in_dry_run() {
        let config = Config::parse_toml(
            "dry_run = true\n[directory]\nbackend = \"memory\"\n[telegram]\nenabled = false\n",
        )
        .unwrap();

        let services = build_services(&config).unwrap();
        assert_eq!(services.engine.config().max_concurrent_sends, 8);
    }
}
