//! Handler for `check config`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::{Config, DirectoryBackend};

/// Validate configuration file without starting the service.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Price source", &config.price_source.url);
    output::field("Feed format", config.price_source.format.as_str());
    output::field("Poll interval", format!("{}s", config.poll.interval_secs));
    output::field("Retry interval", format!("{}s", config.poll.retry_interval_secs));
    output::field("Timeout", format!("{}s", config.poll.request_timeout_secs));
    match config.directory.backend {
        DirectoryBackend::Sqlite => output::field("Directory", &config.directory.database_url),
        DirectoryBackend::Memory => output::field("Directory", "in-memory"),
    }
    output::field("Dry run", config.dry_run);

    if config.telegram.enabled {
        if telegram_token_present() {
            output::success("Telegram integration configured");
        } else {
            output::warning("Telegram enabled but environment variables are missing");
            output::field("Missing", "TELEGRAM_BOT_TOKEN");
        }
    } else {
        output::field("Telegram", "disabled");
    }

    output::success("Configuration check complete");

    Ok(())
}

fn telegram_token_present() -> bool {
    std::env::var("TELEGRAM_BOT_TOKEN").is_ok_and(|token| !token.trim().is_empty())
}
