//! Handler for the `run` command.

use std::path::Path;

use tracing::info;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

/// Load configuration, initialize logging and run until Ctrl-C.
pub async fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load(config_path)?;

    if !output::is_quiet() && !config.logging.is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::field("Price source", &config.price_source.url);
        output::field("Poll interval", format!("{}s", config.poll.interval_secs));
        if config.dry_run {
            output::warning("Dry-run mode enabled - alerts will be logged, not sent");
        }
    }

    config.init_logging();
    info!("fuelwatch starting");
    bootstrap::run(config).await?;
    info!("fuelwatch stopped");

    Ok(())
}
