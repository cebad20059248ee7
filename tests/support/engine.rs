use std::sync::Arc;
use std::time::Duration;

use fuelwatch::adapter::outbound::dedup::InMemoryDeduplicator;
use fuelwatch::application::alert::{AlertEngine, EngineConfig};
use fuelwatch::port::{PriceSource, SubscriberDirectory};
use fuelwatch::testkit::notifier::RecordingNotifier;

/// Engine config with short timings for loop tests.
pub fn fast_config() -> EngineConfig {
    EngineConfig {
        poll_interval: Duration::from_millis(20),
        retry_interval: Duration::from_millis(20),
        request_timeout: Duration::from_millis(200),
        max_concurrent_sends: 4,
        reconcile_dedup: true,
    }
}

/// Engine plus handles to the pieces tests assert on.
pub struct EngineFixture {
    pub engine: AlertEngine,
    pub notifier: RecordingNotifier,
    pub dedup: Arc<InMemoryDeduplicator>,
}

pub fn engine_with(
    prices: Arc<dyn PriceSource>,
    directory: Arc<dyn SubscriberDirectory>,
    notifier: RecordingNotifier,
    config: EngineConfig,
) -> EngineFixture {
    let dedup = Arc::new(InMemoryDeduplicator::new());
    let engine = AlertEngine::new(
        prices,
        directory,
        Arc::new(notifier.clone()),
        dedup.clone(),
        config,
    );
    EngineFixture {
        engine,
        notifier,
        dedup,
    }
}
