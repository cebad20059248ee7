//! The poll loop: fetch, evaluate, deduplicate, notify, sleep.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use tokio::sync::watch;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use super::cycle::{CycleOutcome, CycleReport};
use super::message::format_alert_message;
use crate::domain::{evaluate, Alert, DedupeKey, PriceSnapshot, Subscriber, TriggerResult};
use crate::error::{DirectoryError, FetchError, SendError};
use crate::port::{AlertDeduplicator, Notifier, PriceSource, SubscriberDirectory};

/// Scheduling and resource limits for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Sleep after a completed cycle.
    pub poll_interval: Duration,
    /// Sleep after a cycle that could not fetch prices or list subscribers.
    pub retry_interval: Duration,
    /// Bound on each external call (fetch, list, send).
    pub request_timeout: Duration,
    /// Deliveries in flight at once within a cycle.
    pub max_concurrent_sends: usize,
    /// Drop dedup entries for rules no longer in the directory.
    pub reconcile_dedup: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            retry_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(10),
            max_concurrent_sends: 8,
            reconcile_dedup: true,
        }
    }
}

/// Periodic alert evaluator.
///
/// Holds its collaborators behind ports so each one can be swapped out in
/// tests. The deduplicator is the only mutable state and is owned by
/// whoever constructs the engine.
pub struct AlertEngine {
    prices: Arc<dyn PriceSource>,
    directory: Arc<dyn SubscriberDirectory>,
    notifier: Arc<dyn Notifier>,
    dedup: Arc<dyn AlertDeduplicator>,
    config: EngineConfig,
}

impl AlertEngine {
    #[must_use]
    pub fn new(
        prices: Arc<dyn PriceSource>,
        directory: Arc<dyn SubscriberDirectory>,
        notifier: Arc<dyn Notifier>,
        dedup: Arc<dyn AlertDeduplicator>,
        config: EngineConfig,
    ) -> Self {
        Self {
            prices,
            directory,
            notifier,
            dedup,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run cycles until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// A failing cycle never ends the loop; it only shortens the wait to the
    /// retry interval. Shutdown is honoured mid-cycle as well as mid-sleep.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            source = self.prices.source_name(),
            poll_secs = self.config.poll_interval.as_secs(),
            retry_secs = self.config.retry_interval.as_secs(),
            "Alert engine started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let delay = tokio::select! {
                outcome = self.run_cycle() => self.delay_after(&outcome),
                () = shutdown_signal(&mut shutdown) => break,
            };

            tokio::select! {
                () = sleep(delay) => {}
                () = shutdown_signal(&mut shutdown) => break,
            }
        }

        info!("Alert engine stopped");
    }

    /// Execute one fetch, evaluate, notify pass.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let snapshot = match self.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    error = %e,
                    retry_secs = self.config.retry_interval.as_secs(),
                    "Price fetch failed, skipping cycle"
                );
                return CycleOutcome::FetchFailed(e);
            }
        };

        let subscribers = match self.list_subscribers().await {
            Ok(subscribers) => subscribers,
            Err(e) => {
                warn!(error = %e, "Subscriber listing failed, skipping cycle");
                return CycleOutcome::DirectoryFailed(e);
            }
        };

        let (alerts, live_keys, mut report) = self.evaluate_all(&snapshot, &subscribers);

        let delivered: Vec<bool> = stream::iter(alerts)
            .map(|alert| self.deliver(alert))
            .buffer_unordered(self.config.max_concurrent_sends.max(1))
            .collect()
            .await;
        report.sent = delivered.iter().filter(|ok| **ok).count();
        report.failed = delivered.len() - report.sent;

        if self.config.reconcile_dedup {
            report.pruned = self.dedup.retain(&live_keys);
        }

        debug!(
            readings = report.readings,
            subscribers = report.subscribers,
            rules = report.rules_evaluated,
            triggered = report.triggered,
            suppressed = report.suppressed,
            sent = report.sent,
            failed = report.failed,
            pruned = report.pruned,
            "Cycle complete"
        );

        CycleOutcome::Completed(report)
    }

    fn delay_after(&self, outcome: &CycleOutcome) -> Duration {
        if outcome.is_completed() {
            self.config.poll_interval
        } else {
            self.config.retry_interval
        }
    }

    async fn fetch_snapshot(&self) -> Result<PriceSnapshot, FetchError> {
        let limit = self.config.request_timeout;
        match timeout(limit, self.prices.fetch_latest()).await {
            Err(_) => Err(FetchError::Timeout(limit)),
            Ok(Ok(snapshot)) if snapshot.is_empty() => Err(FetchError::EmptyPayload),
            Ok(result) => result,
        }
    }

    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, DirectoryError> {
        let limit = self.config.request_timeout;
        timeout(limit, self.directory.list_subscribers())
            .await
            .unwrap_or(Err(DirectoryError::Timeout(limit)))
    }

    /// Evaluate every rule in directory order and commit dedup state for the
    /// alerts that should go out.
    fn evaluate_all(
        &self,
        snapshot: &PriceSnapshot,
        subscribers: &[Subscriber],
    ) -> (Vec<Alert>, HashSet<DedupeKey>, CycleReport) {
        let mut report = CycleReport {
            readings: snapshot.len(),
            ..CycleReport::default()
        };
        let mut alerts = Vec::new();
        let mut live_keys = HashSet::new();

        for subscriber in subscribers {
            // Listed subscribers keep their dedup entries even while undeliverable.
            live_keys.extend(
                subscriber
                    .rules
                    .iter()
                    .map(|rule| DedupeKey::new(&subscriber.id, rule)),
            );

            let Some(address) = subscriber.deliverable_address() else {
                report.skipped_subscribers += 1;
                continue;
            };
            report.subscribers += 1;

            for rule in &subscriber.rules {
                report.rules_evaluated += 1;
                let key = DedupeKey::new(&subscriber.id, rule);

                let TriggerResult::Triggered(price) = evaluate(snapshot, rule) else {
                    continue;
                };
                report.triggered += 1;

                if !self.dedup.should_notify(&key, price) {
                    report.suppressed += 1;
                    debug!(
                        subscriber = %subscriber.id,
                        key = %key,
                        price,
                        "Alert already sent at this price"
                    );
                    continue;
                }

                alerts.push(Alert {
                    subscriber: subscriber.id.clone(),
                    address: address.clone(),
                    rule: rule.clone(),
                    price,
                    key,
                });
            }
        }

        (alerts, live_keys, report)
    }

    /// Send one alert. The dedup entry stays committed whatever the outcome.
    async fn deliver(&self, alert: Alert) -> bool {
        let text = format_alert_message(&alert);
        let limit = self.config.request_timeout;

        let result = timeout(limit, self.notifier.send(&alert.address, &text))
            .await
            .unwrap_or(Err(SendError::Timeout(limit)));

        match result {
            Ok(()) => {
                info!(
                    subscriber = %alert.subscriber,
                    commodity = %alert.rule.commodity,
                    direction = %alert.rule.direction,
                    threshold = alert.rule.threshold,
                    price = alert.price,
                    "Alert sent"
                );
                true
            }
            Err(e) => {
                error!(
                    subscriber = %alert.subscriber,
                    address = %alert.address,
                    commodity = %alert.rule.commodity,
                    error = %e,
                    "Failed to send alert"
                );
                false
            }
        }
    }
}

/// Resolves once shutdown is requested or the sender is gone.
async fn shutdown_signal(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            info!("Shutdown signal received");
            return;
        }
        if shutdown.changed().await.is_err() {
            info!("Shutdown channel closed");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::dedup::InMemoryDeduplicator;
    use crate::adapter::outbound::directory::InMemoryDirectory;
    use crate::domain::{AlertRule, Commodity};
    use crate::testkit::notifier::RecordingNotifier;
    use crate::testkit::price::ScriptedPriceSource;

    fn engine(
        prices: ScriptedPriceSource,
        subscribers: Vec<Subscriber>,
        notifier: RecordingNotifier,
    ) -> AlertEngine {
        AlertEngine::new(
            Arc::new(prices),
            Arc::new(InMemoryDirectory::with_subscribers(subscribers)),
            Arc::new(notifier),
            Arc::new(InMemoryDeduplicator::new()),
            EngineConfig::default(),
        )
    }

    #[tokio::test]
    async fn duplicate_rule_in_one_cycle_sends_once() {
        let rule = AlertRule::above(Commodity::Ron95, 2.0);
        let alice = Subscriber::new("alice")
            .with_address("1")
            .with_rule(rule.clone())
            .with_rule(rule);
        let notifier = RecordingNotifier::new();
        let prices = ScriptedPriceSource::repeating(
            PriceSnapshot::new().with(Commodity::Ron95, 2.05),
        );
        let engine = engine(prices, vec![alice], notifier.clone());

        let report = *engine.run_cycle().await.report().unwrap();

        assert_eq!(report.triggered, 2);
        assert_eq!(report.suppressed, 1);
        assert_eq!(notifier.len(), 1);
    }

    #[tokio::test]
    async fn skipped_subscribers_are_counted_not_evaluated() {
        let no_address =
            Subscriber::new("ghost").with_rule(AlertRule::above(Commodity::Ron95, 0.0));
        let no_rules = Subscriber::new("idle").with_address("2");
        let notifier = RecordingNotifier::new();
        let prices = ScriptedPriceSource::repeating(
            PriceSnapshot::new().with(Commodity::Ron95, 2.05),
        );
        let engine = engine(prices, vec![no_address, no_rules], notifier.clone());

        let report = *engine.run_cycle().await.report().unwrap();

        assert_eq!(report.skipped_subscribers, 2);
        assert_eq!(report.subscribers, 0);
        assert_eq!(report.rules_evaluated, 0);
        assert_eq!(notifier.len(), 0);
    }

    #[tokio::test]
    async fn empty_snapshot_counts_as_fetch_failure() {
        let notifier = RecordingNotifier::new();
        let prices = ScriptedPriceSource::repeating(PriceSnapshot::new());
        let engine = engine(prices, Vec::new(), notifier);

        let outcome = engine.run_cycle().await;
        assert!(matches!(outcome, CycleOutcome::FetchFailed(FetchError::EmptyPayload)));
    }

    #[test]
    fn delay_follows_outcome() {
        let engine = engine(ScriptedPriceSource::new(), Vec::new(), RecordingNotifier::new());
        let config = engine.config().clone();

        assert_eq!(
            engine.delay_after(&CycleOutcome::Completed(CycleReport::default())),
            config.poll_interval
        );
        assert_eq!(
            engine.delay_after(&CycleOutcome::FetchFailed(FetchError::EmptyPayload)),
            config.retry_interval
        );
    }
}
