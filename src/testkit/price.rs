//! Scripted [`PriceSource`] for driving the engine cycle by cycle.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::PriceSnapshot;
use crate::error::FetchError;
use crate::port::PriceSource;

/// A price source that replays scripted results in order.
///
/// Once the script is exhausted it keeps returning the fallback snapshot
/// if one was set, or [`FetchError::Malformed`] otherwise.
pub struct ScriptedPriceSource {
    results: Mutex<VecDeque<Result<PriceSnapshot, FetchError>>>,
    fallback: Option<PriceSnapshot>,
    delay: Option<Duration>,
    calls: Arc<AtomicU32>,
}

impl ScriptedPriceSource {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            fallback: None,
            delay: None,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Return `snapshot` on every fetch.
    pub fn repeating(snapshot: PriceSnapshot) -> Self {
        Self {
            fallback: Some(snapshot),
            ..Self::new()
        }
    }

    pub fn then_ok(self, snapshot: PriceSnapshot) -> Self {
        self.results.lock().push_back(Ok(snapshot));
        self
    }

    pub fn then_err(self, error: FetchError) -> Self {
        self.results.lock().push_back(Err(error));
        self
    }

    /// Sleep before answering each fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared counter of fetch calls.
    pub fn calls(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.calls)
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for ScriptedPriceSource {
    async fn fetch_latest(&self) -> Result<PriceSnapshot, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.results.lock().pop_front();
        match next {
            Some(result) => result,
            None => self
                .fallback
                .clone()
                .ok_or_else(|| FetchError::Malformed("script exhausted".into())),
        }
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}
