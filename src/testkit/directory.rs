//! [`SubscriberDirectory`] doubles that count or fail calls.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::adapter::outbound::directory::InMemoryDirectory;
use crate::domain::{DeliveryAddress, Subscriber, SubscriberId};
use crate::error::DirectoryError;
use crate::port::SubscriberDirectory;

/// In-memory directory that counts `list_subscribers` calls.
pub struct CountingDirectory {
    inner: InMemoryDirectory,
    list_calls: Arc<AtomicU32>,
}

impl CountingDirectory {
    pub fn new(subscribers: Vec<Subscriber>) -> Self {
        Self {
            inner: InMemoryDirectory::with_subscribers(subscribers),
            list_calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Shared counter of list calls.
    pub fn list_calls(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.list_calls)
    }

    /// The wrapped directory, for mutating between cycles.
    pub fn inner(&self) -> &InMemoryDirectory {
        &self.inner
    }
}

#[async_trait]
impl SubscriberDirectory for CountingDirectory {
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, DirectoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_subscribers().await
    }

    async fn upsert_subscriber(
        &self,
        id: &SubscriberId,
        address: &DeliveryAddress,
    ) -> Result<(), DirectoryError> {
        self.inner.upsert_subscriber(id, address).await
    }
}

/// A directory whose every call fails with a connection error.
#[derive(Default)]
pub struct FailingDirectory {
    calls: AtomicU32,
}

impl FailingDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubscriberDirectory for FailingDirectory {
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DirectoryError::Connection("directory unavailable".into()))
    }

    async fn upsert_subscriber(
        &self,
        _id: &SubscriberId,
        _address: &DeliveryAddress,
    ) -> Result<(), DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DirectoryError::Connection("directory unavailable".into()))
    }
}
