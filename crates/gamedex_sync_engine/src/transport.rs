//! Transport layer abstraction for the remote catalog service.

use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use gamedex_core::RemoteId;
use gamedex_sync_protocol::{CreatedGame, Endpoint, GamePayload};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// A catalog transport carries create, update and delete requests to the
/// remote catalog service.
///
/// This trait abstracts the network layer, allowing for different
/// implementations (HTTP, in-memory, mock for testing).
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Persists a new entry and returns the assigned remote ID.
    async fn create(&self, payload: &GamePayload) -> SyncResult<CreatedGame>;

    /// Updates a persisted entry.
    async fn update(&self, id: RemoteId, payload: &GamePayload) -> SyncResult<()>;

    /// Deletes a persisted entry.
    async fn delete(&self, id: RemoteId) -> SyncResult<()>;
}

/// A request observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    /// Create request.
    Create(GamePayload),
    /// Update request.
    Update(RemoteId, GamePayload),
    /// Delete request.
    Delete(RemoteId),
}

impl TransportCall {
    /// Returns the endpoint the call was addressed to.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            TransportCall::Create(_) => Endpoint::Create,
            TransportCall::Update(id, _) => Endpoint::Update(*id),
            TransportCall::Delete(id) => Endpoint::Delete(*id),
        }
    }
}

/// A mock transport for testing.
///
/// Records every call, assigns sequential remote IDs on create and can be
/// scripted to fail or to take time.
#[derive(Debug)]
pub struct MockTransport {
    calls: Mutex<Vec<TransportCall>>,
    failures: Mutex<VecDeque<bool>>,
    failing: AtomicBool,
    next_id: AtomicU64,
    latency: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    /// Creates a new mock transport that assigns remote IDs starting at 1.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            failing: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            latency: Mutex::new(None),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Sets the next remote ID a create will return.
    pub fn set_next_id(&self, id: u64) {
        self.next_id.store(id, Ordering::SeqCst);
    }

    /// Makes every call fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Makes only the next call fail.
    pub fn fail_next(&self) {
        self.failures.lock().push_back(true);
    }

    /// Delays every call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = Some(latency);
    }

    /// Returns all recorded calls in the order they were issued.
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    /// Returns the highest number of calls that were in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn exchange(&self, call: TransportCall) -> SyncResult<()> {
        let endpoint = call.endpoint();
        self.calls.lock().push(call);

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let scripted = self.failures.lock().pop_front().unwrap_or(false);
        if scripted || self.failing.load(Ordering::SeqCst) {
            return Err(SyncError::transport_retryable(format!(
                "mock failure on {endpoint}"
            )));
        }
        Ok(())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogTransport for MockTransport {
    async fn create(&self, payload: &GamePayload) -> SyncResult<CreatedGame> {
        self.exchange(TransportCall::Create(payload.clone())).await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(CreatedGame::new(id))
    }

    async fn update(&self, id: RemoteId, payload: &GamePayload) -> SyncResult<()> {
        self.exchange(TransportCall::Update(id, payload.clone()))
            .await
    }

    async fn delete(&self, id: RemoteId) -> SyncResult<()> {
        self.exchange(TransportCall::Delete(id)).await
    }
}
