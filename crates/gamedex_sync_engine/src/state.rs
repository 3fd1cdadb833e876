//! Catalog synchronization state machine.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::transport::CatalogTransport;
use gamedex_core::{
    CatalogEntry, CatalogHandle, ExternalId, GameSummary, Rating, RemoteId, SaveTicket,
};
use gamedex_sync_protocol::GamePayload;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex as FlightLock;

/// Result of a save intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The entry was persisted for the first time.
    Created(RemoteId),
    /// The persisted entry was updated.
    Updated,
    /// Nothing newer than the last confirmed edit was staged.
    Unchanged,
}

/// Result of a delete intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The remote entry was deleted, then the local one.
    Remote(RemoteId),
    /// The entry was never persisted and was removed locally only.
    LocalOnly,
}

/// Statistics about remote calls.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Successful create calls.
    pub creates: u64,
    /// Successful update calls.
    pub updates: u64,
    /// Successful delete calls.
    pub deletes: u64,
    /// Failed remote calls.
    pub failures: u64,
    /// Time of the last successful remote call.
    pub last_sync_time: Option<Instant>,
    /// Last error message.
    pub last_error: Option<String>,
}

/// The sync engine reconciles local catalog edits with the remote catalog
/// service.
///
/// Requests are serialized per entry: at most one create, update or delete
/// for a given external ID is in flight at a time, and each save sends the
/// latest staged edit when it runs. Later saves therefore never lose to
/// earlier ones.
pub struct SyncEngine<T: CatalogTransport> {
    config: SyncConfig,
    transport: Arc<T>,
    catalog: CatalogHandle,
    flights: Mutex<HashMap<ExternalId, Arc<FlightLock<()>>>>,
    stats: RwLock<SyncStats>,
}

impl<T: CatalogTransport> SyncEngine<T> {
    /// Creates a new sync engine over a catalog.
    pub fn new(config: SyncConfig, transport: T, catalog: CatalogHandle) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            catalog,
            flights: Mutex::new(HashMap::new()),
            stats: RwLock::new(SyncStats::default()),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the shared catalog handle.
    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    /// Gets the current stats.
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// Returns a copy of an entry.
    pub fn entry(&self, id: ExternalId) -> Option<CatalogEntry> {
        self.catalog.read().get(id).cloned()
    }

    /// Returns a copy of all entries in catalog order.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.catalog.read().iter().cloned().collect()
    }

    /// Adds a search result to the catalog.
    ///
    /// Returns `false` if the game is already present.
    pub fn add(&self, summary: &GameSummary) -> bool {
        self.catalog.write().insert(summary)
    }

    /// Stages a description edit.
    pub fn stage_description(
        &self,
        id: ExternalId,
        description: impl Into<String>,
    ) -> SyncResult<()> {
        self.catalog
            .write()
            .require_mut(id)?
            .stage_description(description);
        Ok(())
    }

    /// Stages a rating edit.
    pub fn stage_rating(&self, id: ExternalId, rating: Rating) -> SyncResult<()> {
        self.catalog.write().require_mut(id)?.stage_rating(rating);
        Ok(())
    }

    /// Stages a description and rating edit.
    pub fn stage_edit(
        &self,
        id: ExternalId,
        description: impl Into<String>,
        rating: Rating,
    ) -> SyncResult<()> {
        self.catalog
            .write()
            .require_mut(id)?
            .stage_edit(description, rating);
        Ok(())
    }

    /// Saves the staged edit of an entry.
    ///
    /// Issues a create if the entry has no remote ID, an update otherwise.
    /// On failure the committed fields are left untouched and the staged edit
    /// is kept so the save can be retried.
    pub async fn save(&self, id: ExternalId) -> SyncResult<SaveOutcome> {
        let flight = self.flight(id);
        let guard = flight.lock().await;
        let result = self.save_locked(id).await;
        drop(guard);
        self.release_flight(id, &flight);
        result
    }

    async fn save_locked(&self, id: ExternalId) -> SyncResult<SaveOutcome> {
        let (ticket, payload) = {
            let mut catalog = self.catalog.write();
            let entry = catalog.require_mut(id)?;
            let Some(ticket) = entry.begin_save() else {
                tracing::debug!(external_id = %id, "no staged edit, skipping save");
                return Ok(SaveOutcome::Unchanged);
            };
            let payload =
                GamePayload::from_entry(entry, &ticket.draft, &self.config.placeholder_image);
            (ticket, payload)
        };

        tracing::debug!(
            external_id = %id,
            remote_id = ?ticket.remote_id,
            revision = ticket.revision,
            "saving entry"
        );

        let result = match ticket.remote_id {
            None => self
                .transport
                .create(&payload)
                .await
                .map(|created| SaveOutcome::Created(created.id)),
            Some(remote_id) => self
                .transport
                .update(remote_id, &payload)
                .await
                .map(|()| SaveOutcome::Updated),
        };

        self.settle_save(id, &ticket, result)
    }

    /// Deletes an entry.
    ///
    /// Waits for any in-flight request on the entry. If the entry was
    /// persisted, it is removed locally only after the remote delete
    /// succeeds.
    pub async fn delete(&self, id: ExternalId) -> SyncResult<DeleteOutcome> {
        let flight = self.flight(id);
        let guard = flight.lock().await;
        let result = self.delete_locked(id).await;
        drop(guard);
        self.release_flight(id, &flight);
        result
    }

    async fn delete_locked(&self, id: ExternalId) -> SyncResult<DeleteOutcome> {
        let remote_id = self
            .catalog
            .read()
            .get(id)
            .ok_or(SyncError::NotFound(id))?
            .remote_id();

        let outcome = match remote_id {
            Some(remote_id) => {
                if let Err(err) = self.transport.delete(remote_id).await {
                    self.record_failure(id, &err);
                    return Err(err);
                }
                {
                    let mut stats = self.stats.write();
                    stats.deletes += 1;
                    stats.last_sync_time = Some(Instant::now());
                    stats.last_error = None;
                }
                tracing::info!(external_id = %id, %remote_id, "entry deleted remotely");
                DeleteOutcome::Remote(remote_id)
            }
            None => DeleteOutcome::LocalOnly,
        };

        self.catalog.write().remove(id);
        tracing::debug!(external_id = %id, "entry removed");
        Ok(outcome)
    }

    /// Discards the staged edit of an entry without contacting the service.
    ///
    /// Waits for any in-flight save so the discarded edit cannot be sent
    /// afterwards.
    pub async fn discard(&self, id: ExternalId) -> SyncResult<()> {
        let flight = self.flight(id);
        let guard = flight.lock().await;
        let result = match self.catalog.write().require_mut(id) {
            Ok(entry) => {
                entry.discard_staged();
                Ok(())
            }
            Err(err) => Err(SyncError::from(err)),
        };
        drop(guard);
        self.release_flight(id, &flight);
        if result.is_ok() {
            tracing::debug!(external_id = %id, "staged edit discarded");
        }
        result
    }

    fn settle_save(
        &self,
        id: ExternalId,
        ticket: &SaveTicket,
        result: SyncResult<SaveOutcome>,
    ) -> SyncResult<SaveOutcome> {
        let mut catalog = self.catalog.write();
        let entry = catalog.get_mut(id);

        match result {
            Ok(outcome) => {
                let assigned = match outcome {
                    SaveOutcome::Created(remote_id) => Some(remote_id),
                    _ => None,
                };
                if let Some(entry) = entry {
                    entry.complete_save(ticket, assigned);
                }
                drop(catalog);

                let mut stats = self.stats.write();
                match outcome {
                    SaveOutcome::Created(remote_id) => {
                        stats.creates += 1;
                        tracing::info!(external_id = %id, %remote_id, "entry created");
                    }
                    _ => {
                        stats.updates += 1;
                        tracing::info!(external_id = %id, "entry updated");
                    }
                }
                stats.last_sync_time = Some(Instant::now());
                stats.last_error = None;
                Ok(outcome)
            }
            Err(err) => {
                if let Some(entry) = entry {
                    entry.fail_save();
                }
                drop(catalog);
                self.record_failure(id, &err);
                Err(err)
            }
        }
    }

    fn record_failure(&self, id: ExternalId, err: &SyncError) {
        tracing::warn!(external_id = %id, error = %err, "remote call failed");
        let mut stats = self.stats.write();
        stats.failures += 1;
        stats.last_error = Some(err.to_string());
    }

    fn flight(&self, id: ExternalId) -> Arc<FlightLock<()>> {
        Arc::clone(self.flights.lock().entry(id).or_default())
    }

    fn release_flight(&self, id: ExternalId, flight: &Arc<FlightLock<()>>) {
        let mut flights = self.flights.lock();
        // One reference in the map, one held by the caller
        if Arc::strong_count(flight) <= 2 {
            flights.remove(&id);
        }
    }
}
