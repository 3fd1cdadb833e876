//! The local catalog.

use crate::entry::{CatalogEntry, GameSummary};
use crate::error::{CoreError, CoreResult};
use crate::types::ExternalId;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to a catalog.
///
/// Created at session start and dropped at session end. Guards must not be
/// held across an `.await`.
pub type CatalogHandle = Arc<RwLock<Catalog>>;

/// An insertion-ordered collection of catalog entries keyed by external ID.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog wrapped in a shared handle.
    pub fn shared() -> CatalogHandle {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Adds a new entry for a search result.
    ///
    /// Returns `false` without changing anything if an entry with the same
    /// external ID already exists.
    pub fn insert(&mut self, summary: &GameSummary) -> bool {
        match self.try_insert(summary) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "ignoring add");
                false
            }
        }
    }

    /// Adds a new entry, failing on duplicates.
    pub fn try_insert(&mut self, summary: &GameSummary) -> CoreResult<()> {
        if self.contains(summary.id) {
            return Err(CoreError::DuplicateEntry(summary.id));
        }
        self.entries.push(CatalogEntry::new(summary));
        tracing::debug!(external_id = %summary.id, name = %summary.name, "entry added");
        Ok(())
    }

    /// Returns true if an entry with this external ID exists.
    pub fn contains(&self, id: ExternalId) -> bool {
        self.entries.iter().any(|e| e.external_id() == id)
    }

    /// Gets an entry.
    pub fn get(&self, id: ExternalId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.external_id() == id)
    }

    /// Gets an entry mutably.
    pub fn get_mut(&mut self, id: ExternalId) -> Option<&mut CatalogEntry> {
        self.entries.iter_mut().find(|e| e.external_id() == id)
    }

    /// Gets an entry mutably, failing if it is absent.
    pub fn require_mut(&mut self, id: ExternalId) -> CoreResult<&mut CatalogEntry> {
        self.get_mut(id).ok_or(CoreError::NotFound(id))
    }

    /// Removes an entry, returning it if it was present.
    pub fn remove(&mut self, id: ExternalId) -> Option<CatalogEntry> {
        let index = self.entries.iter().position(|e| e.external_id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
