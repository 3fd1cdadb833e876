//! Catalog entries.

use crate::types::{ExternalId, Rating, RemoteId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A game as returned by the search provider.
///
/// Only the fields the catalog copies at add time are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Search provider identifier.
    pub id: ExternalId,
    /// Display name.
    pub name: String,
    /// Cover image URL, if the provider has one.
    #[serde(default)]
    pub background_image: Option<String>,
}

impl GameSummary {
    /// Creates a new game summary.
    pub fn new(id: u64, name: impl Into<String>, background_image: Option<String>) -> Self {
        Self {
            id: ExternalId::new(id),
            name: name.into(),
            background_image,
        }
    }
}

/// Remote synchronization state of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Never persisted.
    #[default]
    Local,
    /// A create or update request is in flight.
    Persisting,
    /// Last request succeeded; the entry has a remote ID.
    Synced,
}

impl SyncState {
    /// Returns true while a request for the entry is in flight.
    pub fn is_active(&self) -> bool {
        matches!(self, SyncState::Persisting)
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SyncState::Local => "local",
            SyncState::Persisting => "saving",
            SyncState::Synced => "synced",
        };
        f.write_str(label)
    }
}

/// The user-editable fields of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditDraft {
    /// Custom description.
    pub description: String,
    /// Rating.
    pub rating: Rating,
}

/// An edit the user made that has not been confirmed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedEdit {
    /// Staged values.
    pub draft: EditDraft,
    /// Edit revision this staged value belongs to.
    pub revision: u64,
}

/// A snapshot of the staged edit taken when a save starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket {
    /// Values being sent.
    pub draft: EditDraft,
    /// Revision of the staged edit that was snapshotted.
    pub revision: u64,
    /// Remote ID at the time the save started.
    pub remote_id: Option<RemoteId>,
}

/// A locally tracked game plus user annotations and sync status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    external_id: ExternalId,
    remote_id: Option<RemoteId>,
    name: String,
    image_url: Option<String>,
    description: String,
    rating: Rating,
    sync_state: SyncState,
    staged: Option<StagedEdit>,
    revision: u64,
    synced_revision: u64,
}

impl CatalogEntry {
    /// Creates a new, never-persisted entry from a search result.
    pub fn new(summary: &GameSummary) -> Self {
        Self {
            external_id: summary.id,
            remote_id: None,
            name: summary.name.clone(),
            image_url: summary.background_image.clone(),
            description: String::new(),
            rating: Rating::ZERO,
            sync_state: SyncState::Local,
            staged: None,
            revision: 0,
            synced_revision: 0,
        }
    }

    /// Returns the external ID.
    pub fn external_id(&self) -> ExternalId {
        self.external_id
    }

    /// Returns the remote ID, if the entry has been persisted.
    pub fn remote_id(&self) -> Option<RemoteId> {
        self.remote_id
    }

    /// Returns the game name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cover image URL.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the committed custom description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the committed rating.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the sync state.
    pub fn sync_state(&self) -> SyncState {
        self.sync_state
    }

    /// Returns the staged edit, if any.
    pub fn staged(&self) -> Option<&StagedEdit> {
        self.staged.as_ref()
    }

    /// Returns true if there are edits waiting for a successful save.
    pub fn has_pending_edits(&self) -> bool {
        self.staged.is_some()
    }

    /// Returns the revision of the last edit confirmed by the remote service.
    pub fn synced_revision(&self) -> u64 {
        self.synced_revision
    }

    /// Returns the values a save would send right now.
    pub fn draft(&self) -> EditDraft {
        match &self.staged {
            Some(staged) => staged.draft.clone(),
            None => EditDraft {
                description: self.description.clone(),
                rating: self.rating,
            },
        }
    }

    /// Overwrites the committed description and rating.
    ///
    /// Does not touch the sync state or the remote ID.
    pub fn apply_edit(&mut self, description: impl Into<String>, rating: Rating) {
        self.description = description.into();
        self.rating = rating;
    }

    /// Stages a full edit. Returns the new edit revision.
    pub fn stage_edit(&mut self, description: impl Into<String>, rating: Rating) -> u64 {
        self.revision += 1;
        self.staged = Some(StagedEdit {
            draft: EditDraft {
                description: description.into(),
                rating,
            },
            revision: self.revision,
        });
        self.revision
    }

    /// Stages a new description, keeping the staged or committed rating.
    pub fn stage_description(&mut self, description: impl Into<String>) -> u64 {
        let rating = self.draft().rating;
        self.stage_edit(description, rating)
    }

    /// Stages a new rating, keeping the staged or committed description.
    pub fn stage_rating(&mut self, rating: Rating) -> u64 {
        let description = self.draft().description;
        self.stage_edit(description, rating)
    }

    /// Discards the staged edit.
    pub fn discard_staged(&mut self) {
        self.staged = None;
    }

    /// Starts a save of the staged edit.
    ///
    /// Returns `None` when nothing newer than the last confirmed edit is
    /// staged. Otherwise the entry moves to `Persisting`.
    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        let staged = self.staged.as_ref()?;
        if staged.revision <= self.synced_revision {
            return None;
        }
        let ticket = SaveTicket {
            draft: staged.draft.clone(),
            revision: staged.revision,
            remote_id: self.remote_id,
        };
        self.sync_state = SyncState::Persisting;
        Some(ticket)
    }

    /// Commits a save confirmed by the remote service.
    ///
    /// `assigned` is the remote ID returned by a create; it is ignored if the
    /// entry already has one. The staged edit is cleared only if no newer
    /// edit was staged while the request was in flight.
    pub fn complete_save(&mut self, ticket: &SaveTicket, assigned: Option<RemoteId>) {
        if self.remote_id.is_none() {
            self.remote_id = assigned;
        }
        self.apply_edit(ticket.draft.description.clone(), ticket.draft.rating);
        self.synced_revision = self.synced_revision.max(ticket.revision);
        if self
            .staged
            .as_ref()
            .is_some_and(|staged| staged.revision <= ticket.revision)
        {
            self.staged = None;
        }
        self.sync_state = self.settled_state();
    }

    /// Returns the entry to its pre-save state after a failed request.
    ///
    /// Committed fields and the staged edit are left as they were.
    pub fn fail_save(&mut self) {
        self.sync_state = self.settled_state();
    }

    fn settled_state(&self) -> SyncState {
        if self.remote_id.is_some() {
            SyncState::Synced
        } else {
            SyncState::Local
        }
    }
}
