//! # GameDex Core
//!
//! Catalog entry model for GameDex.
//!
//! This crate provides:
//! - Identifier newtypes (`ExternalId`, `RemoteId`)
//! - `Rating` with the five-star (doubled) scale
//! - `CatalogEntry` with staged edits and sync state
//! - `Catalog`, the explicitly owned collection of entries
//!
//! ## Key Invariants
//!
//! - `ExternalId` is unique within a catalog
//! - A `RemoteId`, once assigned, is never cleared
//! - A `Rating` is always one of `0, 2, 4, 6, 8, 10`
//!
//! This crate performs no I/O.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod entry;
mod error;
mod types;

pub use catalog::{Catalog, CatalogHandle};
pub use entry::{CatalogEntry, EditDraft, GameSummary, SaveTicket, StagedEdit, SyncState};
pub use error::{CoreError, CoreResult};
pub use types::{ExternalId, Rating, RemoteId};
