//! # GameDex Sync Engine
//!
//! Catalog synchronization state machine for GameDex.
//!
//! This crate provides:
//! - Sync state machine (local → saving → synced)
//! - Per-entry single-flight request serialization
//! - Transport abstraction with HTTP and mock implementations
//! - Sync statistics
//!
//! ## Architecture
//!
//! Edits are staged on the entry and only committed once the remote catalog
//! service confirms them:
//! 1. A save on an entry without a remote ID issues a create
//! 2. A save on a persisted entry issues an update addressed by remote ID
//! 3. A delete removes the remote entry first, then the local one
//!
//! ## Key Invariants
//!
//! - A remote ID, once assigned, is never cleared
//! - A failed call never changes committed fields
//! - At most one request per entry is in flight
//! - A newer edit is never overwritten by an older one

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod state;
mod transport;

pub use config::{SyncConfig, DEFAULT_SERVER_URL};
pub use error::{SyncError, SyncResult};
pub use http::HttpTransport;
pub use state::{DeleteOutcome, SaveOutcome, SyncEngine, SyncStats};
pub use transport::{CatalogTransport, MockTransport, TransportCall};
