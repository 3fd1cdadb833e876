//! # GameDex Sync Protocol
//!
//! Payload types and endpoints of the remote catalog service.
//!
//! This crate provides:
//! - `GamePayload`, the one body shape used by create and update
//! - `CreatedGame`, the create response
//! - `Endpoint` for method and path construction
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod endpoint;
mod payload;

pub use endpoint::{Endpoint, Method};
pub use payload::{CreatedGame, GamePayload, PLACEHOLDER_IMAGE};
