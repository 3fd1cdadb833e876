//! # GameDex Search
//!
//! Game search for GameDex.
//!
//! This crate provides:
//! - `SearchProvider`, the search abstraction
//! - `RawgClient`, a provider backed by the RAWG games API
//! - `SearchSession`, a query plus a page counter
//! - `Debouncer`, cancel-and-replace scheduling of the latest query
//!
//! Search results are plain [`gamedex_core::GameSummary`] values that can be
//! added to a catalog directly.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod debounce;
mod error;
mod provider;
mod rawg;
mod session;

pub use config::{SearchConfig, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_URL};
pub use debounce::Debouncer;
pub use error::{SearchError, SearchResult};
pub use provider::{SearchPage, SearchProvider, SearchQuery};
pub use rawg::RawgClient;
pub use session::SearchSession;
