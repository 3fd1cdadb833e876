//! CLI command implementations.

pub mod intent;
pub mod render;
pub mod search;
pub mod session;
