//! CLI command implementations.

pub mod credentials;
pub mod missions;
pub mod search;
