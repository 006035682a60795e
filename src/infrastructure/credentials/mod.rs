//! Credentials management infrastructure
//!
//! File-backed store mapping provider names to credential records.

pub mod store;

pub use store::{CredentialsStore, DEFAULT_CREDENTIALS_PATH};
