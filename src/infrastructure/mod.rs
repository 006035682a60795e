//! Infrastructure layer module
//!
//! - Configuration management
//! - Logging infrastructure
//! - Credentials storage
//!
//! Search hub adapters live in `crate::adapters`.

pub mod config;
pub mod credentials;
pub mod logging;
