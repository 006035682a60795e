//! Domain errors for the EarthPicture search client.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the local credentials store.
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Credentials file '{}' not found. Create it with `earthpicture credentials init`", .path.display())]
    MissingStore { path: PathBuf },

    #[error("Credentials file '{}' is not valid JSON: {source}", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Credentials for '{provider}' not found. Set them with `earthpicture credentials set`")]
    NotFound { provider: String },

    #[error("Credentials for '{provider}' are not a flat field mapping: {reason}")]
    InvalidRecord { provider: String, reason: String },

    #[error("I/O error on credentials file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CredentialsResult<T> = Result<T, CredentialsError>;

/// Errors raised by a [`SearchApi`](crate::domain::ports::SearchApi) implementation.
#[derive(Debug, Error)]
pub enum SearchApiError {
    #[error("Search hub rejected the credentials (401 Unauthorized)")]
    Unauthorized,

    #[error("Search hub returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Search response could not be parsed: {0}")]
    Parse(String),

    #[error("Search client could not be built: {0}")]
    Client(String),
}

/// Errors raised by the data search connector.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid area: {0}")]
    InvalidArea(String),

    #[error("Invalid max cloud cover: {0} (must be 0-100)")]
    InvalidCloudCover(u8),

    #[error("Product '{key}' is missing required field '{field}'")]
    MalformedResult { key: String, field: &'static str },

    #[error("GeoJSON error in '{}': {reason}", .path.display())]
    GeoJson { path: PathBuf, reason: String },

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    Api(#[from] SearchApiError),
}

pub type SearchResult<T> = Result<T, SearchError>;
