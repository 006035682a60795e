use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::domain::errors::{CredentialsError, CredentialsResult};
use crate::domain::models::Credentials;

/// Default location of the credentials file.
pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials_config.json";

/// Provider name to raw entry. Entries are only decoded on lookup, so a
/// provider with an unusual shape never blocks access to the others.
type StoreContents = Map<String, Value>;

/// JSON file mapping provider names to credential records.
///
/// Every operation reads the whole file; `set_credentials` rewrites it.
/// There is no locking, so concurrent writers must be serialized by the
/// caller.
#[derive(Debug, Clone)]
pub struct CredentialsStore {
    path: PathBuf,
}

impl CredentialsStore {
    /// Create a handle for the store at `path` without touching the file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a handle and make sure the backing file exists.
    pub fn open(path: impl Into<PathBuf>) -> CredentialsResult<Self> {
        let store = Self::new(path);
        store.ensure_exists()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with an empty mapping if it is absent.
    ///
    /// Returns `true` if the file was created. An existing file is never
    /// replaced, even one created concurrently.
    pub fn ensure_exists(&self) -> CredentialsResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.create_empty()
    }

    fn create_empty(&self) -> CredentialsResult<bool> {
        match self.write(&StoreContents::new(), Persist::NoClobber) {
            Ok(()) => {
                info!(path = %self.path.display(), "created empty credentials store");
                Ok(true)
            }
            Err(CredentialsError::Io { ref source, .. })
                if source.kind() == io::ErrorKind::AlreadyExists =>
            {
                debug!(path = %self.path.display(), "credentials store created concurrently");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Credentials stored for `provider`.
    pub fn get_credentials(&self, provider: &str) -> CredentialsResult<Credentials> {
        let entry = self
            .load()?
            .remove(provider)
            .ok_or_else(|| CredentialsError::NotFound {
                provider: provider.to_string(),
            })?;
        let invalid = |reason: String| CredentialsError::InvalidRecord {
            provider: provider.to_string(),
            reason,
        };
        match entry {
            Value::Object(fields) => Credentials::from_json(fields).map_err(invalid),
            other => Err(invalid(format!("expected an object, found {other}"))),
        }
    }

    /// Insert or overwrite the credentials for `provider`.
    ///
    /// Other providers' entries are written back unchanged. The store must
    /// already exist; see [`ensure_exists`](Self::ensure_exists).
    pub fn set_credentials(&self, provider: &str, credentials: Credentials) -> CredentialsResult<()> {
        let mut contents = self.load()?;
        let entry = serde_json::to_value(&credentials).map_err(|e| CredentialsError::Io {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;
        let replaced = contents.insert(provider.to_string(), entry).is_some();
        self.write(&contents, Persist::Overwrite)?;
        info!(
            path = %self.path.display(),
            provider,
            replaced,
            "stored credentials"
        );
        Ok(())
    }

    /// Names of all providers in the store, sorted.
    pub fn providers(&self) -> CredentialsResult<Vec<String>> {
        let mut names: Vec<String> = self.load()?.into_iter().map(|(name, _)| name).collect();
        names.sort();
        Ok(names)
    }

    fn load(&self) -> CredentialsResult<StoreContents> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => CredentialsError::MissingStore {
                path: self.path.clone(),
            },
            _ => CredentialsError::Io {
                path: self.path.clone(),
                source,
            },
        })?;
        let contents: StoreContents =
            serde_json::from_str(&raw).map_err(|source| CredentialsError::CorruptStore {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), providers = contents.len(), "loaded credentials store");
        Ok(contents)
    }

    /// Write through a sibling temp file, then rename onto the store path.
    fn write(&self, contents: &StoreContents, mode: Persist) -> CredentialsResult<()> {
        let io_err = |source: io::Error| CredentialsError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let body = serde_json::to_string_pretty(contents)
            .map_err(|e| io_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(body.as_bytes()).map_err(io_err)?;
        tmp.write_all(b"\n").map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        match mode {
            Persist::Overwrite => tmp.persist(&self.path).map_err(|e| io_err(e.error))?,
            Persist::NoClobber => tmp.persist_noclobber(&self.path).map_err(|e| io_err(e.error))?,
        };
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Persist {
    Overwrite,
    NoClobber,
}

impl Default for CredentialsStore {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIALS_PATH)
    }
}
