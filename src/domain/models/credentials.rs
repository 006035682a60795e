use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider name under which hub credentials are stored.
pub const COPERNICUS_PROVIDER: &str = "Copernicus";

/// Credential fields for a single provider (e.g. `username` / `password`).
///
/// The store treats the fields as opaque; only the connector looks at
/// specific keys. `Debug` prints field names only.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a username/password record.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        let mut creds = Self::new();
        creds.insert("username", username);
        creds.insert("password", password);
        creds
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn username(&self) -> Option<&str> {
        self.get("username")
    }

    pub fn password(&self) -> Option<&str> {
        self.get("password")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode one provider entry from the store file.
    ///
    /// Numbers and booleans are kept as their JSON text and nulls are
    /// dropped. Nested arrays or objects are rejected with the field name.
    pub fn from_json(entry: Map<String, Value>) -> Result<Self, String> {
        let mut creds = Self::new();
        for (field, value) in entry {
            match value {
                Value::String(s) => creds.insert(field, s),
                Value::Number(n) => creds.insert(field, n.to_string()),
                Value::Bool(b) => creds.insert(field, b.to_string()),
                Value::Null => {}
                Value::Array(_) | Value::Object(_) => {
                    return Err(format!("field '{field}' is not a scalar value"));
                }
            }
        }
        Ok(creds)
    }
}

impl From<BTreeMap<String, String>> for Credentials {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for key in self.0.keys() {
            map.entry(key, &"[REDACTED]");
        }
        map.finish()
    }
}
