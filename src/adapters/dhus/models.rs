//! DHuS OpenSearch response models.
//!
//! The hub's JSON feed is loosely shaped: `entry` is an array, a single
//! object, or missing, and typed attribute lists (`str`, `int`, `double`,
//! `date`, ...) hold `{name, content}` objects or a single such object.
//! These types absorb that variance and flatten each entry into a
//! [`RawProduct`].

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::domain::errors::SearchApiError;
use crate::domain::models::RawProduct;

/// Top-level search response.
#[derive(Debug, Clone, Deserialize)]
pub struct DhusSearchResponse {
    pub feed: DhusFeed,
}

/// The OpenSearch feed.
#[derive(Debug, Clone, Deserialize)]
pub struct DhusFeed {
    /// Reported as a string by the hub, tolerated as a number.
    #[serde(rename = "opensearch:totalResults", default)]
    pub total_results: Option<Value>,
    #[serde(default)]
    pub entry: Option<OneOrMany>,
}

/// A JSON value the hub collapses to a bare object when there is only one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    Many(Vec<Map<String, Value>>),
    One(Map<String, Value>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<Map<String, Value>> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Top-level entry fields copied verbatim.
const PLAIN_FIELDS: &[&str] = &["title", "id", "summary"];

impl DhusFeed {
    /// Total number of matches reported by the hub, if parsable.
    pub fn total(&self) -> Option<usize> {
        match self.total_results.as_ref()? {
            Value::String(s) => s.trim().parse().ok(),
            Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            _ => None,
        }
    }

    /// Flatten every entry of this page, preserving hub order.
    pub fn into_products(self) -> Result<Vec<RawProduct>, SearchApiError> {
        self.entry
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(flatten_entry)
            .collect()
    }
}

/// Turn one feed entry into a product keyed by its `id`.
pub fn flatten_entry(entry: Map<String, Value>) -> Result<RawProduct, SearchApiError> {
    let key = entry
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| SearchApiError::Parse("feed entry without an id".to_string()))?
        .to_string();

    let mut attributes = Map::new();
    for (kind, value) in entry {
        if PLAIN_FIELDS.contains(&kind.as_str()) {
            attributes.insert(kind, value);
            continue;
        }
        let items = match value {
            Value::Array(items) => items,
            Value::Object(item) => vec![Value::Object(item)],
            _ => continue,
        };
        for item in items {
            let (Some(name), Some(content)) = (
                item.get("name").and_then(Value::as_str),
                item.get("content"),
            ) else {
                continue;
            };
            attributes.insert(name.to_string(), convert(&kind, content));
        }
    }

    Ok(RawProduct::new(key, attributes))
}

fn convert(kind: &str, content: &Value) -> Value {
    let Value::String(text) = content else {
        return content.clone();
    };
    let converted = match kind {
        "int" | "long" => text.trim().parse::<i64>().ok().map(Value::from),
        "double" | "float" => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        "bool" => text.trim().parse::<bool>().ok().map(Value::Bool),
        _ => None,
    };
    converted.unwrap_or_else(|| content.clone())
}
