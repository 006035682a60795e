//! Search filters, raw query results and shaped product records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::footprint::{AreaOfInterest, Footprint};
use crate::domain::errors::{SearchError, SearchResult};

/// Inclusive acquisition date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Inclusive cloud cover percentage range, always starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudCoverRange {
    pub min: u8,
    pub max: u8,
}

impl CloudCoverRange {
    /// `[0, max]`; `max` must not exceed 100.
    pub fn up_to(max: u8) -> SearchResult<Self> {
        if max > 100 {
            return Err(SearchError::InvalidCloudCover(max));
        }
        Ok(Self { min: 0, max })
    }
}

/// Caller-facing search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    /// Platform name, e.g. `Sentinel-2`.
    pub mission: String,
    pub dates: DateRange,
    pub area: AreaOfInterest,
    /// Omit for missions without cloud cover metadata (radar).
    pub max_cloud_cover: Option<u8>,
}

impl SearchFilter {
    pub fn new(mission: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            mission: mission.into(),
            dates: DateRange::new(start, end),
            area: AreaOfInterest::default(),
            max_cloud_cover: None,
        }
    }

    #[must_use]
    pub fn with_area(mut self, area: AreaOfInterest) -> Self {
        self.area = area;
        self
    }

    #[must_use]
    pub const fn with_max_cloud_cover(mut self, max: u8) -> Self {
        self.max_cloud_cover = Some(max);
        self
    }
}

/// Structured query handed to a [`SearchApi`](crate::domain::ports::SearchApi).
///
/// Every `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub platform_name: Option<String>,
    pub dates: Option<DateRange>,
    pub footprint: Option<Footprint>,
    pub cloud_cover: Option<CloudCoverRange>,
}

/// A product as returned by the search API: an opaque key plus attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProduct {
    pub key: String,
    pub attributes: Map<String, Value>,
}

impl RawProduct {
    pub fn new(key: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self {
            key: key.into(),
            attributes,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field).filter(|v| !v.is_null())
    }

    /// Platform name, if the hub reported one as a string.
    pub fn platform_name(&self) -> Option<&str> {
        self.get("platformname").and_then(Value::as_str)
    }

    fn required(&self, field: &'static str) -> SearchResult<String> {
        self.get(field)
            .map(value_to_text)
            .ok_or_else(|| SearchError::MalformedResult {
                key: self.key.clone(),
                field,
            })
    }
}

/// Cloud cover of a product as reported by the hub, or `N/A` when absent.
///
/// Reported values are kept verbatim, so an integer stays an integer and
/// non-numeric text is passed through.
#[derive(Debug, Clone, PartialEq)]
pub enum CloudCover {
    Reported(Value),
    NotAvailable,
}

impl CloudCover {
    pub const SENTINEL: &'static str = "N/A";

    fn from_value(value: Option<&Value>) -> Self {
        value.map_or(Self::NotAvailable, |v| Self::Reported(v.clone()))
    }

    /// The reported value as a number, if it is one.
    pub fn percentage(&self) -> Option<f64> {
        match self {
            Self::Reported(Value::Number(n)) => n.as_f64(),
            Self::Reported(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for CloudCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reported(value) => f.write_str(&value_to_text(value)),
            Self::NotAvailable => f.write_str(Self::SENTINEL),
        }
    }
}

impl Serialize for CloudCover {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Reported(value) => value.serialize(serializer),
            Self::NotAvailable => serializer.serialize_str(Self::SENTINEL),
        }
    }
}

/// Shaped search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub title: String,
    pub beginposition: String,
    pub endposition: String,
    pub cloudcoverpercentage: CloudCover,
    pub size: String,
    pub uuid: String,
}

impl TryFrom<&RawProduct> for ProductRecord {
    type Error = SearchError;

    fn try_from(raw: &RawProduct) -> SearchResult<Self> {
        Ok(Self {
            title: raw.required("title")?,
            beginposition: raw.required("beginposition")?,
            endposition: raw.required("endposition")?,
            cloudcoverpercentage: CloudCover::from_value(raw.get("cloudcoverpercentage")),
            size: raw.required("size")?,
            uuid: raw.required("uuid")?,
        })
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
