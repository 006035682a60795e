//! Footprint derivation.
//!
//! A footprint is the WKT geometry used to spatially filter a search. It
//! comes either from a GeoJSON file or from a raw coordinate list; the
//! file wins when both are supplied.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use geo::{Coord, Geometry, GeometryCollection, LineString, MapCoords, Polygon};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use wkt::ToWkt;

use crate::domain::errors::{SearchError, SearchResult};

/// Decimal places kept when converting GeoJSON input.
const GEOJSON_DECIMALS: i32 = 4;

/// A longitude/latitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(c: Coordinate) -> Self {
        Coord { x: c.lon, y: c.lat }
    }
}

impl FromStr for Coordinate {
    type Err = String;

    /// Parse `"lon,lat"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lon, lat) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LON,LAT but got '{s}'"))?;
        let lon = lon
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude '{lon}': {e}"))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
        Ok(Self { lon, lat })
    }
}

/// A spatial filter geometry together with its WKT rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    geometry: Geometry<f64>,
    wkt: String,
}

impl Footprint {
    pub fn from_geometry(geometry: Geometry<f64>) -> Self {
        let wkt = geometry.wkt_string();
        Self { geometry, wkt }
    }

    /// Axis-aligned rectangle from `(lon_min, lat_min)` and `(lon_max, lat_max)`.
    ///
    /// Corners are visited (lon_min,lat_min) → (lon_min,lat_max) →
    /// (lon_max,lat_max) → (lon_max,lat_min) and the ring is closed.
    pub fn bounding_box(min: Coordinate, max: Coordinate) -> Self {
        let ring = vec![
            Coord { x: min.lon, y: min.lat },
            Coord { x: min.lon, y: max.lat },
            Coord { x: max.lon, y: max.lat },
            Coord { x: max.lon, y: min.lat },
        ];
        Self::from_geometry(Geometry::Polygon(Polygon::new(LineString::new(ring), vec![])))
    }

    /// Polygon whose ring visits `points` in the given order.
    pub fn polygon(points: &[Coordinate]) -> Self {
        let ring: Vec<Coord<f64>> = points.iter().copied().map(Coord::from).collect();
        Self::from_geometry(Geometry::Polygon(Polygon::new(LineString::new(ring), vec![])))
    }

    /// Two points make a bounding box, three or more a polygon.
    pub fn from_coords(points: &[Coordinate]) -> SearchResult<Self> {
        match points {
            [min, max] => Ok(Self::bounding_box(*min, *max)),
            [_, _, _, ..] => Ok(Self::polygon(points)),
            _ => Err(SearchError::InvalidArea(format!(
                "got {} coordinate(s); area must be a 2-point bounding box or ≥3-point polygon",
                points.len()
            ))),
        }
    }

    /// Read a GeoJSON file and convert its geometry.
    pub fn from_geojson_file(path: &Path) -> SearchResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| SearchError::GeoJson {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_geojson_str(&contents).map_err(|reason| SearchError::GeoJson {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Convert a GeoJSON document.
    ///
    /// A `FeatureCollection` with several features becomes a
    /// `GeometryCollection`. Z values are dropped and coordinates are
    /// rounded to four decimals.
    pub fn from_geojson_str(contents: &str) -> Result<Self, String> {
        let geojson = contents.parse::<GeoJson>().map_err(|e| e.to_string())?;

        let mut geometries: Vec<geojson::Geometry> = match geojson {
            GeoJson::Geometry(geometry) => vec![geometry],
            GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .filter_map(|feature| feature.geometry)
                .collect(),
        };

        let geometry = match geometries.len() {
            0 => return Err("document contains no geometry".to_string()),
            1 => to_geo(geometries.remove(0))?,
            _ => Geometry::GeometryCollection(GeometryCollection::from(
                geometries
                    .into_iter()
                    .map(to_geo)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
        };

        Ok(Self::from_geometry(geometry.map_coords(|Coord { x, y }| Coord {
            x: round_decimals(x),
            y: round_decimals(y),
        })))
    }

    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    pub fn as_wkt(&self) -> &str {
        &self.wkt
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wkt)
    }
}

fn to_geo(geometry: geojson::Geometry) -> Result<Geometry<f64>, String> {
    Geometry::<f64>::try_from(geometry).map_err(|e| e.to_string())
}

fn round_decimals(value: f64) -> f64 {
    let factor = 10_f64.powi(GEOJSON_DECIMALS);
    (value * factor).round() / factor
}

/// Spatial inputs of a search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaOfInterest {
    /// Path to a GeoJSON file; takes precedence over `coords`.
    pub geojson: Option<PathBuf>,
    /// Bounding box (2 points) or polygon ring (3+ points).
    pub coords: Option<Vec<Coordinate>>,
}

impl AreaOfInterest {
    pub fn geojson(path: impl Into<PathBuf>) -> Self {
        Self {
            geojson: Some(path.into()),
            coords: None,
        }
    }

    pub fn coords(points: impl IntoIterator<Item = impl Into<Coordinate>>) -> Self {
        Self {
            geojson: None,
            coords: Some(points.into_iter().map(Into::into).collect()),
        }
    }

    /// Derive the footprint, or `None` for a global search.
    pub fn footprint(&self) -> SearchResult<Option<Footprint>> {
        if let Some(path) = &self.geojson {
            return Footprint::from_geojson_file(path).map(Some);
        }
        match &self.coords {
            Some(points) => Footprint::from_coords(points).map(Some),
            None => Ok(None),
        }
    }
}
