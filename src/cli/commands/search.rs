//! Search CLI command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{list_table, output, render_list, spinner, truncate, CommandOutput};
use crate::domain::models::{AreaOfInterest, Coordinate, HubConfig, ProductRecord, SearchFilter};
use crate::infrastructure::credentials::CredentialsStore;
use crate::services::DataSearchConnector;

const TITLE_WIDTH: usize = 48;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Mission (platform) name, e.g. Sentinel-2
    #[arg(short, long)]
    pub mission: String,

    /// First acquisition day (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last acquisition day (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// GeoJSON file with the area of interest
    #[arg(long, conflicts_with = "coords")]
    pub geojson: Option<PathBuf>,

    /// Area corner or vertex as LON,LAT (two for a box, three or more for a polygon)
    #[arg(long = "coords", value_name = "LON,LAT", allow_hyphen_values = true)]
    pub coords: Vec<Coordinate>,

    /// Maximum cloud cover percentage
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub max_cloud_cover: Option<u8>,
}

impl SearchArgs {
    pub fn to_filter(&self) -> SearchFilter {
        let mut filter = SearchFilter::new(self.mission.clone(), self.start, self.end);
        if let Some(ref path) = self.geojson {
            filter = filter.with_area(AreaOfInterest::geojson(path));
        } else if !self.coords.is_empty() {
            filter = filter.with_area(AreaOfInterest::coords(self.coords.iter().copied()));
        }
        if let Some(max) = self.max_cloud_cover {
            filter = filter.with_max_cloud_cover(max);
        }
        filter
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListOutput {
    pub products: Vec<ProductRecord>,
    pub total: usize,
}

impl CommandOutput for ProductListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["title", "begin", "end", "cloud %", "size", "uuid"]);
        for p in &self.products {
            table.add_row(vec![
                truncate(&p.title, TITLE_WIDTH),
                p.beginposition.clone(),
                p.endposition.clone(),
                p.cloudcoverpercentage.to_string(),
                p.size.clone(),
                p.uuid.clone(),
            ]);
        }
        render_list("product", &table, self.total)
    }
}

pub async fn execute(
    args: SearchArgs,
    store: &CredentialsStore,
    hub: &HubConfig,
    json_mode: bool,
) -> Result<()> {
    let filter = args.to_filter();
    let connector = DataSearchConnector::new(store, hub)?;

    let progress = spinner(format!("Searching {} products...", filter.mission), json_mode);
    let result = connector.search_data(&filter).await;
    progress.finish_and_clear();

    let products =
        result.with_context(|| format!("Search for '{}' products failed", filter.mission))?;
    let total = products.len();
    output(&ProductListOutput { products, total }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CloudCover;

    fn args(coords: Vec<Coordinate>) -> SearchArgs {
        SearchArgs {
            mission: "Sentinel-2".to_string(),
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
            geojson: None,
            coords,
            max_cloud_cover: Some(20),
        }
    }

    #[test]
    fn test_to_filter_with_coords() {
        let filter = args(vec![Coordinate::new(-5.0, 40.0), Coordinate::new(-4.0, 41.0)]).to_filter();
        assert_eq!(filter.mission, "Sentinel-2");
        assert_eq!(filter.max_cloud_cover, Some(20));
        assert_eq!(filter.area.coords.as_ref().map(Vec::len), Some(2));
        assert!(filter.area.geojson.is_none());
    }

    #[test]
    fn test_to_filter_without_area() {
        let filter = args(Vec::new()).to_filter();
        assert!(filter.area.coords.is_none());
        assert!(filter.area.geojson.is_none());
    }

    #[test]
    fn test_product_list_renders_sentinel() {
        let out = ProductListOutput {
            products: vec![ProductRecord {
                title: "S1A_IW_GRDH".to_string(),
                beginposition: "2023-01-01T10:00:00.000Z".to_string(),
                endposition: "2023-01-01T10:00:25.000Z".to_string(),
                cloudcoverpercentage: CloudCover::NotAvailable,
                size: "1.6 GB".to_string(),
                uuid: "abc".to_string(),
            }],
            total: 1,
        };
        assert!(out.to_human().contains("N/A"));
        assert_eq!(out.to_json()["products"][0]["cloudcoverpercentage"], "N/A");
    }
}
