//! Missions CLI command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{list_table, output, render_list, spinner, CommandOutput};
use crate::domain::models::HubConfig;
use crate::infrastructure::credentials::CredentialsStore;
use crate::services::DataSearchConnector;

#[derive(Debug, Serialize)]
pub struct MissionListOutput {
    pub missions: Vec<String>,
    pub total: usize,
}

impl CommandOutput for MissionListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["mission"]);
        for mission in &self.missions {
            table.add_row(vec![mission.as_str()]);
        }
        render_list("mission", &table, self.total)
    }
}

pub async fn execute(store: &CredentialsStore, hub: &HubConfig, json_mode: bool) -> Result<()> {
    let connector = DataSearchConnector::new(store, hub)?;

    let progress = spinner("Querying hub archive for missions...", json_mode);
    let result = connector.list_missions().await;
    progress.finish_and_clear();

    let missions: Vec<String> = result
        .context("Failed to list missions")?
        .into_iter()
        .collect();
    let total = missions.len();
    output(&MissionListOutput { missions, total }, json_mode);
    Ok(())
}
