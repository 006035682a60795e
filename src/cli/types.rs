//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::credentials::CredentialsArgs;
use super::commands::search::SearchArgs;

#[derive(Parser, Debug)]
#[command(name = "earthpicture")]
#[command(about = "Search Copernicus satellite imagery", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Config file (defaults to ./earthpicture.yaml when present)
    #[arg(long, global = true, env = "EARTHPICTURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Credentials store path (overrides the configured one)
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage stored provider credentials
    Credentials(CredentialsArgs),

    /// List missions that have products in the hub archive
    Missions,

    /// Search products for a mission
    Search(SearchArgs),
}
