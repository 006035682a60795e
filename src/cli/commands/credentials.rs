//! Credentials CLI commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::output::{list_table, output, render_list, CommandOutput};
use crate::domain::models::Credentials;
use crate::infrastructure::credentials::CredentialsStore;

const REDACTED: &str = "********";

#[derive(Args, Debug)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub command: CredentialsCommands,
}

#[derive(Subcommand, Debug)]
pub enum CredentialsCommands {
    /// Create an empty credentials store if none exists
    Init,
    /// Store credentials for a provider, replacing any existing ones
    Set {
        /// Provider name (e.g. Copernicus)
        provider: String,
        /// Credential field as key=value (repeatable)
        #[arg(short, long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, String)>,
    },
    /// Show the credentials stored for a provider
    Get {
        /// Provider name
        provider: String,
        /// Print values instead of masking them
        #[arg(long)]
        show_secrets: bool,
    },
    /// List providers with stored credentials
    List,
}

/// Parse a `key=value` credential field.
pub fn parse_field(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE but got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("field name cannot be empty".to_string());
    }
    Ok((key.to_string(), value.to_string()))
}

#[derive(Debug, Serialize)]
pub struct CredentialsActionOutput {
    pub success: bool,
    pub message: String,
    pub path: String,
}

impl CommandOutput for CredentialsActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

#[derive(Debug, Serialize)]
pub struct CredentialsDetailOutput {
    pub provider: String,
    pub fields: Vec<(String, String)>,
}

impl CommandOutput for CredentialsDetailOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!("Provider: {}", self.provider)];
        for (key, value) in &self.fields {
            lines.push(format!("  {key}: {value}"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        serde_json::json!({ "provider": self.provider, "fields": fields })
    }
}

#[derive(Debug, Serialize)]
pub struct ProviderListOutput {
    pub providers: Vec<String>,
    pub total: usize,
}

impl CommandOutput for ProviderListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["provider"]);
        for provider in &self.providers {
            table.add_row(vec![provider.as_str()]);
        }
        render_list("provider", &table, self.total)
    }
}

pub fn execute(args: CredentialsArgs, store: &CredentialsStore, json_mode: bool) -> Result<()> {
    let path = store.path().display().to_string();

    match args.command {
        CredentialsCommands::Init => {
            let created = store
                .ensure_exists()
                .context("Failed to initialize credentials store")?;
            let message = if created {
                format!("Created credentials store at {path}")
            } else {
                format!("Credentials store already exists at {path}")
            };
            output(
                &CredentialsActionOutput {
                    success: true,
                    message,
                    path,
                },
                json_mode,
            );
        }
        CredentialsCommands::Set { provider, fields } => {
            store
                .ensure_exists()
                .context("Failed to initialize credentials store")?;
            let credentials: Credentials = fields.into_iter().collect();
            store
                .set_credentials(&provider, credentials)
                .with_context(|| format!("Failed to store credentials for '{provider}'"))?;
            output(
                &CredentialsActionOutput {
                    success: true,
                    message: format!("Stored credentials for '{provider}' in {path}"),
                    path,
                },
                json_mode,
            );
        }
        CredentialsCommands::Get {
            provider,
            show_secrets,
        } => {
            let credentials = store.get_credentials(&provider)?;
            let fields = credentials
                .fields()
                .map(|(k, v)| {
                    let shown = if show_secrets { v } else { REDACTED };
                    (k.to_string(), shown.to_string())
                })
                .collect();
            output(&CredentialsDetailOutput { provider, fields }, json_mode);
        }
        CredentialsCommands::List => {
            let providers = store.providers()?;
            let total = providers.len();
            output(&ProviderListOutput { providers, total }, json_mode);
        }
    }

    Ok(())
}
