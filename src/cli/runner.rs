//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::GenesysClient;
use crate::config::ConnectorConfig;
use crate::error::{Error, Result};
use crate::executor::{execute_batch, Invocation};
use crate::models::TokenInfo;
use crate::types::{JsonObject, JsonValue, Method};
use std::fs;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Run {
                invocations,
                continue_on_fail,
            } => self.run_batch(invocations, *continue_on_fail).await,
            Commands::Resources => self.resources(),
        }
    }

    /// Load the connector configuration
    fn load_config(&self) -> Result<ConnectorConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -C flag)"))?;
        ConnectorConfig::from_path(path)
    }

    /// Verify the credentials by asking the API about the current token
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = GenesysClient::new(&config);

        let response = client
            .request(
                Method::GET,
                "/api/v2/tokens/me",
                &JsonValue::Null,
                &JsonObject::new(),
            )
            .await?;

        let info: TokenInfo = serde_json::from_value(response)?;
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&info)?);
            }
            OutputFormat::Pretty => {
                println!("Connection OK ({})", config.credentials.region);
                if let Some(org) = info.organization.as_ref().and_then(|o| o.get("name")) {
                    println!("Organization: {org}");
                }
            }
        }
        Ok(())
    }

    /// Execute a batch of invocations from a JSON file
    async fn run_batch(
        &self,
        invocations_path: &std::path::Path,
        continue_on_fail_flag: bool,
    ) -> Result<()> {
        let config = self.load_config()?;
        let continue_on_fail = continue_on_fail_flag || config.continue_on_fail;
        let client = GenesysClient::new(&config);

        let contents = fs::read_to_string(invocations_path)?;
        let invocations: Vec<Invocation> = serde_json::from_str(&contents)?;

        let items = execute_batch(&client, &invocations, continue_on_fail).await?;

        match self.cli.format {
            OutputFormat::Json => {
                for item in &items {
                    println!("{}", serde_json::to_string(item)?);
                }
            }
            OutputFormat::Pretty => {
                println!("{} item(s)", items.len());
                for item in &items {
                    println!(
                        "[{}] {}",
                        item.item_index,
                        serde_json::to_string_pretty(&item.json)?
                    );
                }
            }
        }
        Ok(())
    }

    /// Print the supported resource/operation matrix
    fn resources(&self) -> Result<()> {
        for (resource, operations) in RESOURCE_MATRIX {
            println!("{resource}: {}", operations.join(", "));
        }
        Ok(())
    }
}

/// Resources and the operations each supports
const RESOURCE_MATRIX: &[(&str, &[&str])] = &[
    (
        "queue",
        &["create", "get", "getAll", "getMembers", "addMembers"],
    ),
    ("user", &["get", "getAll", "getQueues"]),
    ("conversation", &["get", "getAll"]),
    ("group", &["get", "getAll"]),
    ("division", &["get", "getAll"]),
    ("oauthClient", &["get", "getAll", "getUsage"]),
    ("dataAction", &["get", "getAll", "getIntegrations"]),
];
