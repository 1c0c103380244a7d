//! Configuration Management
//!
//! Persistent defaults for azqr, read from `<config dir>/azqr/config.json`.

use crate::analyzers::ServiceKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Output format of the review report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Subscription reviewed when none is given on the command line
    #[serde(default)]
    pub subscription_id: Option<String>,
    /// Resource groups reviewed when none are given on the command line
    #[serde(default)]
    pub resource_groups: Vec<String>,
    /// Services to review, all of them when empty
    #[serde(default)]
    pub services: Vec<ServiceKind>,
    #[serde(default)]
    pub output: Option<OutputFormat>,
}

impl Config {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("azqr").join("config.json"))
    }

    /// Load configuration from disk, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file {:?}: {:#}", path, e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Effective subscription (CLI > config > AZURE_SUBSCRIPTION_ID)
    pub fn effective_subscription(&self, cli: Option<&str>) -> Result<String> {
        let subscription = cli
            .map(|s| s.to_string())
            .or_else(|| self.subscription_id.clone())
            .or_else(|| std::env::var("AZURE_SUBSCRIPTION_ID").ok())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No subscription configured. Set AZURE_SUBSCRIPTION_ID or use --subscription"
                )
            })?;

        validate_subscription_id(&subscription)?;
        Ok(subscription)
    }

    /// Effective resource groups (CLI > config)
    pub fn effective_resource_groups(&self, cli: &[String]) -> Result<Vec<String>> {
        let groups: Vec<String> = if cli.is_empty() {
            self.resource_groups.clone()
        } else {
            cli.to_vec()
        };

        let groups: Vec<String> = groups
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();

        if groups.is_empty() {
            return Err(anyhow::anyhow!(
                "No resource group configured. Use --resource-group"
            ));
        }

        Ok(groups)
    }

    /// Effective service selection (CLI > config > all)
    pub fn effective_services(&self, cli: &[ServiceKind]) -> Vec<ServiceKind> {
        if cli.is_empty() {
            self.services.clone()
        } else {
            cli.to_vec()
        }
    }

    pub fn effective_output(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.output).unwrap_or_default()
    }
}

/// Subscription ids are GUIDs
pub fn validate_subscription_id(subscription: &str) -> Result<()> {
    Uuid::parse_str(subscription)
        .map(|_| ())
        .with_context(|| format!("Invalid subscription id: {}", subscription))
}
