//! Service Registry
//!
//! Lists every service type the reviewer knows about and builds the
//! matching ARM-backed analyzer.

use super::cosmosdb::CosmosDbAnalyzer;
use super::eventhub::EventHubAnalyzer;
use super::keyvault::KeyVaultAnalyzer;
use super::redis::RedisAnalyzer;
use super::servicebus::ServiceBusAnalyzer;
use super::signalr::SignalRAnalyzer;
use super::ServiceAnalyzer;
use crate::review::ReviewContext;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Cosmos,
    Sigr,
    Evh,
    Sb,
    Redis,
    Kv,
}

impl ServiceKind {
    /// Registration order, which is also the order records are reported in
    pub const ALL: [ServiceKind; 6] = [
        ServiceKind::Cosmos,
        ServiceKind::Sigr,
        ServiceKind::Evh,
        ServiceKind::Sb,
        ServiceKind::Redis,
        ServiceKind::Kv,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Cosmos => "cosmos",
            Self::Sigr => "sigr",
            Self::Evh => "evh",
            Self::Sb => "sb",
            Self::Redis => "redis",
            Self::Kv => "kv",
        }
    }

    pub fn analyzer(&self, ctx: &ReviewContext) -> Box<dyn ServiceAnalyzer> {
        match self {
            Self::Cosmos => Box::new(CosmosDbAnalyzer::from_context(ctx)),
            Self::Sigr => Box::new(SignalRAnalyzer::from_context(ctx)),
            Self::Evh => Box::new(EventHubAnalyzer::from_context(ctx)),
            Self::Sb => Box::new(ServiceBusAnalyzer::from_context(ctx)),
            Self::Redis => Box::new(RedisAnalyzer::from_context(ctx)),
            Self::Kv => Box::new(KeyVaultAnalyzer::from_context(ctx)),
        }
    }
}

impl FromStr for ServiceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s.trim().to_lowercase())
            .ok_or_else(|| anyhow::anyhow!("Unknown service: {}", s))
    }
}

/// Build analyzers for the requested services, in registration order.
/// An empty selection means every service.
pub fn build_analyzers(
    ctx: &ReviewContext,
    selected: &[ServiceKind],
) -> Vec<Box<dyn ServiceAnalyzer>> {
    ServiceKind::ALL
        .into_iter()
        .filter(|kind| selected.is_empty() || selected.contains(kind))
        .map(|kind| kind.analyzer(ctx))
        .collect()
}
