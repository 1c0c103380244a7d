//! Cosmos DB database accounts
//!
//! Reliability depends on the account's replica regions: each region is
//! individually zone-redundant or not, and the SLA follows
//! [`MultiLocationTiers`].

use super::{
    count_connections, MultiLocationTiers, PrivateEndpointConnections, Reliability,
    ResourceDescriptor, RuleAnalyzer, ServiceRules, Sla,
};
use serde::Deserialize;

pub const TIERS: MultiLocationTiers = MultiLocationTiers {
    baseline: Sla::FourNines,
    zone_redundant: Sla::FourNinesFive,
    multi_region_zone_redundant: Sla::FiveNines,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccount {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub properties: DatabaseAccountProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountProperties {
    pub database_account_offer_type: String,
    /// `null` and absent both mean no replica regions
    #[serde(default)]
    pub locations: Option<Vec<AccountLocation>>,
    #[serde(default)]
    pub private_endpoint_connections: PrivateEndpointConnections,
}

/// One replica region of the account
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLocation {
    pub is_zone_redundant: bool,
}

impl ResourceDescriptor for DatabaseAccount {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn resource_type(&self) -> &str {
        &self.resource_type
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn private_endpoint_count(&self) -> usize {
        count_connections(&self.properties.private_endpoint_connections)
    }
}

pub struct CosmosDbRules;

impl ServiceRules for CosmosDbRules {
    type Descriptor = DatabaseAccount;

    const SERVICE_NAME: &'static str = "CosmosDB Databases";
    const NAMING_PREFIX: &'static str = "cosmos";
    const PROVIDER: &'static str = "Microsoft.DocumentDB/databaseAccounts";
    const API_VERSION: &'static str = "2023-04-15";

    fn assess(account: &DatabaseAccount) -> Reliability {
        let result = TIERS.evaluate(
            account
                .properties
                .locations
                .iter()
                .flatten()
                .map(|location| location.is_zone_redundant),
        );

        Reliability {
            sku: account.properties.database_account_offer_type.clone(),
            sla: result.sla,
            availability_zones: result.availability_zones,
        }
    }
}

pub type CosmosDbAnalyzer = RuleAnalyzer<CosmosDbRules>;
