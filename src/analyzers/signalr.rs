//! Azure SignalR Service
//!
//! Zone support is a SKU capability here, not a per-region setting.

use super::{
    count_connections, PrivateEndpointConnections, Reliability, ResourceDescriptor, RuleAnalyzer,
    ServiceRules, Sku, Sla,
};
use serde::Deserialize;

const ZONE_REDUNDANT_SKU: &str = "Premium";

#[derive(Debug, Clone, Deserialize)]
pub struct SignalRResource {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub sku: Sku,
    #[serde(default)]
    pub properties: SignalRProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRProperties {
    #[serde(default)]
    pub private_endpoint_connections: PrivateEndpointConnections,
}

impl ResourceDescriptor for SignalRResource {
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

pub struct SignalRRules;

impl ServiceRules for SignalRRules {
    type Descriptor = SignalRResource;

    const SERVICE_NAME: &'static str = "SignalR";
    const NAMING_PREFIX: &'static str = "sigr";
    const PROVIDER: &'static str = "Microsoft.SignalRService/signalR";
    const API_VERSION: &'static str = "2023-02-01";

    fn assess(resource: &SignalRResource) -> Reliability {
        Reliability {
            sku: resource.sku.name.clone(),
            sla: Sla::ThreeNines,
            availability_zones: resource.sku.name.contains(ZONE_REDUNDANT_SKU),
        }
    }
}

pub type SignalRAnalyzer = RuleAnalyzer<SignalRRules>;
