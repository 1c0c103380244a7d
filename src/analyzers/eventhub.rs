//! Event Hubs namespaces

use super::{
    count_connections, PrivateEndpointConnections, Reliability, ResourceDescriptor, RuleAnalyzer,
    ServiceRules, Sku, Sla,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EventHubNamespace {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub sku: Sku,
    #[serde(default)]
    pub properties: EventHubProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHubProperties {
    #[serde(default)]
    pub zone_redundant: bool,
    #[serde(default)]
    pub private_endpoint_connections: PrivateEndpointConnections,
}

impl ResourceDescriptor for EventHubNamespace {
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

pub struct EventHubRules;

impl ServiceRules for EventHubRules {
    type Descriptor = EventHubNamespace;

    const SERVICE_NAME: &'static str = "Event Hubs";
    const NAMING_PREFIX: &'static str = "evh";
    const PROVIDER: &'static str = "Microsoft.EventHub/namespaces";
    const API_VERSION: &'static str = "2022-10-01-preview";

    fn assess(namespace: &EventHubNamespace) -> Reliability {
        let sla = match namespace.sku.name.as_str() {
            "Premium" | "Dedicated" => Sla::FourNines,
            _ => Sla::ThreeNinesFive,
        };

        Reliability {
            sku: namespace.sku.name.clone(),
            sla,
            availability_zones: namespace.properties.zone_redundant,
        }
    }
}

pub type EventHubAnalyzer = RuleAnalyzer<EventHubRules>;
