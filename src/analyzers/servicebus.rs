//! Service Bus namespaces

use super::{
    count_connections, PrivateEndpointConnections, Reliability, ResourceDescriptor, RuleAnalyzer,
    ServiceRules, Sku, Sla,
};
use serde::Deserialize;

const PREMIUM_SKU: &str = "Premium";

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceBusNamespace {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub sku: Sku,
    #[serde(default)]
    pub properties: ServiceBusProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBusProperties {
    #[serde(default)]
    pub zone_redundant: bool,
    #[serde(default)]
    pub private_endpoint_connections: PrivateEndpointConnections,
}

impl ResourceDescriptor for ServiceBusNamespace {
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

pub struct ServiceBusRules;

impl ServiceRules for ServiceBusRules {
    type Descriptor = ServiceBusNamespace;

    const SERVICE_NAME: &'static str = "Service Bus";
    const NAMING_PREFIX: &'static str = "sb";
    const PROVIDER: &'static str = "Microsoft.ServiceBus/namespaces";
    const API_VERSION: &'static str = "2022-10-01-preview";

    fn assess(namespace: &ServiceBusNamespace) -> Reliability {
        let premium = namespace.sku.name == PREMIUM_SKU;

        Reliability {
            sku: namespace.sku.name.clone(),
            sla: if premium { Sla::ThreeNinesFive } else { Sla::ThreeNines },
            // Zone redundancy can only be switched on for Premium namespaces
            availability_zones: premium && namespace.properties.zone_redundant,
        }
    }
}

pub type ServiceBusAnalyzer = RuleAnalyzer<ServiceBusRules>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fakes::descriptor;
    use serde_json::json;

    fn namespace(sku: &str, zone_redundant: bool) -> ServiceBusNamespace {
        descriptor(json!({
            "id": "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.ServiceBus/namespaces/sb-billing",
            "name": "sb-billing",
            "location": "westeurope",
            "type": "Microsoft.ServiceBus/Namespaces",
            "sku": {"name": sku, "tier": sku},
            "properties": {"zoneRedundant": zone_redundant, "privateEndpointConnections": []}
        }))
    }

    #[test]
    fn test_standard_namespace_never_has_zones() {
        let reliability = ServiceBusRules::assess(&namespace("Standard", true));
        assert_eq!(reliability.sla, Sla::ThreeNines);
        assert!(!reliability.availability_zones);
    }

    #[test]
    fn test_premium_namespace() {
        let zoned = ServiceBusRules::assess(&namespace("Premium", true));
        assert_eq!(zoned.sla, Sla::ThreeNinesFive);
        assert!(zoned.availability_zones);

        let unzoned = ServiceBusRules::assess(&namespace("Premium", false));
        assert_eq!(unzoned.sla, Sla::ThreeNinesFive);
        assert!(!unzoned.availability_zones);
    }
}
