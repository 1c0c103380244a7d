//! Key Vault
//!
//! Vault contents are replicated within the region by the platform, so
//! zone redundancy does not depend on any setting.

use super::{
    count_connections, PrivateEndpointConnections, Reliability, ResourceDescriptor, RuleAnalyzer,
    ServiceRules, Sla,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Vault {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub properties: VaultProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultProperties {
    pub sku: VaultSku,
    #[serde(default)]
    pub private_endpoint_connections: PrivateEndpointConnections,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaultSku {
    pub name: String,
}

impl ResourceDescriptor for Vault {
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

pub struct KeyVaultRules;

impl ServiceRules for KeyVaultRules {
    type Descriptor = Vault;

    const SERVICE_NAME: &'static str = "Key Vaults";
    const NAMING_PREFIX: &'static str = "kv";
    const PROVIDER: &'static str = "Microsoft.KeyVault/vaults";
    const API_VERSION: &'static str = "2023-02-01";

    fn assess(vault: &Vault) -> Reliability {
        Reliability {
            sku: vault.properties.sku.name.clone(),
            sla: Sla::FourNines,
            availability_zones: true,
        }
    }
}

pub type KeyVaultAnalyzer = RuleAnalyzer<KeyVaultRules>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fakes::{descriptor, FakeDiagnostics, StaticLister};
    use crate::analyzers::ServiceAnalyzer;
    use serde_json::json;

    #[tokio::test]
    async fn test_vault_review() {
        let vault: Vault = descriptor(json!({
            "id": "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.KeyVault/vaults/kv-secrets",
            "name": "kv-secrets",
            "location": "westeurope",
            "type": "Microsoft.KeyVault/vaults",
            "properties": {
                "sku": {"family": "A", "name": "premium"},
                "tenantId": "00000000-0000-0000-0000-000000000000"
            }
        }));
        let diagnostics = FakeDiagnostics::for_ids(&[vault.id.as_str()]);
        let analyzer = KeyVaultAnalyzer::new("sub", StaticLister::new(vec![vault]), diagnostics);

        let records = analyzer.review("rg").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sku, "premium");
        assert_eq!(records[0].sla_tier, Sla::FourNines);
        assert!(records[0].availability_zones);
        assert!(records[0].diagnostic_settings);
        assert!(!records[0].private_endpoints);
        assert!(records[0].naming_convention_compliant);
    }
}
