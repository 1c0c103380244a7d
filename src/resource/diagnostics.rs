//! Diagnostic settings lookup

use crate::azure::client::ArmClient;
use anyhow::Result;
use async_trait::async_trait;

const DIAGNOSTIC_SETTINGS_PATH: &str = "providers/Microsoft.Insights/diagnosticSettings";
const DIAGNOSTIC_SETTINGS_API_VERSION: &str = "2021-05-01-preview";

/// Reports whether any diagnostic setting is attached to a resource
#[async_trait]
pub trait DiagnosticsSettingsChecker: Send + Sync {
    async fn has_diagnostics(&self, resource_id: &str) -> Result<bool>;
}

/// Production checker backed by the Azure Monitor diagnostic settings API
#[derive(Clone)]
pub struct ArmDiagnosticsSettings {
    client: ArmClient,
}

impl ArmDiagnosticsSettings {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DiagnosticsSettingsChecker for ArmDiagnosticsSettings {
    async fn has_diagnostics(&self, resource_id: &str) -> Result<bool> {
        let url = self.client.resource_url(
            resource_id,
            DIAGNOSTIC_SETTINGS_PATH,
            DIAGNOSTIC_SETTINGS_API_VERSION,
        )?;

        let response = self.client.get(&url).await?;

        // Presence is what counts, the sink configuration is not inspected
        let count = response
            .get("value")
            .and_then(|v| v.as_array())
            .map_or(0, |settings| settings.len());

        tracing::debug!("{} diagnostic settings on {}", count, resource_id);
        Ok(count > 0)
    }
}
