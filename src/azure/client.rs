//! ARM Client
//!
//! Main client for Azure Resource Manager, combining authentication and
//! HTTP functionality with URL builders for the resources we review.

use super::auth::AzureCredentials;
use super::http::ArmHttpClient;
use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

/// Public cloud management endpoint
pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// Immutable ARM client, cheap to clone and share between analyzers
#[derive(Clone)]
pub struct ArmClient {
    pub credentials: AzureCredentials,
    pub http: ArmHttpClient,
    endpoint: Url,
}

impl ArmClient {
    /// Create a client from environment credentials.
    ///
    /// `AZURE_RESOURCE_MANAGER_ENDPOINT` overrides the management endpoint
    /// (sovereign clouds).
    pub fn from_env() -> Result<Self> {
        let credentials =
            AzureCredentials::from_env().context("Failed to initialize Azure credentials")?;
        let endpoint = std::env::var("AZURE_RESOURCE_MANAGER_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_MANAGEMENT_ENDPOINT.to_string());
        Self::new(credentials, &endpoint)
    }

    pub fn new(credentials: AzureCredentials, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid management endpoint: {}", endpoint))?;

        Ok(Self {
            credentials,
            http: ArmHttpClient::new()?,
            endpoint,
        })
    }

    /// Make a GET request to an ARM URL
    pub async fn get(&self, url: &str) -> Result<Value> {
        let token = self.credentials.get_token().await?;
        self.http.get(url, &token).await
    }

    /// URL listing one provider's resources inside a resource group,
    /// e.g. `Microsoft.DocumentDB/databaseAccounts`
    pub fn resource_group_provider_url(
        &self,
        subscription_id: &str,
        resource_group: &str,
        provider: &str,
        api_version: &str,
    ) -> Result<String> {
        let path = format!(
            "subscriptions/{}/resourceGroups/{}/providers/{}",
            urlencoding::encode(subscription_id),
            urlencoding::encode(resource_group),
            provider
        );
        self.join(&path, api_version)
    }

    /// URL of a child path under a fully qualified resource id
    pub fn resource_url(
        &self,
        resource_id: &str,
        suffix: &str,
        api_version: &str,
    ) -> Result<String> {
        let path = format!(
            "{}/{}",
            resource_id.trim_matches('/'),
            suffix.trim_start_matches('/')
        );
        self.join(&path, api_version)
    }

    fn join(&self, path: &str, api_version: &str) -> Result<String> {
        let mut url = self
            .endpoint
            .join(path)
            .with_context(|| format!("Failed to build URL for {}", path))?;
        url.query_pairs_mut().append_pair("api-version", api_version);
        Ok(url.to_string())
    }
}

/// Format an ARM error for display
pub fn format_arm_error(error: &anyhow::Error) -> String {
    super::http::format_arm_error(error)
}
