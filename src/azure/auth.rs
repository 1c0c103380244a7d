//! Azure Authentication
//!
//! Acquires bearer tokens for Azure Resource Manager, either from a token
//! handed in through the environment or through a service principal
//! client-credentials flow.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Scope requested for Azure Resource Manager access
pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";

/// Default Microsoft Entra authority
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Token expiry buffer - refresh tokens this much before they actually expire
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// TTL assumed for tokens whose lifetime we cannot read (static tokens)
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Where access tokens come from
#[derive(Clone)]
enum TokenSource {
    /// Pre-acquired bearer token, e.g. from `az account get-access-token`
    Static(String),
    /// Service principal with a client secret
    ClientSecret {
        authority_host: String,
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },
}

/// Azure credentials holder with token caching
#[derive(Clone)]
pub struct AzureCredentials {
    source: Arc<TokenSource>,
    http: reqwest::Client,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl AzureCredentials {
    /// Build credentials from the environment.
    ///
    /// `AZURE_ACCESS_TOKEN` wins when set; otherwise `AZURE_TENANT_ID`,
    /// `AZURE_CLIENT_ID` and `AZURE_CLIENT_SECRET` must all be present.
    pub fn from_env() -> Result<Self> {
        if let Some(token) = non_empty_env("AZURE_ACCESS_TOKEN") {
            tracing::debug!("Using bearer token from AZURE_ACCESS_TOKEN");
            return Ok(Self::from_static_token(token));
        }

        let (Some(tenant_id), Some(client_id), Some(client_secret)) = (
            non_empty_env("AZURE_TENANT_ID"),
            non_empty_env("AZURE_CLIENT_ID"),
            non_empty_env("AZURE_CLIENT_SECRET"),
        ) else {
            return Err(anyhow::anyhow!(
                "No Azure credentials found. Set AZURE_ACCESS_TOKEN, or AZURE_TENANT_ID, AZURE_CLIENT_ID and AZURE_CLIENT_SECRET"
            ));
        };

        let authority_host = non_empty_env("AZURE_AUTHORITY_HOST")
            .unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_string());

        Self::from_client_secret(authority_host, tenant_id, client_id, client_secret)
    }

    /// Service principal credentials against the given authority host
    pub fn from_client_secret(
        authority_host: impl Into<String>,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let tenant_id = tenant_id.into();
        let client_id = client_id.into();

        tracing::debug!("Using service principal {} in tenant {}", client_id, tenant_id);

        Self::with_source(TokenSource::ClientSecret {
            authority_host: authority_host.into(),
            tenant_id,
            client_id,
            client_secret: client_secret.into(),
        })
    }

    /// Credentials that always hand out the given bearer token
    pub fn from_static_token(token: impl Into<String>) -> Self {
        Self {
            source: Arc::new(TokenSource::Static(token.into())),
            http: reqwest::Client::new(),
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    fn with_source(source: TokenSource) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("azqr/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client for token requests")?;

        Ok(Self {
            source: Arc::new(source),
            http,
            token_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Get an access token for API calls
    pub async fn get_token(&self) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let (token, ttl) = match self.source.as_ref() {
            TokenSource::Static(token) => (token.clone(), DEFAULT_TOKEN_TTL),
            TokenSource::ClientSecret {
                authority_host,
                tenant_id,
                client_id,
                client_secret,
            } => {
                self.request_client_secret_token(
                    authority_host,
                    tenant_id,
                    client_id,
                    client_secret,
                )
                .await?
            }
        };

        let expires_at = Instant::now() + ttl.saturating_sub(TOKEN_EXPIRY_BUFFER);

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token.clone(),
                expires_at,
            });
        }

        Ok(token)
    }

    async fn request_client_secret_token(
        &self,
        authority_host: &str,
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<(String, Duration)> {
        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            authority_host.trim_end_matches('/'),
            urlencoding::encode(tenant_id)
        );

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", MANAGEMENT_SCOPE),
        ];

        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .context("Failed to request access token")?;

        let status = response.status();
        if !status.is_success() {
            // Security: the body may echo the client id, never log it
            tracing::error!("Token request failed: {}", status);
            return Err(anyhow::anyhow!("Token request failed: {}", status));
        }

        let body: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        let ttl = body
            .expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_TTL);

        tracing::debug!("New token cached, expires in ~{} minutes", ttl.as_secs() / 60);

        Ok((body.access_token, ttl))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_is_returned_and_cached() {
        let credentials = AzureCredentials::from_static_token("abc");
        assert_eq!(credentials.get_token().await.unwrap(), "abc");
        assert!(credentials.token_cache.read().await.is_some());
        assert_eq!(credentials.get_token().await.unwrap(), "abc");
    }

    #[test]
    fn test_cached_token_validity() {
        let valid = CachedToken {
            token: "t".to_string(),
            expires_at: Instant::now() + Duration::from_secs(60),
        };
        assert!(valid.is_valid());

        let expired = CachedToken {
            token: "t".to_string(),
            expires_at: Instant::now(),
        };
        assert!(!expired.is_valid());
    }
}
