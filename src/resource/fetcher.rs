//! Resource Fetcher
//!
//! Lists every resource of one provider type in a resource group, following
//! ARM `nextLink` pagination until exhausted.

use crate::azure::client::ArmClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// Fetches all instances of one service type in a resource group
#[async_trait]
pub trait ResourceLister<T>: Send + Sync {
    async fn list(&self, resource_group: &str) -> Result<Vec<T>>;
}

/// Result of one page
struct PaginatedResult {
    items: Vec<Value>,
    next_link: Option<String>,
}

/// Fetch every page starting at `url`
pub async fn fetch_all_pages(client: &ArmClient, url: &str) -> Result<Vec<Value>> {
    let mut all_items = Vec::new();
    let mut next = Some(url.to_string());

    while let Some(url) = next {
        let page = fetch_page(client, &url).await?;
        all_items.extend(page.items);
        next = page.next_link;
    }

    Ok(all_items)
}

async fn fetch_page(client: &ArmClient, url: &str) -> Result<PaginatedResult> {
    let response = client.get(url).await?;
    Ok(split_page(response))
}

fn split_page(response: Value) -> PaginatedResult {
    let items = response
        .get("value")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    let next_link = response
        .get("nextLink")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    PaginatedResult { items, next_link }
}

/// Production lister backed by the ARM list-by-resource-group API
pub struct ArmResourceLister<T> {
    client: ArmClient,
    subscription_id: String,
    provider: &'static str,
    api_version: &'static str,
    _descriptor: PhantomData<fn() -> T>,
}

impl<T> ArmResourceLister<T> {
    pub fn new(
        client: ArmClient,
        subscription_id: &str,
        provider: &'static str,
        api_version: &'static str,
    ) -> Self {
        Self {
            client,
            subscription_id: subscription_id.to_string(),
            provider,
            api_version,
            _descriptor: PhantomData,
        }
    }
}

#[async_trait]
impl<T> ResourceLister<T> for ArmResourceLister<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn list(&self, resource_group: &str) -> Result<Vec<T>> {
        let url = self.client.resource_group_provider_url(
            &self.subscription_id,
            resource_group,
            self.provider,
            self.api_version,
        )?;

        let items = fetch_all_pages(&self.client, &url).await?;
        tracing::debug!("{} {} resources in {}", items.len(), self.provider, resource_group);

        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item)
                    .with_context(|| format!("Malformed {} resource descriptor", self.provider))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_page_with_next_link() {
        let page = split_page(json!({
            "value": [{"name": "a"}, {"name": "b"}],
            "nextLink": "https://management.azure.com/next?page=2"
        }));
        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.next_link.as_deref(),
            Some("https://management.azure.com/next?page=2")
        );
    }

    #[test]
    fn test_split_page_last_page() {
        let page = split_page(json!({"value": [], "nextLink": ""}));
        assert!(page.items.is_empty());
        assert!(page.next_link.is_none());
    }

    #[test]
    fn test_split_page_missing_value() {
        let page = split_page(Value::Null);
        assert!(page.items.is_empty());
        assert!(page.next_link.is_none());
    }
}
