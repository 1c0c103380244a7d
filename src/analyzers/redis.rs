//! Azure Cache for Redis

use super::{
    count_connections, PrivateEndpointConnections, Reliability, ResourceDescriptor, RuleAnalyzer,
    ServiceRules, Sla,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RedisCache {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Availability zones the cache is pinned to
    #[serde(default)]
    pub zones: Option<Vec<String>>,
    pub properties: RedisProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisProperties {
    pub sku: RedisSku,
    #[serde(default)]
    pub private_endpoint_connections: PrivateEndpointConnections,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSku {
    pub name: String,
}

impl ResourceDescriptor for RedisCache {
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

pub struct RedisRules;

impl ServiceRules for RedisRules {
    type Descriptor = RedisCache;

    const SERVICE_NAME: &'static str = "Redis";
    const NAMING_PREFIX: &'static str = "redis";
    const PROVIDER: &'static str = "Microsoft.Cache/redis";
    const API_VERSION: &'static str = "2023-04-01";

    fn assess(cache: &RedisCache) -> Reliability {
        Reliability {
            sku: cache.properties.sku.name.clone(),
            sla: Sla::ThreeNines,
            availability_zones: cache.zones.as_ref().is_some_and(|zones| !zones.is_empty()),
        }
    }
}

pub type RedisAnalyzer = RuleAnalyzer<RedisRules>;
