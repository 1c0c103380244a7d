//! Service analyzers
//!
//! Every supported service type turns its raw ARM descriptors into
//! [`AdvisoryRecord`]s. The skeleton is shared by [`RuleAnalyzer`]: list the
//! resources, look up diagnostic settings for each one, apply the service's
//! [`ServiceRules`], check the naming prefix. Only the rule table and the
//! descriptor shape differ between services.
//!
//! # Module Structure
//!
//! - [`sla`] - SLA tiers and the multi-location derivation rule
//! - [`record`] - The advisory record and shared field helpers
//! - [`registry`] - Enumeration of the supported services
//! - One module per service: [`cosmosdb`], [`signalr`], [`eventhub`],
//!   [`servicebus`], [`redis`], [`keyvault`]

pub mod cosmosdb;
pub mod eventhub;
pub mod keyvault;
pub mod record;
pub mod redis;
pub mod registry;
pub mod servicebus;
pub mod signalr;
pub mod sla;

pub use record::{has_naming_prefix, parse_location, AdvisoryRecord};
pub use registry::{build_analyzers, ServiceKind};
pub use sla::{LocationSla, MultiLocationTiers, Sla};

use crate::resource::{
    ArmDiagnosticsSettings, ArmResourceLister, DiagnosticsSettingsChecker, ResourceLister,
};
use crate::review::ReviewContext;
use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Reviews every resource of one service type in a resource group
#[async_trait]
pub trait ServiceAnalyzer: Send + Sync {
    /// Human readable service name used in progress lines and failures
    fn service_name(&self) -> &'static str;

    /// One record per resource, in listing order. Any collaborator error
    /// aborts the whole call.
    async fn review(&self, resource_group: &str) -> Result<Vec<AdvisoryRecord>>;
}

/// Identity fields every raw descriptor carries
pub trait ResourceDescriptor {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn resource_type(&self) -> &str;
    fn location(&self) -> &str;
    fn private_endpoint_count(&self) -> usize;
}

/// Reliability fields derived by a service's rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reliability {
    pub sku: String,
    pub sla: Sla,
    pub availability_zones: bool,
}

/// Per-service rule table
pub trait ServiceRules: Send + Sync + 'static {
    type Descriptor: ResourceDescriptor + DeserializeOwned + Send + Sync + 'static;

    const SERVICE_NAME: &'static str;
    const NAMING_PREFIX: &'static str;
    /// ARM provider path, e.g. `Microsoft.DocumentDB/databaseAccounts`
    const PROVIDER: &'static str;
    const API_VERSION: &'static str;

    fn assess(descriptor: &Self::Descriptor) -> Reliability;
}

/// SKU block shared by most ARM resources
#[derive(Debug, Clone, Deserialize)]
pub struct Sku {
    pub name: String,
}

/// Private endpoint connections are only counted, never inspected
pub type PrivateEndpointConnections = Option<Vec<Value>>;

pub(crate) fn count_connections(connections: &PrivateEndpointConnections) -> usize {
    connections.as_ref().map_or(0, |c| c.len())
}

/// [`ServiceAnalyzer`] driven by a [`ServiceRules`] table
pub struct RuleAnalyzer<R: ServiceRules> {
    subscription_id: String,
    lister: Arc<dyn ResourceLister<R::Descriptor>>,
    diagnostics: Arc<dyn DiagnosticsSettingsChecker>,
    _rules: PhantomData<fn() -> R>,
}

impl<R: ServiceRules> RuleAnalyzer<R> {
    pub fn new(
        subscription_id: &str,
        lister: Arc<dyn ResourceLister<R::Descriptor>>,
        diagnostics: Arc<dyn DiagnosticsSettingsChecker>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.to_string(),
            lister,
            diagnostics,
            _rules: PhantomData,
        }
    }

    /// Analyzer wired to the ARM-backed collaborators
    pub fn from_context(ctx: &ReviewContext) -> Self {
        let lister = ArmResourceLister::<R::Descriptor>::new(
            ctx.client.clone(),
            &ctx.subscription_id,
            R::PROVIDER,
            R::API_VERSION,
        );
        let diagnostics = ArmDiagnosticsSettings::new(ctx.client.clone());
        Self::new(&ctx.subscription_id, Arc::new(lister), Arc::new(diagnostics))
    }

    fn to_record(
        &self,
        resource_group: &str,
        resource: &R::Descriptor,
        diagnostic_settings: bool,
    ) -> AdvisoryRecord {
        let reliability = R::assess(resource);

        AdvisoryRecord {
            subscription_id: self.subscription_id.clone(),
            resource_group: resource_group.to_string(),
            service_name: resource.name().to_string(),
            resource_type: resource.resource_type().to_string(),
            location: parse_location(resource.location()),
            sku: reliability.sku,
            sla_tier: reliability.sla,
            availability_zones: reliability.availability_zones,
            private_endpoints: resource.private_endpoint_count() > 0,
            diagnostic_settings,
            naming_convention_compliant: has_naming_prefix(resource.name(), R::NAMING_PREFIX),
        }
    }
}

#[async_trait]
impl<R: ServiceRules> ServiceAnalyzer for RuleAnalyzer<R> {
    fn service_name(&self) -> &'static str {
        R::SERVICE_NAME
    }

    async fn review(&self, resource_group: &str) -> Result<Vec<AdvisoryRecord>> {
        tracing::info!("Analyzing {} in Resource Group {}", R::SERVICE_NAME, resource_group);

        let resources = self.lister.list(resource_group).await?;

        let mut records = Vec::with_capacity(resources.len());
        for resource in &resources {
            let diagnostic_settings = self.diagnostics.has_diagnostics(resource.id()).await?;
            records.push(self.to_record(resource_group, resource, diagnostic_settings));
        }

        Ok(records)
    }
}
