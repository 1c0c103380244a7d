//! Advisory record emitted per reviewed resource

use super::sla::Sla;
use serde::{Deserialize, Serialize};

/// Normalized reliability posture of one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRecord {
    pub subscription_id: String,
    pub resource_group: String,
    pub service_name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub location: String,
    pub sku: String,
    pub sla_tier: Sla,
    pub availability_zones: bool,
    pub private_endpoints: bool,
    pub diagnostic_settings: bool,
    pub naming_convention_compliant: bool,
}

/// Normalize a provider location: "West Europe" -> "westeurope".
///
/// Composite `region(zone)` encodings keep the region part only.
pub fn parse_location(location: &str) -> String {
    let region = match location.split_once('(') {
        Some((region, _)) => region,
        None => location,
    };

    region
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Exact, case-sensitive prefix check on the resource display name
pub fn has_naming_prefix(name: &str, prefix: &str) -> bool {
    name.starts_with(prefix)
}
