//! Property-based tests using proptest
//!
//! These tests check the SLA derivation, record cardinality, and the naming
//! and private endpoint flags against randomized resources.

use anyhow::Result;
use async_trait::async_trait;
use azqr::analyzers::cosmosdb::{CosmosDbAnalyzer, DatabaseAccount, TIERS};
use azqr::analyzers::signalr::{SignalRAnalyzer, SignalRResource};
use azqr::analyzers::{has_naming_prefix, ServiceAnalyzer, Sla};
use azqr::resource::{DiagnosticsSettingsChecker, ResourceLister};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

struct VecLister<T>(Vec<T>);

#[async_trait]
impl<T: Clone + Send + Sync + 'static> ResourceLister<T> for VecLister<T> {
    async fn list(&self, _resource_group: &str) -> Result<Vec<T>> {
        Ok(self.0.clone())
    }
}

struct NoDiagnostics;

#[async_trait]
impl DiagnosticsSettingsChecker for NoDiagnostics {
    async fn has_diagnostics(&self, _resource_id: &str) -> Result<bool> {
        Ok(false)
    }
}

fn cosmos_account(
    index: usize,
    name: &str,
    zone_redundant: &[bool],
    endpoints: usize,
) -> DatabaseAccount {
    let locations: Vec<_> = zone_redundant
        .iter()
        .map(|zr| json!({"locationName": "eastus", "isZoneRedundant": zr}))
        .collect();
    let connections: Vec<_> = (0..endpoints).map(|i| json!({"id": i})).collect();

    serde_json::from_value(json!({
        "id": format!("/subscriptions/s/resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/a{}", index),
        "name": name,
        "location": "East US",
        "type": "Microsoft.DocumentDB/databaseAccounts",
        "properties": {
            "databaseAccountOfferType": "Standard",
            "locations": locations,
            "privateEndpointConnections": connections
        }
    }))
    .expect("valid account JSON")
}

fn signalr(index: usize, sku: &str) -> SignalRResource {
    serde_json::from_value(json!({
        "id": format!("/subscriptions/s/resourceGroups/rg/providers/Microsoft.SignalRService/signalR/s{}", index),
        "name": format!("sigr-{}", index),
        "location": "eastus",
        "type": "Microsoft.SignalRService/SignalR",
        "sku": {"name": sku}
    }))
    .expect("valid signalr JSON")
}

/// Zone redundancy flags of up to five locations
fn arb_locations() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..5)
}

fn arb_account_spec() -> impl Strategy<Value = (String, Vec<bool>, usize)> {
    ("[a-zA-Z][a-zA-Z0-9-]{0,20}", arb_locations(), 0usize..3)
}

fn review_cosmos(accounts: Vec<DatabaseAccount>) -> Vec<azqr::AdvisoryRecord> {
    let analyzer = CosmosDbAnalyzer::new(
        "sub",
        Arc::new(VecLister(accounts)),
        Arc::new(NoDiagnostics),
    );
    tokio_test::block_on(analyzer.review("rg")).expect("review should succeed")
}

proptest! {
    /// Without zone redundancy the baseline holds; with some it never drops below the middle tier
    #[test]
    fn sla_is_monotonic(locations in arb_locations()) {
        let result = TIERS.evaluate(locations.iter().copied());
        let any_zr = locations.iter().any(|zr| *zr);

        if any_zr {
            prop_assert!(result.sla >= Sla::FourNinesFive);
            prop_assert!(result.availability_zones);
        } else {
            prop_assert_eq!(result.sla, Sla::FourNines);
            prop_assert!(!result.availability_zones);
        }
    }

    /// Adding a zone-redundant location never lowers the tier below the middle one,
    /// and adding a non-redundant location always rules out the top tier
    #[test]
    fn top_tier_is_all_or_nothing(locations in arb_locations()) {
        let mut with_gap = locations.clone();
        with_gap.push(false);
        let capped = TIERS.evaluate(with_gap.iter().copied());
        prop_assert!(capped.sla < Sla::FiveNines);

        let all_zr = !locations.is_empty() && locations.iter().all(|zr| *zr);
        let result = TIERS.evaluate(locations.iter().copied());
        prop_assert_eq!(result.sla == Sla::FiveNines, all_zr && locations.len() >= 2);
    }

    /// Exactly one record per descriptor, in listing order
    #[test]
    fn cardinality_is_preserved(specs in prop::collection::vec(arb_account_spec(), 0..20)) {
        let accounts: Vec<_> = specs
            .iter()
            .enumerate()
            .map(|(i, (name, locations, endpoints))| cosmos_account(i, name, locations, *endpoints))
            .collect();

        let records = review_cosmos(accounts);
        prop_assert_eq!(records.len(), specs.len());

        for (record, (name, _, endpoints)) in records.iter().zip(&specs) {
            prop_assert_eq!(&record.service_name, name);
            prop_assert_eq!(record.private_endpoints, *endpoints > 0);
            prop_assert_eq!(record.naming_convention_compliant, name.starts_with("cosmos"));
        }
    }

    /// The naming check is an exact, case-sensitive prefix match
    #[test]
    fn naming_prefix_is_case_sensitive(suffix in "[a-z0-9-]{0,20}") {
        let lower = format!("cosmos{}", suffix);
        let upper = format!("COSMOS{}", suffix);
        let title = format!("Cosmos{}", suffix);
        prop_assert!(has_naming_prefix(&lower, "cosmos"));
        prop_assert!(!has_naming_prefix(&upper, "cosmos"));
        prop_assert!(!has_naming_prefix(&title, "cosmos"));
    }

    /// SignalR zone support follows the Premium SKU only
    #[test]
    fn signalr_zones_follow_premium_sku(
        skus in prop::collection::vec(prop_oneof!["Free_F1", "Standard_S1", "Premium_P1", "Premium_P2"], 1..10)
    ) {
        let resources: Vec<_> = skus.iter().enumerate().map(|(i, sku)| signalr(i, sku)).collect();
        let analyzer = SignalRAnalyzer::new("sub", Arc::new(VecLister(resources)), Arc::new(NoDiagnostics));
        let records = tokio_test::block_on(analyzer.review("rg")).expect("review should succeed");

        for (record, sku) in records.iter().zip(&skus) {
            prop_assert_eq!(record.availability_zones, sku.starts_with("Premium"));
            prop_assert_eq!(record.sla_tier, Sla::ThreeNines);
        }
    }
}

#[test]
fn scenario_cosmos_rename_case() {
    let records = review_cosmos(vec![
        cosmos_account(0, "Cosmos-db1", &[false], 0),
        cosmos_account(1, "cosmos-db1", &[true, true], 0),
    ]);

    assert!(!records[0].naming_convention_compliant);
    assert_eq!(records[0].sla_tier.to_string(), "99.99%");
    assert!(!records[0].availability_zones);

    assert!(records[1].naming_convention_compliant);
    assert_eq!(records[1].sla_tier.to_string(), "99.999%");
    assert!(records[1].availability_zones);
}
