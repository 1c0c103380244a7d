//! Review orchestration
//!
//! Runs every registered analyzer against each resource group and gathers
//! the records. A failing analyzer is reported and skipped; the others still
//! run.

use crate::analyzers::{AdvisoryRecord, ServiceAnalyzer};
use crate::azure::client::{format_arm_error, ArmClient};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

/// Analyzers reviewed at the same time within one resource group
const MAX_CONCURRENT_ANALYZERS: usize = 4;

/// Read-only configuration handed to every analyzer at construction
#[derive(Clone)]
pub struct ReviewContext {
    pub subscription_id: String,
    pub client: ArmClient,
}

impl ReviewContext {
    pub fn new(subscription_id: &str, client: ArmClient) -> Self {
        Self {
            subscription_id: subscription_id.to_string(),
            client,
        }
    }
}

/// An analyzer that could not review a resource group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFailure {
    pub resource_group: String,
    pub service: String,
    pub message: String,
}

/// Outcome of reviewing one or more resource groups
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub records: Vec<AdvisoryRecord>,
    pub failures: Vec<ReviewFailure>,
}

impl ReviewOutcome {
    fn extend(&mut self, other: ReviewOutcome) {
        self.records.extend(other.records);
        self.failures.extend(other.failures);
    }
}

/// Serializable report written by the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub subscription_id: String,
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub records: Vec<AdvisoryRecord>,
    pub failures: Vec<ReviewFailure>,
}

impl ReviewReport {
    pub fn new(subscription_id: &str, outcome: ReviewOutcome) -> Self {
        Self {
            subscription_id: subscription_id.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            records: outcome.records,
            failures: outcome.failures,
        }
    }
}

pub struct ReviewRunner {
    analyzers: Vec<Box<dyn ServiceAnalyzer>>,
}

impl ReviewRunner {
    pub fn new(analyzers: Vec<Box<dyn ServiceAnalyzer>>) -> Self {
        Self { analyzers }
    }

    /// Run every analyzer against one resource group. Records keep the
    /// analyzers' registration order.
    pub async fn review_resource_group(&self, resource_group: &str) -> ReviewOutcome {
        let results: Vec<_> = stream::iter(self.analyzers.iter())
            .map(|analyzer| async move {
                (analyzer.service_name(), analyzer.review(resource_group).await)
            })
            .buffered(MAX_CONCURRENT_ANALYZERS)
            .collect()
            .await;

        let mut outcome = ReviewOutcome::default();
        for (service, result) in results {
            match result {
                Ok(records) => outcome.records.extend(records),
                Err(e) => {
                    tracing::warn!(
                        "{} review failed in Resource Group {}: {:#}",
                        service,
                        resource_group,
                        e
                    );
                    outcome.failures.push(ReviewFailure {
                        resource_group: resource_group.to_string(),
                        service: service.to_string(),
                        message: format_arm_error(&e),
                    });
                }
            }
        }

        outcome
    }

    /// Review resource groups one after the other
    pub async fn review_all(&self, resource_groups: &[String]) -> ReviewOutcome {
        let mut outcome = ReviewOutcome::default();
        for resource_group in resource_groups {
            outcome.extend(self.review_resource_group(resource_group).await);
        }

        tracing::info!(
            "Reviewed {} resource groups: {} records, {} failures",
            resource_groups.len(),
            outcome.records.len(),
            outcome.failures.len()
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::Sla;
    use anyhow::Result;
    use async_trait::async_trait;

    struct FixedAnalyzer {
        name: &'static str,
        records: usize,
        fail: bool,
    }

    fn record(service: &str, resource_group: &str) -> AdvisoryRecord {
        AdvisoryRecord {
            subscription_id: "sub".to_string(),
            resource_group: resource_group.to_string(),
            service_name: service.to_string(),
            resource_type: "Microsoft.Test/things".to_string(),
            location: "westeurope".to_string(),
            sku: "Standard".to_string(),
            sla_tier: Sla::ThreeNines,
            availability_zones: false,
            private_endpoints: false,
            diagnostic_settings: false,
            naming_convention_compliant: false,
        }
    }

    #[async_trait]
    impl ServiceAnalyzer for FixedAnalyzer {
        fn service_name(&self) -> &'static str {
            self.name
        }

        async fn review(&self, resource_group: &str) -> Result<Vec<AdvisoryRecord>> {
            if self.fail {
                return Err(anyhow::anyhow!("API request failed: 403 Forbidden"));
            }
            Ok((0..self.records)
                .map(|_| record(self.name, resource_group))
                .collect())
        }
    }

    fn runner() -> ReviewRunner {
        ReviewRunner::new(vec![
            Box::new(FixedAnalyzer {
                name: "a",
                records: 2,
                fail: false,
            }),
            Box::new(FixedAnalyzer {
                name: "b",
                records: 0,
                fail: true,
            }),
            Box::new(FixedAnalyzer {
                name: "c",
                records: 1,
                fail: false,
            }),
        ])
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_other_analyzers() {
        let outcome = runner().review_resource_group("rg").await;

        let services: Vec<_> = outcome.records.iter().map(|r| r.service_name.as_str()).collect();
        assert_eq!(services, vec!["a", "a", "c"]);

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].service, "b");
        assert_eq!(outcome.failures[0].resource_group, "rg");
        assert!(outcome.failures[0].message.starts_with("Permission denied"));
    }

    #[tokio::test]
    async fn test_review_all_concatenates_groups() {
        let groups = vec!["rg1".to_string(), "rg2".to_string()];
        let outcome = runner().review_all(&groups).await;

        assert_eq!(outcome.records.len(), 6);
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(outcome.records[0].resource_group, "rg1");
        assert_eq!(outcome.records[5].resource_group, "rg2");
    }

    #[test]
    fn test_report_carries_outcome() {
        let outcome = tokio_test::block_on(runner().review_resource_group("rg"));
        let report = ReviewReport::new("sub", outcome);

        assert_eq!(report.records.len(), 3);
        assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["subscriptionId"], "sub");
        assert_eq!(value["failures"][0]["service"], "b");
    }
}
