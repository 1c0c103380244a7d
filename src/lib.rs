//! Azure Quick Review
//!
//! Reviews the resources deployed in Azure resource groups and reports their
//! reliability posture: SLA tier, availability zone usage, private endpoints,
//! diagnostic settings and naming convention compliance.
//!
//! # Module Structure
//!
//! - [`analyzers`] - Per-service rule tables and the shared review skeleton
//! - [`resource`] - Resource listing and diagnostic settings collaborators
//! - [`azure`] - Authentication and ARM HTTP client
//! - [`review`] - Runs the analyzers across resource groups
//! - [`config`] - Persistent user defaults

pub mod analyzers;
pub mod azure;
pub mod config;
pub mod resource;
pub mod review;

pub use analyzers::{AdvisoryRecord, ServiceAnalyzer, ServiceKind, Sla};
pub use review::{ReviewContext, ReviewReport, ReviewRunner};
