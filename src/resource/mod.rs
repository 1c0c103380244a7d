//! Resource collaborators
//!
//! The analyzers never talk to ARM directly. They receive a
//! [`ResourceLister`] and a [`DiagnosticsSettingsChecker`] at construction,
//! so tests swap in in-memory implementations of the same traits.
//!
//! # Architecture
//!
//! - [`fetcher`] - Lists resources of one provider type with `nextLink` pagination
//! - [`diagnostics`] - Looks up diagnostic settings attached to a resource

pub mod diagnostics;
pub mod fetcher;

pub use diagnostics::{ArmDiagnosticsSettings, DiagnosticsSettingsChecker};
pub use fetcher::{fetch_all_pages, ArmResourceLister, ResourceLister};
