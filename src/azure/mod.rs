//! Azure Resource Manager interaction module
//!
//! # Module Structure
//!
//! - [`auth`] - Bearer token acquisition and caching
//! - [`client`] - Main ARM client and URL builders
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use azqr::azure::client::ArmClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ArmClient::from_env()?;
//!     let url = client.resource_group_provider_url(
//!         "00000000-0000-0000-0000-000000000000",
//!         "rg-prod",
//!         "Microsoft.KeyVault/vaults",
//!         "2023-02-01",
//!     )?;
//!     let vaults = client.get(&url).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
