//! ClickUp API interaction module
//!
//! This module provides the core functionality for talking to the ClickUp
//! v2 REST API: building requests, sending them with the stored token,
//! paging through task listings, finding entities by name, and trimming
//! responses before display.
//!
//! # Module Structure
//!
//! - [`client`] - Main client holding the base URL and token
//! - [`http`] - HTTP transport and response handling
//! - [`request`] - Endpoints, query parameters and request bodies
//! - [`models`] - Typed records for teams, spaces, folders, lists and tasks
//! - [`filter`] - Task listing filters
//! - [`paginate`] - Page-by-page task collection
//! - [`lookup`] - Name-based entity lookup
//! - [`shape`] - Optional-field trimming
//!
//! # Example
//!
//! ```ignore
//! use clicli::clickup::{client::ClickupClient, request::{ApiRequest, Endpoint}};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ClickupClient::new(clicli::clickup::client::DEFAULT_BASE_URL, "pk_123")?;
//!     let teams = client.send(&ApiRequest::get(Endpoint::Teams)).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod filter;
pub mod http;
pub mod lookup;
pub mod models;
pub mod paginate;
pub mod request;
pub mod shape;
