//! Admin API transport
//!
//! The request utility every resource operation goes through: it resolves the
//! base URL, injects the bearer token, encodes query parameters and
//! interprets the response envelope.
//!
//! # Module Structure
//!
//! - [`request`] - Request descriptors and query encoding
//! - [`http`] - HTTP transport and response interpretation
//! - [`client`] - Client bundling transport, base URL and token
//! - [`response`] - Helpers for list and single-record envelopes
//!
//! # Example
//!
//! ```ignore
//! use adminctl::api::{ApiClient, RequestConfig};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://localhost:8080")?.with_token("secret");
//!     let record = client.request(RequestConfig::get("/storage/manage/42")).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod request;
pub mod response;

pub use client::ApiClient;
pub use http::format_api_error;
pub use request::{HttpMethod, Query, RequestConfig};
pub use response::{extract_data, TableData};
