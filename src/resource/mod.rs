//! Resource abstraction layer
//!
//! Resource collections of the admin backend and the CRUD operations bound to
//! them. Collections are declared as data in `src/resources/*.json`; each one
//! gets the same five operations from [`ResourceApi`].
//!
//! # Architecture
//!
//! - [`registry`] - Loads and caches collection definitions from embedded JSON
//! - [`crud`] - The list / get / add / update / delete bindings
//! - [`storage`] - Named operations for warehouse records
//! - [`workorder`] - Named operations for work orders
//!
//! # Example
//!
//! ```ignore
//! use adminctl::api::ApiClient;
//! use adminctl::resource::workorder::list_order;
//!
//! async fn open_orders(client: &ApiClient) -> anyhow::Result<serde_json::Value> {
//!     let query = serde_json::json!({"status": "open"});
//!     list_order(client, query.as_object().cloned().unwrap_or_default()).await
//! }
//! ```

mod crud;
mod id;
mod registry;
pub mod storage;
pub mod workorder;

pub use crud::ResourceApi;
pub use id::ResourceId;
pub use registry::*;
