//! CRUD bindings for a resource collection
//!
//! Every collection exposes the same five operations over its base path
//! `/{domain}/{resource}`:
//!
//! | Operation | Verb   | Path                 | Payload      |
//! |-----------|--------|----------------------|--------------|
//! | list      | GET    | `{base}/list`        | query string |
//! | get       | GET    | `{base}/{id}`        | none         |
//! | add       | POST   | `{base}`             | body         |
//! | update    | PUT    | `{base}`             | body         |
//! | delete    | DELETE | `{base}/{id}`        | none         |
//!
//! Each operation has a `*_request` form that only builds the descriptor and
//! an async form that sends it. Results and errors come back from the
//! transport untouched.

use super::id::ResourceId;
use crate::api::{ApiClient, Query, RequestConfig};
use anyhow::Result;
use futures::future::join_all;
use serde_json::Value;

/// The five operations bound to one resource collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceApi<'a> {
    domain: &'a str,
    resource: &'a str,
}

impl<'a> ResourceApi<'a> {
    pub const fn new(domain: &'a str, resource: &'a str) -> Self {
        Self { domain, resource }
    }

    pub fn base_path(&self) -> String {
        format!("/{}/{}", self.domain, self.resource)
    }

    fn item_path(&self, id: &ResourceId) -> String {
        format!("{}/{}", self.base_path(), id)
    }

    pub fn list_request(&self, query: Query) -> RequestConfig {
        RequestConfig::get(format!("{}/list", self.base_path())).with_params(query)
    }

    pub fn get_request(&self, id: impl Into<ResourceId>) -> RequestConfig {
        RequestConfig::get(self.item_path(&id.into()))
    }

    pub fn add_request(&self, data: Value) -> RequestConfig {
        RequestConfig::post(self.base_path(), data)
    }

    pub fn update_request(&self, data: Value) -> RequestConfig {
        RequestConfig::put(self.base_path(), data)
    }

    pub fn delete_request(&self, id: impl Into<ResourceId>) -> RequestConfig {
        RequestConfig::delete(self.item_path(&id.into()))
    }

    /// Query the collection with optional filters
    pub async fn list(&self, client: &ApiClient, query: Query) -> Result<Value> {
        client.request(self.list_request(query)).await
    }

    /// Fetch one record
    pub async fn get(&self, client: &ApiClient, id: impl Into<ResourceId>) -> Result<Value> {
        client.request(self.get_request(id)).await
    }

    /// Create a record
    pub async fn add(&self, client: &ApiClient, data: Value) -> Result<Value> {
        client.request(self.add_request(data)).await
    }

    /// Update a record; `data` carries the identifier field
    pub async fn update(&self, client: &ApiClient, data: Value) -> Result<Value> {
        client.request(self.update_request(data)).await
    }

    /// Delete one record, or several when `id` is a list
    pub async fn delete(&self, client: &ApiClient, id: impl Into<ResourceId>) -> Result<Value> {
        client.request(self.delete_request(id)).await
    }

    /// Fetch several records with independent concurrent requests.
    /// Results are in the same order as `ids`.
    pub async fn get_many<I>(&self, client: &ApiClient, ids: I) -> Vec<Result<Value>>
    where
        I: IntoIterator,
        I::Item: Into<ResourceId>,
    {
        let requests = ids.into_iter().map(|id| self.get(client, id));
        join_all(requests).await
    }
}
