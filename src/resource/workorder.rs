//! Workorder order: work order records
//!
//! Records are identified by `orderId`.

use super::crud::ResourceApi;
use super::id::ResourceId;
use crate::api::{ApiClient, Query};
use anyhow::Result;
use serde_json::Value;

pub const ORDER: ResourceApi<'static> = ResourceApi::new("workorder", "order");

/// Query the work order list
pub async fn list_order(client: &ApiClient, query: Query) -> Result<Value> {
    ORDER.list(client, query).await
}

/// Fetch one work order
pub async fn get_order(client: &ApiClient, order_id: impl Into<ResourceId>) -> Result<Value> {
    ORDER.get(client, order_id).await
}

/// Create a work order
pub async fn add_order(client: &ApiClient, data: Value) -> Result<Value> {
    ORDER.add(client, data).await
}

/// Update a work order
pub async fn update_order(client: &ApiClient, data: Value) -> Result<Value> {
    ORDER.update(client, data).await
}

/// Delete one or more work orders
pub async fn del_order(client: &ApiClient, order_id: impl Into<ResourceId>) -> Result<Value> {
    ORDER.delete(client, order_id).await
}
