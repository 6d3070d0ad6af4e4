//! Storage manage: warehouse records
//!
//! Records are identified by `storageId`.

use super::crud::ResourceApi;
use super::id::ResourceId;
use crate::api::{ApiClient, Query};
use anyhow::Result;
use serde_json::Value;

pub const MANAGE: ResourceApi<'static> = ResourceApi::new("storage", "manage");

/// Query the warehouse list
pub async fn list_manage(client: &ApiClient, query: Query) -> Result<Value> {
    MANAGE.list(client, query).await
}

/// Fetch one warehouse
pub async fn get_manage(client: &ApiClient, storage_id: impl Into<ResourceId>) -> Result<Value> {
    MANAGE.get(client, storage_id).await
}

/// Create a warehouse
pub async fn add_manage(client: &ApiClient, data: Value) -> Result<Value> {
    MANAGE.add(client, data).await
}

/// Update a warehouse
pub async fn update_manage(client: &ApiClient, data: Value) -> Result<Value> {
    MANAGE.update(client, data).await
}

/// Delete one or more warehouses
pub async fn del_manage(client: &ApiClient, storage_id: impl Into<ResourceId>) -> Result<Value> {
    MANAGE.delete(client, storage_id).await
}
