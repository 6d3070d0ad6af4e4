//! Resource Registry - Load resource definitions from JSON
//!
//! This module loads all resource collection definitions from embedded JSON
//! files and provides lookup functions for the rest of the application.

use super::crud::ResourceApi;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded resource JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[
    include_str!("../resources/storage.json"),
    include_str!("../resources/workorder.json"),
];

/// Resource collection definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDef {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// First path segment, e.g. `storage`
    pub domain: String,
    /// Second path segment, e.g. `manage`
    pub resource: String,
    /// Payload field holding the record identifier
    pub id_field: String,
}

impl ResourceDef {
    /// `/{domain}/{resource}`
    pub fn base_path(&self) -> String {
        self.api().base_path()
    }

    /// The five operations bound to this collection
    pub fn api(&self) -> ResourceApi<'_> {
        ResourceApi::new(&self.domain, &self.resource)
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub resources: HashMap<String, ResourceDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ResourceConfig> = OnceLock::new();

/// Get the resource registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ResourceConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = ResourceConfig {
            resources: HashMap::new(),
        };

        for content in RESOURCE_FILES {
            let partial: ResourceConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    })
}

/// Get a resource definition by key
pub fn get_resource(key: &str) -> Option<&'static ResourceDef> {
    get_registry().resources.get(key)
}

/// Get a resource definition by key, failing with the list of known keys
pub fn require_resource(key: &str) -> anyhow::Result<&'static ResourceDef> {
    get_resource(key).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown resource: {} (known: {})",
            key,
            get_all_resource_keys().join(", ")
        )
    })
}

/// Get all resource keys, sorted
pub fn get_all_resource_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = get_registry()
        .resources
        .keys()
        .map(|s| s.as_str())
        .collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads_successfully() {
        let registry = get_registry();
        assert_eq!(registry.resources.len(), 2);
    }

    #[test]
    fn test_storage_manage_resource_exists() {
        let resource = get_resource("storage-manage").expect("storage-manage should exist");
        assert_eq!(resource.domain, "storage");
        assert_eq!(resource.resource, "manage");
        assert_eq!(resource.id_field, "storageId");
        assert_eq!(resource.base_path(), "/storage/manage");
    }

    #[test]
    fn test_workorder_order_resource_exists() {
        let resource = get_resource("workorder-order").expect("workorder-order should exist");
        assert_eq!(resource.id_field, "orderId");
        assert_eq!(resource.base_path(), "/workorder/order");
    }

    #[test]
    fn test_get_all_resource_keys_sorted() {
        assert_eq!(
            get_all_resource_keys(),
            vec!["storage-manage", "workorder-order"]
        );
    }

    #[test]
    fn test_require_unknown_resource_lists_known_keys() {
        let err = require_resource("billing-invoice").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("billing-invoice"));
        assert!(message.contains("storage-manage, workorder-order"));
    }

    #[test]
    fn test_named_bindings_match_registry() {
        assert_eq!(
            crate::resource::storage::MANAGE.base_path(),
            get_resource("storage-manage").unwrap().base_path()
        );
        assert_eq!(
            crate::resource::workorder::ORDER.base_path(),
            get_resource("workorder-order").unwrap().base_path()
        );
    }
}
