//! Property-based tests using proptest
//!
//! These tests check the request descriptors built for every resource
//! collection: verbs, paths and payload placement for arbitrary ids, filters
//! and payloads.

use adminctl::api::{HttpMethod, Query};
use adminctl::resource::{get_all_resource_keys, get_resource, ResourceApi, ResourceId};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Every registered collection
fn collections() -> Vec<ResourceApi<'static>> {
    get_all_resource_keys()
        .into_iter()
        .filter_map(get_resource)
        .map(|def| def.api())
        .collect()
}

/// Arbitrary identifier: numeric or textual
fn arb_id() -> impl Strategy<Value = ResourceId> {
    prop_oneof![
        any::<i64>().prop_map(ResourceId::Number),
        "[A-Za-z0-9_-]{1,24}".prop_map(ResourceId::Text),
    ]
}

/// Arbitrary filter mapping with non-empty string values
fn arb_query() -> impl Strategy<Value = Query> {
    prop::collection::btree_map("[a-zA-Z][a-zA-Z0-9]{0,11}", "[^\\x00-\\x1f]{1,16}", 0..8)
        .prop_map(|map| {
            map.into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect()
        })
}

/// Arbitrary record payload
fn arb_payload() -> impl Strategy<Value = Value> {
    (
        any::<i64>(),
        "[a-zA-Z ]{0,30}",
        prop_oneof![Just("open"), Just("closed"), Just("pending")],
        any::<bool>(),
    )
        .prop_map(|(id, title, status, urgent)| {
            json!({"id": id, "title": title, "status": status, "urgent": urgent})
        })
}

proptest! {
    /// get(id) is one GET on {base}/{id} with no query and no body
    #[test]
    fn get_targets_item_path(id in arb_id()) {
        for api in collections() {
            let request = api.get_request(id.clone());
            prop_assert_eq!(request.method, HttpMethod::Get);
            prop_assert_eq!(&request.url, &format!("{}/{}", api.base_path(), id));
            prop_assert!(request.params.is_none());
            prop_assert!(request.data.is_none());
        }
    }

    /// delete(id) is one DELETE on {base}/{id} with no body
    #[test]
    fn delete_targets_item_path(id in arb_id()) {
        for api in collections() {
            let request = api.delete_request(id.clone());
            prop_assert_eq!(request.method, HttpMethod::Delete);
            prop_assert_eq!(&request.url, &format!("{}/{}", api.base_path(), id));
            prop_assert!(request.data.is_none());
        }
    }

    /// list(q) keeps q exactly, and the encoded query decodes back to q
    #[test]
    fn list_passes_query_through(query in arb_query()) {
        for api in collections() {
            let request = api.list_request(query.clone());
            prop_assert_eq!(request.method, HttpMethod::Get);
            prop_assert_eq!(&request.url, &format!("{}/list", api.base_path()));
            prop_assert_eq!(request.params.as_ref(), Some(&query));

            let encoded = request.query_string();
            let decoded: Query = url::form_urlencoded::parse(encoded.as_bytes())
                .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
                .collect();
            prop_assert_eq!(decoded, query.clone());
        }
    }

    /// add(d) and update(d) carry d as the body, untouched, on the base path
    #[test]
    fn add_and_update_carry_payload(payload in arb_payload()) {
        for api in collections() {
            let add = api.add_request(payload.clone());
            prop_assert_eq!(add.method, HttpMethod::Post);
            prop_assert_eq!(&add.url, &api.base_path());
            prop_assert_eq!(add.data.as_ref(), Some(&payload));
            prop_assert!(add.params.is_none());

            let update = api.update_request(payload.clone());
            prop_assert_eq!(update.method, HttpMethod::Put);
            prop_assert_eq!(&update.url, &api.base_path());
            prop_assert_eq!(update.data.as_ref(), Some(&payload));
        }
    }

    /// Same arguments, same descriptor
    #[test]
    fn descriptors_are_idempotent(id in arb_id(), query in arb_query()) {
        for api in collections() {
            prop_assert_eq!(api.get_request(id.clone()), api.get_request(id.clone()));
            prop_assert_eq!(api.delete_request(id.clone()), api.delete_request(id.clone()));
            prop_assert_eq!(api.list_request(query.clone()), api.list_request(query.clone()));
        }
    }

    /// The absolute URL parses and keeps the descriptor path under the base prefix
    #[test]
    fn full_url_keeps_path(id in any::<i64>(), prefix in "(/[a-z]{1,8}){0,2}") {
        for api in collections() {
            let request = api.get_request(id);
            let base = format!("http://localhost:8080{}", prefix);
            let parsed = url::Url::parse(&request.full_url(&base)).unwrap();
            prop_assert_eq!(parsed.path(), format!("{}{}", prefix, request.url));
        }
    }
}

/// Batch identifiers
mod batch_id_tests {
    use super::*;

    proptest! {
        /// A list of ids renders as one comma-joined segment
        #[test]
        fn batch_ids_join_with_commas(ids in prop::collection::vec(any::<i64>(), 1..10)) {
            let expected = ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let rendered = ResourceId::from(ids).to_string();
            prop_assert_eq!(rendered, expected);
        }

        /// Parsing an integer string keeps it numeric
        #[test]
        fn parse_integer_is_numeric(id in any::<i64>()) {
            prop_assert_eq!(ResourceId::parse(&id.to_string()), ResourceId::Number(id));
        }

        #[test]
        fn parsed_digits_render_unchanged(input in "[+-]?[0-9]{1,12}") {
            prop_assert_eq!(ResourceId::parse(&input).to_string(), input);
        }
    }
}
