//! Response envelopes
//!
//! List endpoints answer `{ code, msg, total, rows }`, single-record endpoints
//! answer `{ code, msg, data }`. These helpers read those shapes without
//! failing on missing fields.

use serde_json::Value;

/// One page of a list response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub total: u64,
    pub rows: Vec<Value>,
}

impl From<&Value> for TableData {
    fn from(value: &Value) -> Self {
        let rows = value
            .get("rows")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let total = value
            .get("total")
            .and_then(|v| v.as_u64())
            .unwrap_or(rows.len() as u64);

        Self { total, rows }
    }
}

/// `data` of a single-record response, or the whole value when absent
pub fn extract_data(value: &Value) -> &Value {
    value.get("data").unwrap_or(value)
}
