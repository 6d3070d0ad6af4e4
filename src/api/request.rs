//! Request descriptors
//!
//! A [`RequestConfig`] is everything the transport needs to issue one call:
//! a path relative to the base URL, a verb, optional query parameters and an
//! optional JSON body. Descriptors are plain values, so building one has no
//! side effects and can be inspected (or printed) before sending.

use serde_json::{Map, Value};
use std::fmt;

/// Query parameters: filter field name to filter value
pub type Query = Map<String, Value>;

/// HTTP verbs used by the admin API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One outbound request, before base URL resolution
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    /// Path relative to the base URL, starting with `/`
    pub url: String,
    pub method: HttpMethod,
    /// Query string parameters
    pub params: Option<Query>,
    /// JSON request body
    pub data: Option<Value>,
}

impl RequestConfig {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            params: None,
            data: None,
        }
    }

    pub fn post(url: impl Into<String>, data: Value) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            params: None,
            data: Some(data),
        }
    }

    pub fn put(url: impl Into<String>, data: Value) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Put,
            params: None,
            data: Some(data),
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Delete,
            params: None,
            data: None,
        }
    }

    pub fn with_params(mut self, params: Query) -> Self {
        self.params = Some(params);
        self
    }

    /// Encoded query string, empty when there are no usable parameters
    pub fn query_string(&self) -> String {
        self.params.as_ref().map(encode_params).unwrap_or_default()
    }

    /// Path plus query string, e.g. `/workorder/order/list?status=open`
    pub fn path_and_query(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query)
        }
    }

    /// Absolute URL against `base_url`
    pub fn full_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path_and_query())
    }
}

impl fmt::Display for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path_and_query())
    }
}

/// Encode query parameters the way the admin backend expects them.
///
/// Null and empty-string values are dropped. Objects and arrays are flattened
/// one level into `key[sub]=value` pairs, arrays using the element index as
/// `sub`. Anything nested deeper is sent as its JSON text.
pub fn encode_params(params: &Query) -> String {
    let mut parts: Vec<String> = Vec::new();

    for (key, value) in params {
        match value {
            Value::Object(map) => {
                for (sub, inner) in map {
                    push_pair(&mut parts, &format!("{}[{}]", key, sub), inner);
                }
            }
            Value::Array(items) => {
                for (idx, inner) in items.iter().enumerate() {
                    push_pair(&mut parts, &format!("{}[{}]", key, idx), inner);
                }
            }
            _ => push_pair(&mut parts, key, value),
        }
    }

    parts.join("&")
}

fn push_pair(parts: &mut Vec<String>, key: &str, value: &Value) {
    if let Some(text) = param_text(value) {
        parts.push(format!(
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(&text)
        ));
    }
}

fn param_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(value: Value) -> Query {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_scalar_params_encode_as_pairs() {
        let params = query(json!({"status": "open", "pageNum": 1, "urgent": true}));
        assert_eq!(encode_params(&params), "pageNum=1&status=open&urgent=true");
    }

    #[test]
    fn test_null_and_empty_values_are_skipped() {
        let params = query(json!({"a": null, "b": "", "c": "x"}));
        assert_eq!(encode_params(&params), "c=x");
    }

    #[test]
    fn test_nested_object_flattens_with_brackets() {
        let params = query(json!({
            "params": {"beginTime": "2024-01-01", "endTime": ""}
        }));
        assert_eq!(encode_params(&params), "params%5BbeginTime%5D=2024-01-01");
    }

    #[test]
    fn test_array_flattens_with_indexes() {
        let params = query(json!({"ids": [3, 4]}));
        assert_eq!(encode_params(&params), "ids%5B0%5D=3&ids%5B1%5D=4");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let params = query(json!({"title": "fix pump & valve"}));
        assert_eq!(encode_params(&params), "title=fix%20pump%20%26%20valve");
    }

    #[test]
    fn test_path_and_query_without_params() {
        let request = RequestConfig::get("/storage/manage/42");
        assert_eq!(request.path_and_query(), "/storage/manage/42");
        assert_eq!(request.to_string(), "GET /storage/manage/42");
    }

    #[test]
    fn test_full_url_trims_trailing_slash() {
        let request = RequestConfig::get("/workorder/order/list")
            .with_params(query(json!({"status": "open"})));
        assert_eq!(
            request.full_url("http://localhost:8080/prod-api/"),
            "http://localhost:8080/prod-api/workorder/order/list?status=open"
        );
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(HttpMethod::Put), reqwest::Method::PUT);
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }
}
