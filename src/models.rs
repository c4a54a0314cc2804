// Data structures (requests, results, SSE payloads)

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current UTC time as an ISO-8601 string, the format every payload uses
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

// Request Types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default = "default_stream")]
    pub stream: bool,
}

fn default_stream() -> bool {
    true
}

impl QueryRequest {
    /// Account override, treating an empty string the same as an absent one
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref().filter(|id| !id.is_empty())
    }
}

// Query Status Enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Success,
    Error,
}

/// Normalized outcome of one NRQL query.
///
/// `data` is `Some` only on success and `error` only on failure; the echo
/// fields (`query`, `account_id`, `result_count`) are only filled in on success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResult {
    pub status: QueryStatus,
    pub data: Option<Vec<Value>>,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<usize>,
}

impl QueryResult {
    pub fn success(results: Vec<Value>, query: &str, account_id: &str) -> Self {
        Self {
            status: QueryStatus::Success,
            result_count: Some(results.len()),
            data: Some(results),
            error: None,
            query: Some(query.to_string()),
            account_id: Some(account_id.to_string()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: QueryStatus::Error,
            data: None,
            error: Some(error.into()),
            query: None,
            account_id: None,
            result_count: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    /// Result rows, empty for failed queries
    pub fn items(&self) -> &[Value] {
        self.data.as_deref().unwrap_or_default()
    }
}

// Response Types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub status: QueryStatus,
    pub data: Option<Vec<Value>>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl From<QueryResult> for QueryResponse {
    fn from(result: QueryResult) -> Self {
        Self {
            status: result.status,
            data: result.data,
            error: result.error,
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub service: String,
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_key_configured: bool,
    pub account_id_configured: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryExample {
    pub title: String,
    pub query: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamplesResponse {
    pub examples: Vec<QueryExample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub endpoint: String,
    pub method: String,
    pub description: String,
    pub streaming: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDescriptor>,
}

/// Body of every non-2xx response produced by the service itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

// SSE Event Payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryStartPayload {
    pub query: String,
    pub account_id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataItemPayload {
    pub index: usize,
    pub item: Value,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryCompletePayload {
    pub status: QueryStatus,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_request_defaults() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"query":"SELECT * FROM Transaction"}"#).unwrap();
        assert_eq!(request.query, "SELECT * FROM Transaction");
        assert!(request.stream);
        assert_eq!(request.account_id(), None);
    }

    #[test]
    fn test_query_request_empty_account_is_absent() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"query":"q","account_id":"","stream":false}"#).unwrap();
        assert_eq!(request.account_id(), None);
        assert!(!request.stream);

        let request: QueryRequest =
            serde_json::from_str(r#"{"query":"q","account_id":null}"#).unwrap();
        assert_eq!(request.account_id(), None);

        let request: QueryRequest =
            serde_json::from_str(r#"{"query":"q","account_id":"42"}"#).unwrap();
        assert_eq!(request.account_id(), Some("42"));
    }

    #[test]
    fn test_query_request_requires_query() {
        let result = serde_json::from_str::<QueryRequest>(r#"{"account_id":"42"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_query_status_serialization() {
        assert_eq!(
            serde_json::to_string(&QueryStatus::Success).unwrap(),
            r#""success""#
        );
        assert_eq!(
            serde_json::to_string(&QueryStatus::Error).unwrap(),
            r#""error""#
        );
    }

    #[test]
    fn test_success_result_serialization() {
        let result = QueryResult::success(vec![json!({"count": 3})], "SELECT 1", "123");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"][0]["count"], 3);
        assert!(value["error"].is_null());
        assert_eq!(value["query"], "SELECT 1");
        assert_eq!(value["account_id"], "123");
        assert_eq!(value["result_count"], 1);
    }

    #[test]
    fn test_failure_result_serialization() {
        let result = QueryResult::failure("HTTP 500: boom");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "HTTP 500: boom");
        assert!(value["data"].is_null());
        // Echo fields are only present on success
        assert!(value.get("query").is_none());
        assert!(value.get("result_count").is_none());
        assert!(result.items().is_empty());
    }

    #[test]
    fn test_query_response_from_result() {
        let response = QueryResponse::from(QueryResult::success(vec![], "q", "1"));
        assert_eq!(response.status, QueryStatus::Success);
        assert_eq!(response.data, Some(vec![]));
        assert!(response.error.is_none());
        assert!(!response.timestamp.is_empty());
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let ts = timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
