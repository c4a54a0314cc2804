//! NerdGraph client implementation

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::models::QueryResult;

use super::error::NrqlError;
use super::executor::QueryExecutor;
use super::query::GraphQlPayload;
use super::response::extract_results;

/// Public NerdGraph endpoint
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.newrelic.com/graphql";

/// Timeout applied to every upstream request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_HEADER: HeaderName = HeaderName::from_static("api-key");

/// Client for running NRQL queries through New Relic's NerdGraph API
#[derive(Clone)]
pub struct NrqlClient {
    /// HTTP client carrying the auth headers and timeout
    http_client: Client,
    /// NerdGraph endpoint URL
    endpoint: String,
    /// Account queried when a request does not specify one
    default_account_id: String,
}

impl NrqlClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: &str,
        default_account_id: impl Into<String>,
    ) -> Result<Self, NrqlError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| NrqlError::Unexpected(format!("Invalid API key header: {}", e)))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                NrqlError::Unexpected(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            default_account_id: default_account_id.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the query and extract the result rows
    async fn run_query(&self, query: &str, account_id: &str) -> Result<Vec<Value>, NrqlError> {
        let payload = GraphQlPayload::new(account_id, query);

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(
                        status = status.as_u16(),
                        error = %err,
                        "failed to read error body"
                    );
                    String::new()
                }
            };
            return Err(NrqlError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        extract_results(&body, account_id)
    }
}

#[async_trait]
impl QueryExecutor for NrqlClient {
    fn default_account_id(&self) -> &str {
        &self.default_account_id
    }

    async fn execute(&self, query: &str, account_id: Option<&str>) -> QueryResult {
        let account_id = self.resolve_account_id(account_id);
        tracing::debug!(account_id, query, "running NRQL query");

        match self.run_query(query, account_id).await {
            Ok(results) => {
                tracing::info!(account_id, count = results.len(), "NRQL query succeeded");
                QueryResult::success(results, query, account_id)
            }
            Err(err) => {
                tracing::error!(account_id, error = %err, "NRQL query failed");
                QueryResult::failure(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client() {
        let client = NrqlClient::new(DEFAULT_GRAPHQL_URL, "NRAK-TEST", "1234").unwrap();
        assert_eq!(client.endpoint(), "https://api.newrelic.com/graphql");
        assert_eq!(client.default_account_id(), "1234");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let result = NrqlClient::new(DEFAULT_GRAPHQL_URL, "bad\nkey", "1234");
        assert!(matches!(result, Err(NrqlError::Unexpected(_))));
    }

    #[test]
    fn test_resolve_account_id() {
        let client = NrqlClient::new(DEFAULT_GRAPHQL_URL, "key", "1234").unwrap();
        assert_eq!(client.resolve_account_id(None), "1234");
        assert_eq!(client.resolve_account_id(Some("")), "1234");
        assert_eq!(client.resolve_account_id(Some("999")), "999");
    }
}
