//! Executor trait for NRQL query backends

use async_trait::async_trait;

use crate::models::QueryResult;

/// Runs one NRQL query and normalizes the outcome.
///
/// Implementations never fail: every upstream problem is folded into a
/// `QueryResult` with `status = error`.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Account used when a request does not name one
    fn default_account_id(&self) -> &str;

    /// Execute `query` against `account_id`, or the default account when `None`
    async fn execute(&self, query: &str, account_id: Option<&str>) -> QueryResult;

    /// Resolve an optional account override to the account actually queried
    fn resolve_account_id<'a>(&'a self, account_id: Option<&'a str>) -> &'a str {
        account_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.default_account_id())
    }
}
