use async_trait::async_trait;
use nrql_sse_agent::models::QueryResult;
use nrql_sse_agent::newrelic::QueryExecutor;
use nrql_sse_agent::routes::configure_routes;
use nrql_sse_agent::state::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use warp::Filter;

/// Default account of the fake upstream
pub const DEFAULT_ACCOUNT_ID: &str = "1000000";

/// Executor returning a canned result and recording what it was asked
pub struct FakeExecutor {
    result: QueryResult,
    calls: AtomicUsize,
    last_account_id: Mutex<Option<String>>,
}

impl FakeExecutor {
    pub fn returning(result: QueryResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
            last_account_id: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_account_id(&self) -> Option<String> {
        self.last_account_id.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for FakeExecutor {
    fn default_account_id(&self) -> &str {
        DEFAULT_ACCOUNT_ID
    }

    async fn execute(&self, _query: &str, account_id: Option<&str>) -> QueryResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let resolved = self.resolve_account_id(account_id).to_string();
        *self.last_account_id.lock().unwrap() = Some(resolved);
        self.result.clone()
    }
}

/// Routes wired to `executor`, with no pause between streamed items
pub fn routes_with(
    executor: Arc<FakeExecutor>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let state = AppState::new(executor, true, true).with_item_delay(Duration::ZERO);
    configure_routes(state)
}

/// Parse an SSE body into (event name, JSON payload) pairs
pub fn parse_sse(body: &[u8]) -> Vec<(String, serde_json::Value)> {
    let text = std::str::from_utf8(body).expect("SSE body is not UTF-8");
    text.split("\n\n")
        .filter_map(|frame| {
            let mut name = None;
            let mut data = None;
            for line in frame.lines() {
                if let Some(rest) = line.strip_prefix("event:") {
                    name = Some(rest.trim().to_string());
                } else if let Some(rest) = line.strip_prefix("data:") {
                    data = Some(serde_json::from_str(rest.trim()).expect("data is not JSON"));
                }
            }
            Some((name?, data?))
        })
        .collect()
}
