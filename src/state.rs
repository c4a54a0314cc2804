use std::sync::Arc;
use std::time::Duration;
use warp::Rejection;

use crate::handlers::AgentNotInitialized;
use crate::newrelic::QueryExecutor;
use crate::streamer::DATA_ITEM_DELAY;

/// Shared, read-only state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    executor: Option<Arc<dyn QueryExecutor>>,
    api_key_configured: bool,
    account_id_configured: bool,
    item_delay: Duration,
}

impl AppState {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        api_key_configured: bool,
        account_id_configured: bool,
    ) -> Self {
        Self {
            executor: Some(executor),
            api_key_configured,
            account_id_configured,
            item_delay: DATA_ITEM_DELAY,
        }
    }

    /// State for a process whose upstream client could not be created.
    /// Query routes answer 500 while the static routes keep working.
    pub fn uninitialized(api_key_configured: bool, account_id_configured: bool) -> Self {
        Self {
            executor: None,
            api_key_configured,
            account_id_configured,
            item_delay: DATA_ITEM_DELAY,
        }
    }

    /// Override the pause between streamed `data_item` events
    pub fn with_item_delay(mut self, item_delay: Duration) -> Self {
        self.item_delay = item_delay;
        self
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key_configured
    }

    pub fn account_id_configured(&self) -> bool {
        self.account_id_configured
    }

    pub fn executor(&self) -> Result<Arc<dyn QueryExecutor>, Rejection> {
        self.executor
            .clone()
            .ok_or_else(|| warp::reject::custom(AgentNotInitialized))
    }

    pub fn item_delay(&self) -> Duration {
        self.item_delay
    }
}
