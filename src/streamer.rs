//! Event streamer
//!
//! Turns one query execution into the fixed SSE sequence:
//! `query_start`, `query_result`, one `data_item` per row, `query_complete`.
//! If building an event fails, a single `error` event replaces the rest of
//! the sequence.

use async_stream::{stream, try_stream};
use futures::stream::Stream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{
    timestamp, DataItemPayload, QueryCompletePayload, QueryStartPayload,
};
use crate::newrelic::QueryExecutor;

/// Pause between consecutive `data_item` events
pub const DATA_ITEM_DELAY: Duration = Duration::from_millis(100);

// SSE Event Types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    QueryStart,
    QueryResult,
    DataItem,
    QueryComplete,
    Error,
}

impl EventKind {
    /// Name written on the SSE `event:` line
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::QueryStart => "query_start",
            EventKind::QueryResult => "query_result",
            EventKind::DataItem => "data_item",
            EventKind::QueryComplete => "query_complete",
            EventKind::Error => "error",
        }
    }
}

/// One event of a query stream.
///
/// Timestamps travel inside `data`; `query_result` carries none of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryEvent {
    pub event: EventKind,
    pub data: Value,
}

impl QueryEvent {
    pub fn new<T: Serialize>(event: EventKind, payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event,
            data: serde_json::to_value(payload)?,
        })
    }

    /// Terminal `error` event
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            event: EventKind::Error,
            data: serde_json::json!({
                "error": message.into(),
                "timestamp": timestamp(),
            }),
        }
    }
}

/// Wraps a `QueryExecutor` into an ordered, finite event sequence
#[derive(Clone)]
pub struct EventStreamer {
    executor: Arc<dyn QueryExecutor>,
    item_delay: Duration,
}

impl EventStreamer {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            executor,
            item_delay: DATA_ITEM_DELAY,
        }
    }

    /// Override the pause between `data_item` events
    pub fn with_item_delay(mut self, item_delay: Duration) -> Self {
        self.item_delay = item_delay;
        self
    }

    /// Stream the events for one query.
    ///
    /// The upstream call runs inside the stream, so dropping the stream
    /// (e.g. on client disconnect) also cancels the in-flight request.
    pub fn stream(
        &self,
        query: String,
        account_id: Option<String>,
    ) -> impl Stream<Item = QueryEvent> + Send + 'static {
        let events = query_events(self.executor.clone(), self.item_delay, query, account_id);
        stop_at_first_error(events)
    }
}

/// Pass events through until the first failure, which is replaced by a
/// single `error` event that ends the stream.
pub fn stop_at_first_error<S, E>(events: S) -> impl Stream<Item = QueryEvent> + Send + 'static
where
    S: Stream<Item = Result<QueryEvent, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    stream! {
        futures::pin_mut!(events);
        while let Some(event) = events.next().await {
            match event {
                Ok(event) => yield event,
                Err(err) => {
                    tracing::error!(error = %err, "Error in query event stream");
                    yield QueryEvent::error(err.to_string());
                    break;
                }
            }
        }
    }
}

fn query_events(
    executor: Arc<dyn QueryExecutor>,
    item_delay: Duration,
    query: String,
    account_id: Option<String>,
) -> impl Stream<Item = Result<QueryEvent, serde_json::Error>> + Send + 'static {
    try_stream! {
        let resolved_account = executor.resolve_account_id(account_id.as_deref()).to_string();

        yield QueryEvent::new(
            EventKind::QueryStart,
            &QueryStartPayload {
                query: query.clone(),
                account_id: resolved_account,
                timestamp: timestamp(),
            },
        )?;

        let result = executor.execute(&query, account_id.as_deref()).await;
        yield QueryEvent::new(EventKind::QueryResult, &result)?;

        if result.is_success() {
            for (index, item) in result.items().iter().enumerate() {
                if index > 0 {
                    tokio::time::sleep(item_delay).await;
                }
                yield QueryEvent::new(
                    EventKind::DataItem,
                    &DataItemPayload {
                        index,
                        item: item.clone(),
                        timestamp: timestamp(),
                    },
                )?;
            }
        }

        yield QueryEvent::new(
            EventKind::QueryComplete,
            &QueryCompletePayload {
                status: result.status,
                timestamp: timestamp(),
            },
        )?;
    }
}
