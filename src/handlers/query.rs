// POST /query and POST /query/stream handlers

use crate::models::{QueryRequest, QueryResponse};
use crate::newrelic::QueryExecutor;
use crate::sse::create_sse_event;
use crate::state::AppState;
use crate::streamer::EventStreamer;
use futures_util::stream::StreamExt;
use std::sync::Arc;
use warp::reply::Response;
use warp::{Rejection, Reply};

use super::rejection::InvalidQuery;

fn validate(request: &QueryRequest) -> Result<(), Rejection> {
    if request.query.trim().is_empty() {
        return Err(warp::reject::custom(InvalidQuery::new(
            "Field 'query' must not be empty",
        )));
    }
    Ok(())
}

async fn run_query(executor: Arc<dyn QueryExecutor>, request: &QueryRequest) -> QueryResponse {
    let result = executor.execute(&request.query, request.account_id()).await;
    QueryResponse::from(result)
}

pub async fn query_handler(
    request: QueryRequest,
    state: AppState,
) -> Result<impl warp::Reply, Rejection> {
    let executor = state.executor()?;
    validate(&request)?;
    tracing::info!(query = %request.query, "POST /query");

    let response = run_query(executor, &request).await;
    Ok(warp::reply::json(&response))
}

/// Streams the query as SSE, or answers like `/query` when `stream` is false.
///
/// Frames are written by warp as `event:<name>\ndata:<json>\n\n`, with no
/// space after the colon. Empty `:` comment frames are sent as keep-alives
/// while the upstream call is pending. Clients should parse SSE per the
/// standard (optional single space, comments ignored) rather than match a
/// literal `data: ` prefix.
pub async fn stream_query_handler(
    request: QueryRequest,
    state: AppState,
) -> Result<Response, Rejection> {
    let executor = state.executor()?;
    validate(&request)?;

    if !request.stream {
        tracing::info!(query = %request.query, "POST /query/stream (non-streaming)");
        let response = run_query(executor, &request).await;
        return Ok(warp::reply::json(&response).into_response());
    }

    tracing::info!(query = %request.query, "POST /query/stream");

    let streamer = EventStreamer::new(executor).with_item_delay(state.item_delay());

    let account_id = request.account_id().map(str::to_string);
    let event_stream = streamer.stream(request.query, account_id).map(create_sse_event);

    let reply = warp::sse::reply(warp::sse::keep_alive().stream(
        sync_wrapper::SyncStream::new(Box::pin(event_stream)),
    ));
    Ok(warp::reply::with_header(reply, "connection", "keep-alive").into_response())
}
