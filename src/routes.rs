// Route definitions and handlers

use crate::handlers;
use crate::models::QueryRequest;
use crate::state::AppState;
use std::convert::Infallible;
use warp::Filter;

/// Largest accepted query request body
const MAX_BODY_BYTES: u64 = 64 * 1024;

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn query_body() -> impl Filter<Extract = (QueryRequest,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

pub fn configure_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // GET /
    let root = warp::path::end()
        .and(warp::get())
        .and_then(handlers::root_handler);

    // GET /health
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::health_handler);

    // POST /query
    let query = warp::path("query")
        .and(warp::path::end())
        .and(warp::post())
        .and(query_body())
        .and(with_state(state.clone()))
        .and_then(handlers::query_handler);

    // POST /query/stream
    let stream_query = warp::path!("query" / "stream")
        .and(warp::post())
        .and(query_body())
        .and(with_state(state))
        .and_then(handlers::stream_query_handler);

    // GET /examples
    let examples = warp::path("examples")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::examples_handler);

    // GET /tools
    let tools = warp::path("tools")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::tools_handler);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type", "cache-control"]);

    // Combine routes
    root.or(health)
        .or(query)
        .or(stream_query)
        .or(examples)
        .or(tools)
        .recover(handlers::handle_rejection)
        .with(cors)
        .with(warp::log("nrql_sse_agent::http"))
}
