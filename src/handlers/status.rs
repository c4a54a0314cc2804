// GET / and GET /health handlers

use crate::models::{timestamp, HealthResponse, RootResponse};
use crate::state::AppState;
use std::convert::Infallible;

pub const SERVICE_NAME: &str = "NewRelic SSE Agent";

pub async fn root_handler() -> Result<impl warp::Reply, Infallible> {
    let response = RootResponse {
        service: SERVICE_NAME.to_string(),
        status: "running".to_string(),
        timestamp: timestamp(),
    };

    Ok(warp::reply::json(&response))
}

/// Reports configuration presence only; upstream is never contacted
pub async fn health_handler(state: AppState) -> Result<impl warp::Reply, Infallible> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        api_key_configured: state.api_key_configured(),
        account_id_configured: state.account_id_configured(),
        timestamp: timestamp(),
    };

    Ok(warp::reply::json(&response))
}
