// Rejection recovery: every failure the service itself produces becomes
// a JSON body of the form {"detail": "..."}

use crate::models::ErrorResponse;
use std::convert::Infallible;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// The upstream client was never created
#[derive(Debug)]
pub struct AgentNotInitialized;

impl warp::reject::Reject for AgentNotInitialized {}

/// The request body parsed but its `query` is unusable
#[derive(Debug)]
pub struct InvalidQuery {
    pub message: String,
}

impl InvalidQuery {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl warp::reject::Reject for InvalidQuery {}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, detail) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(invalid) = err.find::<InvalidQuery>() {
        (StatusCode::UNPROCESSABLE_ENTITY, invalid.message.clone())
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    } else if err.find::<AgentNotInitialized>().is_some() {
        tracing::error!("query rejected: agent not initialized");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Agent not initialized".to_string(),
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Payload Too Large".to_string(),
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            "Length Required".to_string(),
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported Media Type".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed".to_string(),
        )
    } else {
        tracing::error!(?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorResponse { detail }),
        status,
    ))
}
