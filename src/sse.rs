use std::convert::Infallible;
use warp::sse::Event;

use crate::streamer::QueryEvent;

/// Convert a query stream event into a warp SSE event.
///
/// The payload is written as single-line JSON on the `data:` line.
pub fn create_sse_event(event: QueryEvent) -> Result<Event, Infallible> {
    Ok(Event::default()
        .event(event.event.as_str())
        .data(event.data.to_string()))
}
