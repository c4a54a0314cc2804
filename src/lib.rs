// HTTP Server modules
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sse;
pub mod state;
pub mod streamer;

// Process configuration and logging
pub mod config;
pub mod logging;

// New Relic NerdGraph client
pub mod newrelic;
