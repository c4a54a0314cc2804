//! New Relic NerdGraph client
//!
//! Builds the fixed NRQL GraphQL document, sends it upstream and normalizes
//! the nested response into a `QueryResult`.

pub mod client;
pub mod error;
pub mod executor;
pub mod query;
pub mod response;

// Re-export commonly used types
pub use client::{NrqlClient, DEFAULT_GRAPHQL_URL, REQUEST_TIMEOUT};
pub use error::NrqlError;
pub use executor::QueryExecutor;
