// GET /examples and GET /tools handlers

use crate::models::{ExamplesResponse, QueryExample, ToolDescriptor, ToolsResponse};
use std::convert::Infallible;

fn example(title: &str, query: &str, description: &str) -> QueryExample {
    QueryExample {
        title: title.to_string(),
        query: query.to_string(),
        description: description.to_string(),
    }
}

pub fn query_examples() -> Vec<QueryExample> {
    vec![
        example(
            "Recent Transactions",
            "SELECT * FROM Transaction SINCE 1 hour ago LIMIT 10",
            "Get recent transactions from the last hour",
        ),
        example(
            "Error Analysis",
            "SELECT * FROM Transaction WHERE error IS TRUE SINCE 1 hour ago LIMIT 10",
            "Find transactions with errors",
        ),
        example(
            "Performance Analysis",
            "SELECT average(duration) FROM Transaction FACET name ORDER BY average(duration) DESC LIMIT 5",
            "Get slowest endpoints by average duration",
        ),
        example(
            "Log Analysis",
            "SELECT * FROM Log WHERE level = 'ERROR' SINCE 30 minutes ago LIMIT 20",
            "Get recent error logs",
        ),
        example(
            "Infrastructure Metrics",
            "SELECT average(cpuPercent) FROM SystemSample FACET hostname SINCE 1 hour ago",
            "Get CPU usage by host",
        ),
    ]
}

pub fn available_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "query".to_string(),
            endpoint: "/query".to_string(),
            method: "POST".to_string(),
            description: "Execute NRQL query (non-streaming)".to_string(),
            streaming: false,
        },
        ToolDescriptor {
            name: "stream_query".to_string(),
            endpoint: "/query/stream".to_string(),
            method: "POST".to_string(),
            description: "Execute NRQL query with SSE streaming".to_string(),
            streaming: true,
        },
    ]
}

pub async fn examples_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&ExamplesResponse {
        examples: query_examples(),
    }))
}

pub async fn tools_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&ToolsResponse {
        tools: available_tools(),
    }))
}
