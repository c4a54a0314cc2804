use clap::Parser;
use nrql_sse_agent::config::Config;
use nrql_sse_agent::logging;
use nrql_sse_agent::newrelic::NrqlClient;
use nrql_sse_agent::routes::configure_routes;
use nrql_sse_agent::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    logging::init(&config);

    let credentials = config.validate().inspect_err(|e| {
        tracing::error!(error = %e, "Failed to start agent");
    })?;

    let client = NrqlClient::new(
        config.graphql_url.as_str(),
        &credentials.api_key,
        credentials.account_id.as_str(),
    )
    .inspect_err(|e| {
        tracing::error!(error = %e, "Failed to create NerdGraph client");
    })?;

    let state = AppState::new(
        Arc::new(client),
        config.api_key().is_some(),
        config.account_id().is_some(),
    );
    let routes = configure_routes(state);

    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!(
        endpoint = %config.graphql_url,
        account_id = %credentials.account_id,
        "NewRelic SSE Agent started successfully"
    );
    tracing::info!("Starting server on http://{}", addr);
    warp::serve(routes).run(addr).await;

    Ok(())
}
