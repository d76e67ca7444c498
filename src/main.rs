use finance_pipeline::application::config::Config;
use finance_pipeline::application::interfaces::sink::RecordSink;
use finance_pipeline::application::services::{PersistenceService, YahooClient};
use finance_pipeline::server::{AppState, create_app};
use finance_pipeline::storage::utils::{connect_cassandra, connect_postgres};
use finance_pipeline::utils::logger::setup_logger;
use std::error::Error;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logger();

    let config = Config::new();
    info!("Starting finance-pipeline {}", finance_pipeline::version());
    info!("Server: {}", config.server);
    info!("Provider: {}", config.provider);

    let provider = Arc::new(YahooClient::new(config.provider.clone())?);

    let mut sinks: Vec<Arc<dyn RecordSink>> = Vec::new();
    let mut relational: Option<Arc<dyn RecordSink>> = None;

    match connect_postgres(&config.database, &config.postgres_retry).await {
        Ok(store) => {
            let store: Arc<dyn RecordSink> = Arc::new(store);
            relational = Some(Arc::clone(&store));
            sinks.push(store);
        }
        Err(e) => error!("PostgreSQL unavailable, running without it: {}", e),
    }

    match connect_cassandra(&config.cassandra, &config.cassandra_retry).await {
        Ok(store) => sinks.push(Arc::new(store)),
        Err(e) => error!("Cassandra unavailable, running without it: {}", e),
    }

    info!("{} sink(s) configured", sinks.len());
    let state = AppState::new(provider, PersistenceService::new(sinks), relational);
    let app = create_app(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
