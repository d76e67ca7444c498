//! Router construction.

use crate::server::handlers;
use crate::server::state::AppState;
use axum::Router;
use axum::routing::get;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the router with every route, CORS and request tracing
pub fn create_app(state: AppState) -> Router {
    // the dashboard is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/api/historical", get(handlers::get_historical))
        .route("/api/price", get(handlers::get_price))
        .route("/api/multiple", get(handlers::get_multiple))
        .route("/api/info", get(handlers::get_info))
        .route("/api/predict", get(handlers::get_predict))
        .route("/api/test-db", get(handlers::test_db))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
