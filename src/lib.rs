//! # finance-pipeline
//!
//! Equity market data service. Quotes, price history and company profiles
//! are pulled from Yahoo Finance, appended to a relational store
//! (PostgreSQL) and a wide-column store (Cassandra), and served over a small
//! JSON HTTP API together with a naive linear-trend forecast.
//!
//! ## Layout
//!
//! - [`application`]: configuration, the market data client, the forecast
//!   and the persistence fan-out
//! - [`model`]: provider wire types and the HTTP transport
//! - [`presentation`]: the records returned to API callers
//! - [`storage`]: the PostgreSQL and Cassandra sinks
//! - [`server`]: the axum router and handlers
//! - [`utils`]: environment and logging helpers
//!
//! ## Example
//!
//! ```ignore
//! use finance_pipeline::prelude::*;
//!
//! let config = Config::new();
//! let provider = Arc::new(YahooClient::new(config.provider.clone())?);
//! let value = provider.quote("AAPL").await?;
//! ```

/// Application layer: config, services and interfaces
pub mod application;
/// Global constants
pub mod constants;
/// Error type shared by the whole crate
pub mod error;
/// Provider wire models and transport
pub mod model;
/// Convenience re-exports
pub mod prelude;
/// API-facing records
pub mod presentation;
/// HTTP façade
pub mod server;
/// Persistence sinks
pub mod storage;
/// Environment and logging helpers
pub mod utils;

/// Crate version, taken from Cargo metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
