/// Naive linear-trend forecast
pub mod forecast;
/// Yahoo Finance market data client
pub mod market_service;
/// Fan-out of records to the configured sinks
pub mod persistence;

pub use forecast::*;
pub use market_service::YahooClient;
pub use persistence::*;
