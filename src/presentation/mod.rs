/// Quotes, bars, company profiles and forecasts
pub mod market;
/// Serialization utilities for API payloads
pub mod serialization;

pub use market::*;
