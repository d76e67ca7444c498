/// Market data provider interface
pub mod market;
/// Persistence sink interface
pub mod sink;
