use crate::error::AppError;
use crate::presentation::market::{CompanyInfo, Fetched, HistoricalData, Quote};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Source of normalized market data
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Gets the price history of a ticker
    ///
    /// # Arguments
    /// * `ticker` - Symbol to fetch (e.g. `AAPL`)
    /// * `period` - Range of the series (`1d`, `5d`, `1mo`, `1y`, `max`...)
    /// * `interval` - Bar size (`1m`, `1h`, `1d`, `1wk`...)
    ///
    /// An unknown ticker or an empty series is an error.
    async fn historical(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> Result<HistoricalData, AppError>;

    /// Gets the latest session quote of a ticker, currency resolved from
    /// the provider metadata
    async fn quote(&self, ticker: &str) -> Result<Quote, AppError>;

    /// Gets the company profile of a ticker
    async fn company_info(&self, ticker: &str) -> Result<CompanyInfo, AppError>;

    /// Quotes several tickers one after the other
    ///
    /// Never fails as a whole: a ticker that cannot be quoted maps to its
    /// `{error}` entry.
    async fn quotes(&self, tickers: &[String]) -> BTreeMap<String, Fetched<Quote>> {
        let mut result = BTreeMap::new();
        for ticker in tickers {
            let quote = self.quote(ticker).await;
            result.insert(ticker.clone(), Fetched::from(quote));
        }
        result
    }
}
