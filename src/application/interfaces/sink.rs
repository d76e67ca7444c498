use crate::error::AppError;
use crate::presentation::market::{CompanyInfo, HistoricalBar, Quote};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which API route produced a record; selects the target table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// `/api/historical`
    Historical,
    /// `/api/price`
    Price,
    /// `/api/multiple`
    Multiple,
    /// `/api/info`
    Info,
}

impl RouteKind {
    /// Table receiving the records of this route, in both stores
    #[must_use]
    pub fn table(&self) -> &'static str {
        match self {
            RouteKind::Historical => "market_historical_data",
            RouteKind::Price => "stock_price",
            RouteKind::Multiple => "multiple_stock_prices",
            RouteKind::Info => "stock_info",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteKind::Historical => "historical",
            RouteKind::Price => "price",
            RouteKind::Multiple => "multiple",
            RouteKind::Info => "info",
        };
        f.write_str(name)
    }
}

/// A fetched record on its way to the stores
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    /// Price history of one ticker
    Historical {
        /// Ticker the bars belong to
        ticker: &'a str,
        /// Bars to append
        bars: &'a [HistoricalBar],
    },
    /// Quote fetched by `/api/price`
    Price(&'a Quote),
    /// Quote fetched by `/api/multiple`
    Multiple(&'a Quote),
    /// Company profile
    Info(&'a CompanyInfo),
}

impl Record<'_> {
    /// Route that produced the record
    #[must_use]
    pub fn kind(&self) -> RouteKind {
        match self {
            Record::Historical { .. } => RouteKind::Historical,
            Record::Price(_) => RouteKind::Price,
            Record::Multiple(_) => RouteKind::Multiple,
            Record::Info(_) => RouteKind::Info,
        }
    }

    /// Ticker the record belongs to
    #[must_use]
    pub fn ticker(&self) -> &str {
        match self {
            Record::Historical { ticker, .. } => ticker,
            Record::Price(quote) | Record::Multiple(quote) => &quote.ticker,
            Record::Info(info) => &info.ticker,
        }
    }

    /// Rows this record expands to
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self {
            Record::Historical { bars, .. } => bars.len(),
            _ => 1,
        }
    }
}

/// A datastore that appends records
///
/// Each sink owns its failure domain: a failing write must leave the store
/// as it was (or as consistent as the store allows) and must not affect
/// other sinks.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Short name used in logs and health reports
    fn name(&self) -> &str;

    /// Appends the record, returning the number of rows written
    async fn write(&self, record: &Record<'_>) -> Result<usize, AppError>;

    /// Checks that the store answers
    async fn health_check(&self) -> Result<(), AppError>;
}
