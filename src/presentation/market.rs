use crate::error::AppError;
use crate::presentation::serialization::datetime_format;
use chrono::{NaiveDate, NaiveDateTime};
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};

/// Latest price of a ticker with its session change
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// Ticker symbol
    pub ticker: String,
    /// Last close of the session
    pub price: f64,
    /// Trading currency
    pub currency: String,
    /// When the quote was fetched
    #[serde(with = "datetime_format")]
    pub timestamp: NaiveDateTime,
    /// Close minus open of the session
    pub change: f64,
    /// Change relative to the open, in percent
    pub change_percent: f64,
}

impl Quote {
    /// Builds a quote from the session open and close
    ///
    /// `change = close - open` and `change_percent = change / open * 100`.
    /// A zero open makes the percentage undefined and is rejected rather than
    /// reported as infinity.
    pub fn from_session(
        ticker: &str,
        open: f64,
        close: f64,
        currency: String,
        timestamp: NaiveDateTime,
    ) -> Result<Self, AppError> {
        if open == 0.0 {
            return Err(AppError::InvalidQuote(format!(
                "open price is zero for {ticker}; change percent is undefined"
            )));
        }
        if !open.is_finite() || !close.is_finite() {
            return Err(AppError::InvalidQuote(format!(
                "session prices for {ticker} are not finite"
            )));
        }

        let change = close - open;
        Ok(Self {
            ticker: ticker.to_string(),
            price: close,
            currency,
            timestamp,
            change,
            change_percent: change / open * 100.0,
        })
    }
}

/// One OHLCV bar
///
/// Keys are the capitalized column names of a pandas history frame
/// (`Date`, `Open`, ..., `Stock Splits`), which the dashboard reads.
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct HistoricalBar {
    /// Bar open time, exchange local
    #[serde(rename = "Date", with = "datetime_format")]
    pub date: NaiveDateTime,
    /// Open price
    #[serde(rename = "Open")]
    pub open: f64,
    /// High price
    #[serde(rename = "High")]
    pub high: f64,
    /// Low price
    #[serde(rename = "Low")]
    pub low: f64,
    /// Close price
    #[serde(rename = "Close")]
    pub close: f64,
    /// Traded volume
    #[serde(rename = "Volume")]
    pub volume: u64,
    /// Split ratio effective on this bar, 0 when none
    #[serde(rename = "Stock Splits")]
    pub stock_splits: f64,
    /// Dividend paid on this bar, 0 when none
    #[serde(rename = "Dividends")]
    pub dividends: f64,
}

/// Price history of one ticker, as returned by `/api/historical`
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct HistoricalData {
    /// Ticker symbol
    pub ticker: String,
    /// Requested range
    pub period: String,
    /// Requested bar size
    pub interval: String,
    /// Bars in ascending date order
    pub data: Vec<HistoricalBar>,
}

/// Point-in-time company profile
#[derive(Debug, Clone, Default, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct CompanyInfo {
    /// Ticker symbol
    pub ticker: String,
    /// Short company name
    pub name: String,
    /// Sector
    pub sector: String,
    /// Industry
    pub industry: String,
    /// Country
    pub country: String,
    /// Website
    pub website: String,
    /// Market capitalization
    pub market_cap: i64,
    /// Full-time employees
    #[serde(rename = "employees")]
    pub employee_count: i64,
    /// Business summary
    pub description: String,
}

/// One extrapolated close
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    /// Day of the prediction
    pub date: NaiveDate,
    /// Value of the fitted line on that day
    pub predicted_close: f64,
}

/// Response of `/api/predict`
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    /// Ticker symbol
    pub ticker: String,
    /// Predictions in date order
    pub predictions: Vec<ForecastPoint>,
}

/// Uniform failure shape `{error: message}`
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderFailure {
    /// What went wrong
    pub error: String,
}

impl From<&AppError> for ProviderFailure {
    fn from(error: &AppError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Either a fetched record or the failure that replaced it
///
/// Serializes untagged: the record itself, or `{error}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Fetched<T> {
    /// The provider answered
    Ok(T),
    /// The provider failed
    Err(ProviderFailure),
}

impl<T> Fetched<T> {
    /// Whether this holds a record
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Fetched::Ok(_))
    }

    /// The record, if any
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Fetched::Ok(value) => Some(value),
            Fetched::Err(_) => None,
        }
    }
}

impl<T> From<Result<T, AppError>> for Fetched<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(value) => Fetched::Ok(value),
            Err(e) => Fetched::Err(ProviderFailure::from(&e)),
        }
    }
}
