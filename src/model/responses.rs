//! Yahoo Finance response envelopes.
//!
//! Only the fields the client reads are modelled; everything is optional
//! because the provider omits fields freely and changes its format without
//! notice.

use serde::Deserialize;
use std::collections::HashMap;

/// Error object shared by the chart and quoteSummary envelopes
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProviderErrorBody {
    /// Short code such as `Not Found`
    pub code: String,
    /// Human readable description
    pub description: Option<String>,
}

impl ProviderErrorBody {
    /// Whether the provider says the symbol does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code.eq_ignore_ascii_case("not found")
    }

    /// `code: description` text used in error messages
    #[must_use]
    pub fn message(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => {
                format!("{}: {}", self.code, description)
            }
            _ => self.code.clone(),
        }
    }
}

/// `/v8/finance/chart` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    /// Payload or error
    pub chart: ChartEnvelope,
}

/// Result list or error of a chart call
#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    /// One entry per requested symbol
    pub result: Option<Vec<ChartResult>>,
    /// Set when the symbol is unknown or the parameters are rejected
    pub error: Option<ProviderErrorBody>,
}

/// Series of one symbol
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    /// Exchange metadata (currency, timezone offset)
    pub meta: ChartMeta,
    /// Bar open times, seconds since the epoch
    pub timestamp: Option<Vec<i64>>,
    /// Dividend and split events
    pub events: Option<ChartEvents>,
    /// OHLCV arrays aligned with `timestamp`
    pub indicators: Indicators,
}

/// Chart metadata
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    /// Trading currency
    pub currency: Option<String>,
    /// Symbol as understood by the provider
    pub symbol: Option<String>,
    /// Exchange offset from UTC in seconds
    pub gmtoffset: Option<i32>,
    /// Exchange timezone name (e.g. `America/New_York`)
    pub exchange_timezone_name: Option<String>,
}

/// Corporate actions keyed by the event timestamp
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartEvents {
    /// Cash dividends
    #[serde(default)]
    pub dividends: HashMap<String, DividendEvent>,
    /// Stock splits
    #[serde(default)]
    pub splits: HashMap<String, SplitEvent>,
}

/// One dividend payment
#[derive(Debug, Clone, Deserialize)]
pub struct DividendEvent {
    /// Amount per share
    pub amount: f64,
    /// Ex-date, seconds since the epoch
    pub date: i64,
}

/// One stock split
#[derive(Debug, Clone, Deserialize)]
pub struct SplitEvent {
    /// Effective date, seconds since the epoch
    pub date: i64,
    /// New shares
    pub numerator: f64,
    /// Old shares
    pub denominator: f64,
}

impl SplitEvent {
    /// Split ratio as numerator over denominator (4:1 gives 4.0)
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.denominator == 0.0 {
            0.0
        } else {
            self.numerator / self.denominator
        }
    }
}

/// Indicator block of a chart result
#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    /// OHLCV arrays; the provider sends a one-element list
    #[serde(default)]
    pub quote: Vec<QuoteIndicators>,
}

/// OHLCV arrays; `null` entries mark bars without trades
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteIndicators {
    /// Open prices
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    /// High prices
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    /// Low prices
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    /// Close prices
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    /// Volumes
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

/// `/v10/finance/quoteSummary` envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResponse {
    /// Payload or error
    pub quote_summary: QuoteSummaryEnvelope,
}

/// Result list or error of a quoteSummary call
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryEnvelope {
    /// One entry per symbol
    pub result: Option<Vec<QuoteSummaryResult>>,
    /// Set when the symbol is unknown
    pub error: Option<ProviderErrorBody>,
}

/// Modules requested from quoteSummary
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    /// Price module: names, currency, market cap
    pub price: Option<PriceModule>,
    /// Company profile module
    pub asset_profile: Option<AssetProfile>,
    /// Summary detail module
    pub summary_detail: Option<SummaryDetail>,
}

/// Numeric values come wrapped as `{raw, fmt}`
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
pub struct RawValue {
    /// Unformatted value
    pub raw: Option<f64>,
}

/// `price` module
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    /// Trading currency
    pub currency: Option<String>,
    /// Short display name
    pub short_name: Option<String>,
    /// Full legal name
    pub long_name: Option<String>,
    /// Market capitalization
    pub market_cap: Option<RawValue>,
}

/// `assetProfile` module
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProfile {
    /// Country of incorporation
    pub country: Option<String>,
    /// Industry
    pub industry: Option<String>,
    /// Sector
    pub sector: Option<String>,
    /// Corporate website
    pub website: Option<String>,
    /// Full-time employee headcount
    pub full_time_employees: Option<i64>,
    /// Business description
    pub long_business_summary: Option<String>,
}

/// `summaryDetail` module
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetail {
    /// Trading currency
    pub currency: Option<String>,
    /// Market capitalization
    pub market_cap: Option<RawValue>,
}

impl QuoteSummaryResult {
    /// Currency from the price module, then the summary detail module
    #[must_use]
    pub fn currency(&self) -> Option<String> {
        self.price
            .as_ref()
            .and_then(|p| p.currency.clone())
            .or_else(|| self.summary_detail.as_ref().and_then(|s| s.currency.clone()))
            .filter(|c| !c.is_empty())
    }

    /// Market cap from the price module, then the summary detail module
    #[must_use]
    pub fn market_cap(&self) -> Option<i64> {
        self.price
            .as_ref()
            .and_then(|p| p.market_cap)
            .or_else(|| self.summary_detail.as_ref().and_then(|s| s.market_cap))
            .and_then(|v| v.raw)
            .map(|v| v as i64)
    }
}
