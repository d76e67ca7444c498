use crate::constants::QUOTE_SUMMARY_MODULES;
use crate::error::AppError;
use reqwest::Url;

/// Parameters of a price history request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest<'a> {
    /// Ticker symbol (e.g. `AAPL`)
    pub ticker: &'a str,
    /// Range of the series (`1d`, `5d`, `1mo`, `3mo`, `6mo`, `1y`, `5y`, `max`...)
    pub period: &'a str,
    /// Bar size (`1m`, `5m`, `1h`, `1d`, `1wk`, `1mo`...)
    pub interval: &'a str,
}

impl<'a> ChartRequest<'a> {
    /// Creates a new chart request
    #[must_use]
    pub fn new(ticker: &'a str, period: &'a str, interval: &'a str) -> Self {
        Self {
            ticker,
            period,
            interval,
        }
    }

    /// Builds `{base}/v8/finance/chart/{ticker}?range=..&interval=..&events=div,splits`
    pub fn url(&self, base_url: &str) -> Result<Url, AppError> {
        let mut url = endpoint(base_url, &["v8", "finance", "chart", self.ticker])?;
        url.query_pairs_mut()
            .append_pair("range", self.period)
            .append_pair("interval", self.interval)
            .append_pair("events", "div,splits");
        Ok(url)
    }
}

/// Builds the quoteSummary URL for a ticker, authenticated with `crumb`
pub fn quote_summary_url(base_url: &str, ticker: &str, crumb: &str) -> Result<Url, AppError> {
    let mut url = endpoint(base_url, &["v10", "finance", "quoteSummary", ticker])?;
    url.query_pairs_mut()
        .append_pair("modules", QUOTE_SUMMARY_MODULES)
        .append_pair("crumb", crumb);
    Ok(url)
}

/// Builds the URL that hands out a crumb for the current cookie jar
pub fn crumb_url(base_url: &str) -> Result<Url, AppError> {
    endpoint(base_url, &["v1", "test", "getcrumb"])
}

/// Appends path segments to `base_url`; segments are percent-encoded
fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, AppError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::InvalidInput(format!("invalid provider url {base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| AppError::InvalidInput(format!("provider url cannot be a base: {base_url}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
