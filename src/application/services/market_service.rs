use crate::application::auth::Auth;
use crate::application::config::ProviderConfig;
use crate::application::interfaces::market::MarketDataProvider;
use crate::constants::DEFAULT_CURRENCY;
use crate::error::AppError;
use crate::model::http::HttpClient;
use crate::model::requests::{ChartRequest, quote_summary_url};
use crate::model::responses::{
    ChartResponse, ChartResult, QuoteSummaryResponse, QuoteSummaryResult,
};
use crate::presentation::market::{CompanyInfo, HistoricalBar, HistoricalData, Quote};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Yahoo Finance implementation of [`MarketDataProvider`]
#[derive(Debug, Clone)]
pub struct YahooClient {
    config: Arc<ProviderConfig>,
    http: HttpClient,
    auth: Auth,
}

impl YahooClient {
    /// Creates the client; the provider session is obtained lazily
    pub fn new(config: ProviderConfig) -> Result<Self, AppError> {
        let config = Arc::new(config);
        let http = HttpClient::new(&config)?;
        let auth = Auth::new(Arc::clone(&config), http.clone());
        Ok(Self { config, http, auth })
    }

    /// Gets the current configuration
    pub fn get_config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn fetch_chart(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> Result<ChartResult, AppError> {
        let url = ChartRequest::new(ticker, period, interval).url(&self.config.base_url)?;
        let response: ChartResponse = self.http.get_json(url).await?;
        chart_result(ticker, response)
    }

    /// quoteSummary call; a rejected crumb is refreshed once
    async fn fetch_summary(&self, ticker: &str) -> Result<QuoteSummaryResult, AppError> {
        let session = self.auth.get_session().await?;
        let url = quote_summary_url(&self.config.base_url, ticker, &session.crumb)?;

        let response: QuoteSummaryResponse = match self.http.get_json(url).await {
            Err(AppError::Unauthorized) => {
                let session = self.auth.refresh(&session).await?;
                let url = quote_summary_url(&self.config.base_url, ticker, &session.crumb)?;
                self.http.get_json(url).await?
            }
            other => other?,
        };
        summary_result(ticker, response)
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    async fn historical(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> Result<HistoricalData, AppError> {
        info!(
            "Fetching history for {} (period {}, interval {})",
            ticker, period, interval
        );
        let result = self.fetch_chart(ticker, period, interval).await?;
        let data = chart_bars(ticker, &result)?;
        debug!("{} bars obtained for {}", data.len(), ticker);

        Ok(HistoricalData {
            ticker: ticker.to_string(),
            period: period.to_string(),
            interval: interval.to_string(),
            data,
        })
    }

    async fn quote(&self, ticker: &str) -> Result<Quote, AppError> {
        info!("Fetching quote for {}", ticker);
        let result = self.fetch_chart(ticker, "1d", "1d").await?;
        let bars = chart_bars(ticker, &result)?;
        let session = bars
            .last()
            .ok_or_else(|| AppError::TickerNotFound(ticker.to_string()))?;

        let currency = match self.fetch_summary(ticker).await {
            Ok(summary) => summary.currency(),
            Err(e) => {
                warn!("Metadata for {} unavailable, using chart currency: {}", ticker, e);
                None
            }
        }
        .or_else(|| result.meta.currency.clone().filter(|c| !c.is_empty()))
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        Quote::from_session(ticker, session.open, session.close, currency, fetch_time())
    }

    async fn company_info(&self, ticker: &str) -> Result<CompanyInfo, AppError> {
        info!("Fetching company info for {}", ticker);
        let summary = self.fetch_summary(ticker).await?;
        Ok(company_info(ticker, &summary))
    }
}

/// Current UTC time truncated to the second
fn fetch_time() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Extracts the single result of a chart envelope
pub(crate) fn chart_result(ticker: &str, response: ChartResponse) -> Result<ChartResult, AppError> {
    if let Some(error) = response.chart.error {
        return Err(if error.is_not_found() {
            AppError::TickerNotFound(ticker.to_string())
        } else {
            AppError::Provider(error.message())
        });
    }

    response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| AppError::TickerNotFound(ticker.to_string()))
}

/// Extracts the single result of a quoteSummary envelope
pub(crate) fn summary_result(
    ticker: &str,
    response: QuoteSummaryResponse,
) -> Result<QuoteSummaryResult, AppError> {
    if let Some(error) = response.quote_summary.error {
        return Err(if error.is_not_found() {
            AppError::TickerNotFound(ticker.to_string())
        } else {
            AppError::Provider(error.message())
        });
    }

    response
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| AppError::TickerNotFound(ticker.to_string()))
}

/// Turns a chart result into bars in exchange-local time
///
/// Bars lacking any of open, high, low or close are skipped. Dividends and
/// splits land on the bar of the same local date. A series left empty is
/// reported as an unknown ticker.
pub(crate) fn chart_bars(ticker: &str, result: &ChartResult) -> Result<Vec<HistoricalBar>, AppError> {
    let offset = i64::from(result.meta.gmtoffset.unwrap_or(0));
    let timestamps = result.timestamp.as_deref().unwrap_or_default();
    let Some(quote) = result.indicators.quote.first() else {
        return Err(AppError::TickerNotFound(ticker.to_string()));
    };

    let mut dividends: HashMap<NaiveDate, f64> = HashMap::new();
    let mut splits: HashMap<NaiveDate, f64> = HashMap::new();
    if let Some(events) = &result.events {
        for event in events.dividends.values() {
            if let Some(local) = local_time(event.date, offset) {
                *dividends.entry(local.date()).or_default() += event.amount;
            }
        }
        for event in events.splits.values() {
            if let Some(local) = local_time(event.date, offset) {
                splits.insert(local.date(), event.ratio());
            }
        }
    }

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();

        let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close) else {
            continue;
        };
        let Some(date) = local_time(ts, offset) else {
            warn!("Skipping bar of {} with invalid timestamp {}", ticker, ts);
            continue;
        };

        bars.push(HistoricalBar {
            date,
            open,
            high,
            low,
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
            stock_splits: splits.get(&date.date()).copied().unwrap_or(0.0),
            dividends: dividends.get(&date.date()).copied().unwrap_or(0.0),
        });
    }

    if bars.is_empty() {
        return Err(AppError::TickerNotFound(ticker.to_string()));
    }
    bars.sort_by_key(|bar| bar.date);
    Ok(bars)
}

fn local_time(timestamp: i64, offset: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(timestamp.checked_add(offset)?, 0).map(|dt| dt.naive_utc())
}

/// Flattens quoteSummary modules into a company profile
pub(crate) fn company_info(ticker: &str, summary: &QuoteSummaryResult) -> CompanyInfo {
    let price = summary.price.clone().unwrap_or_default();
    let profile = summary.asset_profile.clone().unwrap_or_default();

    CompanyInfo {
        ticker: ticker.to_string(),
        name: price.short_name.or(price.long_name).unwrap_or_default(),
        sector: profile.sector.unwrap_or_default(),
        industry: profile.industry.unwrap_or_default(),
        country: profile.country.unwrap_or_default(),
        website: profile.website.unwrap_or_default(),
        market_cap: summary.market_cap().unwrap_or(0),
        employee_count: profile.full_time_employees.unwrap_or(0),
        description: profile.long_business_summary.unwrap_or_default(),
    }
}
