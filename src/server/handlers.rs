//! Route handlers.
//!
//! Provider failures are answered with `200 {error}` and never persisted;
//! successful fetches are handed to every sink before the fetched record is
//! returned. Sink failures never reach the response.

use crate::application::interfaces::sink::Record;
use crate::application::services::forecast::{DateStep, forecast_closes};
use crate::constants::{
    DEFAULT_CURRENCY, DEFAULT_FORECAST_DAYS, DEFAULT_INTERVAL, DEFAULT_PERIOD, DEFAULT_TICKER,
    DEFAULT_TICKERS, DIAGNOSTIC_TICKER,
};
use crate::error::AppError;
use crate::presentation::market::{
    CompanyInfo, Fetched, Forecast, HistoricalData, Quote,
};
use crate::server::state::AppState;
use crate::utils::id::request_id;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use chrono::{Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument, warn};

fn default_ticker() -> String {
    DEFAULT_TICKER.to_string()
}

fn default_tickers() -> String {
    DEFAULT_TICKERS.to_string()
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

fn default_interval() -> String {
    DEFAULT_INTERVAL.to_string()
}

fn default_days() -> u32 {
    DEFAULT_FORECAST_DAYS
}

/// Query of `/api/historical`
#[derive(Debug, Deserialize)]
pub struct HistoricalQuery {
    /// Ticker symbol
    #[serde(default = "default_ticker")]
    pub ticker: String,
    /// History range
    #[serde(default = "default_period")]
    pub period: String,
    /// Bar size
    #[serde(default = "default_interval")]
    pub interval: String,
}

/// Query of `/api/price` and `/api/info`
#[derive(Debug, Deserialize)]
pub struct TickerQuery {
    /// Ticker symbol
    #[serde(default = "default_ticker")]
    pub ticker: String,
}

/// Query of `/api/multiple`
#[derive(Debug, Deserialize)]
pub struct MultipleQuery {
    /// Comma separated tickers
    #[serde(default = "default_tickers")]
    pub tickers: String,
}

impl MultipleQuery {
    /// Tickers trimmed, without empties or duplicates
    #[must_use]
    pub fn ticker_list(&self) -> Vec<String> {
        self.tickers
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Query of `/api/predict`
#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    /// Ticker symbol
    #[serde(default = "default_ticker")]
    pub ticker: String,
    /// Number of predictions
    #[serde(default = "default_days")]
    pub days: u32,
    /// Date step between predictions
    #[serde(default)]
    pub step: DateStep,
}

/// Body of `/api/test-db`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticResponse {
    /// `success` or `error`
    pub status: String,
    /// What happened
    pub message: String,
}

/// Body of `/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// `ok` when every sink answers, `degraded` otherwise
    pub status: String,
    /// `up` or `down: <error>` per sink
    pub sinks: BTreeMap<String, String>,
}

/// `GET /api/historical`
#[instrument(skip_all, fields(request_id = %request_id()))]
pub async fn get_historical(
    State(state): State<AppState>,
    Query(query): Query<HistoricalQuery>,
) -> Json<Fetched<HistoricalData>> {
    let result = state
        .provider
        .historical(&query.ticker, &query.period, &query.interval)
        .await;

    match &result {
        Ok(data) => {
            state
                .persistence
                .persist(&Record::Historical {
                    ticker: &data.ticker,
                    bars: &data.data,
                })
                .await;
        }
        Err(e) => warn!("History of {} unavailable: {}", query.ticker, e),
    }
    Json(result.into())
}

/// `GET /api/price`
#[instrument(skip_all, fields(request_id = %request_id()))]
pub async fn get_price(
    State(state): State<AppState>,
    Query(query): Query<TickerQuery>,
) -> Json<Fetched<Quote>> {
    let result = state.provider.quote(&query.ticker).await;

    match &result {
        Ok(quote) => {
            state.persistence.persist(&Record::Price(quote)).await;
        }
        Err(e) => warn!("Quote of {} unavailable: {}", query.ticker, e),
    }
    Json(result.into())
}

/// `GET /api/multiple`
#[instrument(skip_all, fields(request_id = %request_id()))]
pub async fn get_multiple(
    State(state): State<AppState>,
    Query(query): Query<MultipleQuery>,
) -> Json<BTreeMap<String, Fetched<Quote>>> {
    let tickers = query.ticker_list();
    info!("Quoting {} tickers", tickers.len());

    let quotes = state.provider.quotes(&tickers).await;
    for (ticker, fetched) in &quotes {
        match fetched {
            Fetched::Ok(quote) => {
                state.persistence.persist(&Record::Multiple(quote)).await;
            }
            Fetched::Err(failure) => warn!("Quote of {} unavailable: {}", ticker, failure.error),
        }
    }
    Json(quotes)
}

/// `GET /api/info`
#[instrument(skip_all, fields(request_id = %request_id()))]
pub async fn get_info(
    State(state): State<AppState>,
    Query(query): Query<TickerQuery>,
) -> Json<Fetched<CompanyInfo>> {
    let result = state.provider.company_info(&query.ticker).await;

    match &result {
        Ok(info) => {
            state.persistence.persist(&Record::Info(info)).await;
        }
        Err(e) => warn!("Company info of {} unavailable: {}", query.ticker, e),
    }
    Json(result.into())
}

/// `GET /api/predict`
///
/// Fits the last month of daily closes. Any failure to obtain them is a
/// client error, and so is a malformed query; both answer `{error, status}`.
#[instrument(skip_all, fields(request_id = %request_id()))]
pub async fn get_predict(
    State(state): State<AppState>,
    query: Result<Query<PredictQuery>, QueryRejection>,
) -> Result<Json<Forecast>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let history = state
        .provider
        .historical(&query.ticker, DEFAULT_PERIOD, DEFAULT_INTERVAL)
        .await
        .map_err(|e| {
            warn!("No history to forecast {}: {}", query.ticker, e);
            AppError::BadRequest("No historical data available".to_string())
        })?;

    let forecast = forecast_closes(&query.ticker, &history.data, query.days, query.step)?;
    info!(
        "Forecast {} day(s) of {} ({} step)",
        forecast.predictions.len(),
        query.ticker,
        query.step
    );
    Ok(Json(forecast))
}

/// `GET /api/test-db`
///
/// Writes a fixed quote through the relational sink only.
#[instrument(skip_all, fields(request_id = %request_id()))]
pub async fn test_db(State(state): State<AppState>) -> Json<DiagnosticResponse> {
    let Some(sink) = &state.relational else {
        return Json(DiagnosticResponse {
            status: "error".to_string(),
            message: "relational store is not available".to_string(),
        });
    };

    let now = Utc::now().naive_utc();
    let quote = Quote {
        ticker: DIAGNOSTIC_TICKER.to_string(),
        price: 100.0,
        currency: DEFAULT_CURRENCY.to_string(),
        timestamp: now.with_nanosecond(0).unwrap_or(now),
        change: 1.0,
        change_percent: 1.0,
    };

    match sink.write(&Record::Price(&quote)).await {
        Ok(_) => Json(DiagnosticResponse {
            status: "success".to_string(),
            message: "Test data inserted".to_string(),
        }),
        Err(e) => {
            warn!("Diagnostic insert failed: {}", e);
            Json(DiagnosticResponse {
                status: "error".to_string(),
                message: e.to_string(),
            })
        }
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let sinks = state.persistence.health().await;
    let all_up = !sinks.is_empty() && sinks.values().all(|s| s == "up");

    Json(HealthResponse {
        status: if all_up { "ok" } else { "degraded" }.to_string(),
        sinks,
    })
}
