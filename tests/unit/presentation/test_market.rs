use assert_json_diff::assert_json_eq;
use chrono::NaiveDate;
use finance_pipeline::error::AppError;
use finance_pipeline::presentation::market::{
    CompanyInfo, Fetched, Forecast, ForecastPoint, HistoricalBar, ProviderFailure, Quote,
};
use serde_json::json;

fn timestamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 2)
        .unwrap()
        .and_hms_opt(14, 5, 9)
        .unwrap()
}

#[test]
fn test_quote_json_shape() {
    let quote = Quote::from_session("MSFT", 400.0, 410.0, "USD".to_string(), timestamp()).unwrap();
    assert_json_eq!(
        serde_json::to_value(&quote).unwrap(),
        json!({
            "ticker": "MSFT",
            "price": 410.0,
            "currency": "USD",
            "timestamp": "2025-06-02 14:05:09",
            "change": 10.0,
            "change_percent": 2.5
        })
    );
}

#[test]
fn test_quote_negative_change() {
    let quote = Quote::from_session("X", 50.0, 40.0, "USD".to_string(), timestamp()).unwrap();
    assert_eq!(quote.change, -10.0);
    assert_eq!(quote.change_percent, -20.0);
}

#[test]
fn test_quote_rejects_non_finite_prices() {
    let err = Quote::from_session("X", f64::NAN, 1.0, "USD".to_string(), timestamp()).unwrap_err();
    assert!(matches!(err, AppError::InvalidQuote(_)));
}

#[test]
fn test_company_info_json_shape() {
    let info = CompanyInfo {
        ticker: "AAPL".to_string(),
        name: "Apple Inc.".to_string(),
        sector: "Technology".to_string(),
        industry: "Consumer Electronics".to_string(),
        country: "United States".to_string(),
        website: "https://www.apple.com".to_string(),
        market_cap: 3_000_000_000_000,
        employee_count: 164_000,
        description: "Designs phones.".to_string(),
    };
    assert_json_eq!(
        serde_json::to_value(&info).unwrap(),
        json!({
            "ticker": "AAPL",
            "name": "Apple Inc.",
            "sector": "Technology",
            "industry": "Consumer Electronics",
            "country": "United States",
            "website": "https://www.apple.com",
            "market_cap": 3_000_000_000_000_i64,
            "employees": 164_000,
            "description": "Designs phones."
        })
    );
}

#[test]
fn test_historical_bar_uses_history_frame_keys() {
    let bar = HistoricalBar {
        date: timestamp(),
        open: 100.0,
        high: 101.5,
        low: 99.0,
        close: 101.0,
        volume: 2_500,
        stock_splits: 4.0,
        dividends: 0.25,
    };
    assert_json_eq!(
        serde_json::to_value(&bar).unwrap(),
        json!({
            "Date": "2025-06-02 14:05:09",
            "Open": 100.0,
            "High": 101.5,
            "Low": 99.0,
            "Close": 101.0,
            "Volume": 2_500,
            "Stock Splits": 4.0,
            "Dividends": 0.25
        })
    );
}

#[test]
fn test_forecast_json_dates() {
    let forecast = Forecast {
        ticker: "AAPL".to_string(),
        predictions: vec![ForecastPoint {
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            predicted_close: 201.5,
        }],
    };
    assert_json_eq!(
        serde_json::to_value(&forecast).unwrap(),
        json!({"ticker": "AAPL", "predictions": [{"date": "2025-06-03", "predicted_close": 201.5}]})
    );
}

#[test]
fn test_fetched_value_and_failure() {
    let ok = Fetched::from(Ok::<u32, AppError>(3));
    assert!(ok.is_ok());
    assert_eq!(ok.value(), Some(&3));

    let failed: Fetched<u32> = Fetched::Err(ProviderFailure::from(&AppError::RateLimitExceeded));
    assert_eq!(failed.value(), None);
    assert_json_eq!(
        serde_json::to_value(&failed).unwrap(),
        json!({"error": "rate limit exceeded"})
    );
}
