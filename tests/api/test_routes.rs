use crate::common::{MemorySink, UNKNOWN, app_with, get};
use assert_json_diff::assert_json_eq;
use axum::http::StatusCode;
use finance_pipeline::application::interfaces::sink::RouteKind;
use serde_json::json;

#[tokio::test]
async fn test_price_survives_failing_sink() {
    let broken = MemorySink::new("cassandra", true);
    let working = MemorySink::new("postgres", false);
    let app = app_with(vec![broken, working.clone()], None);

    let (status, body) = get(&app, "/api/price?ticker=AAPL").await;

    assert_eq!(status, StatusCode::OK);
    assert_json_eq!(
        body,
        json!({
            "ticker": "AAPL",
            "price": 102.0,
            "currency": "USD",
            "timestamp": "2025-01-02 15:00:00",
            "change": 2.0,
            "change_percent": 2.0
        })
    );
    assert_eq!(working.count(RouteKind::Price), 1);
}

#[tokio::test]
async fn test_price_defaults_to_aapl() {
    let app = app_with(vec![], None);
    let (_, body) = get(&app, "/api/price").await;
    assert_eq!(body["ticker"], "AAPL");
}

#[tokio::test]
async fn test_provider_failure_is_not_persisted() {
    let sink = MemorySink::new("postgres", false);
    let app = app_with(vec![sink.clone()], None);

    let (status, body) = get(&app, &format!("/api/price?ticker={UNKNOWN}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_json_eq!(body, json!({"error": "No data found for ticker BAD_TICKER"}));
    assert_eq!(sink.count(RouteKind::Price), 0);
}

#[tokio::test]
async fn test_multiple_mixes_quotes_and_errors() {
    let sink = MemorySink::new("postgres", false);
    let app = app_with(vec![sink.clone()], None);

    let (status, body) = get(&app, "/api/multiple?tickers=AAPL,BAD_TICKER").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["AAPL"]["price"], 102.0);
    assert_json_eq!(
        body["BAD_TICKER"],
        json!({"error": "No data found for ticker BAD_TICKER"})
    );
    assert_eq!(sink.tickers(RouteKind::Multiple), vec!["AAPL".to_string()]);
    assert_eq!(sink.count(RouteKind::Price), 0);
}

#[tokio::test]
async fn test_multiple_default_tickers() {
    let app = app_with(vec![], None);
    let (_, body) = get(&app, "/api/multiple").await;
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["AAPL", "GOOGL", "MSFT"]);
}

#[tokio::test]
async fn test_historical_appends_on_every_call() {
    let sink = MemorySink::new("postgres", false);
    let app = app_with(vec![sink.clone()], None);

    let (status, body) = get(&app, "/api/historical?ticker=MSFT&period=5d&interval=1d").await;
    get(&app, "/api/historical?ticker=MSFT&period=5d&interval=1d").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ticker"], "MSFT");
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"][0]["Date"], "2025-01-06 00:00:00");
    assert_eq!(body["data"][2]["Close"], 12.0);
    assert_eq!(sink.count(RouteKind::Historical), 6);
}

#[tokio::test]
async fn test_info_is_persisted() {
    let sink = MemorySink::new("cassandra", false);
    let app = app_with(vec![sink.clone()], None);

    let (_, body) = get(&app, "/api/info?ticker=AAPL").await;

    assert_eq!(body["name"], "Apple Inc.");
    assert_eq!(body["sector"], "Technology");
    assert_eq!(sink.count(RouteKind::Info), 1);
}

#[tokio::test]
async fn test_predict_linear_series() {
    let app = app_with(vec![], None);
    let (status, body) = get(&app, "/api/predict?ticker=AAPL&days=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_json_eq!(
        body,
        json!({
            "ticker": "AAPL",
            "predictions": [
                {"date": "2025-01-09", "predicted_close": 13.0},
                {"date": "2025-01-10", "predicted_close": 14.0}
            ]
        })
    );
}

#[tokio::test]
async fn test_predict_business_step_skips_weekend() {
    let app = app_with(vec![], None);
    // history ends on Wednesday 2025-01-08
    let (_, body) = get(&app, "/api/predict?days=3&step=business").await;
    let dates: Vec<&str> = body["predictions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2025-01-09", "2025-01-10", "2025-01-13"]);
}

#[tokio::test]
async fn test_predict_without_history() {
    let app = app_with(vec![], None);

    let (status, body) = get(&app, "/api/predict?ticker=EMPTY").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No historical data available");

    let (status, body) = get(&app, &format!("/api/predict?ticker={UNKNOWN}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No historical data available");
}

#[tokio::test]
async fn test_predict_rejects_bad_days() {
    let app = app_with(vec![], None);

    let (status, _) = get(&app, "/api/predict?days=400").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/api/predict?days=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_predict_malformed_query_is_json() {
    let app = app_with(vec![], None);

    for uri in ["/api/predict?days=abc", "/api/predict?step=hourly"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("Failed to deserialize query string")
        );
    }
}

#[tokio::test]
async fn test_unknown_route() {
    let app = app_with(vec![], None);
    let (status, _) = get(&app, "/api/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
