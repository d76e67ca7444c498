use axum::response::IntoResponse;
use finance_pipeline::error::AppError;
use reqwest::StatusCode;

#[test]
fn test_app_error_display_rate_limit() {
    let error = AppError::RateLimitExceeded;
    assert_eq!(error.to_string(), "rate limit exceeded");
}

#[test]
fn test_app_error_display_unauthorized() {
    let error = AppError::Unauthorized;
    assert_eq!(error.to_string(), "unauthorized");
}

#[test]
fn test_app_error_display_ticker_not_found() {
    let error = AppError::TickerNotFound("BAD_TICKER".to_string());
    assert_eq!(error.to_string(), "No data found for ticker BAD_TICKER");
}

#[test]
fn test_app_error_display_unexpected() {
    let error = AppError::Unexpected(StatusCode::BAD_GATEWAY);
    assert!(error.to_string().contains("502"));
}

#[test]
fn test_app_error_display_deserialization() {
    let error = AppError::Deserialization("Invalid JSON".to_string());
    assert_eq!(error.to_string(), "deserialization error: Invalid JSON");
}

#[test]
fn test_app_error_display_invalid_input() {
    let error = AppError::InvalidInput("bad keyspace".to_string());
    assert_eq!(error.to_string(), "invalid input: bad keyspace");
}

#[test]
fn test_app_error_display_bad_request_is_bare_message() {
    let error = AppError::BadRequest("No historical data available".to_string());
    assert_eq!(error.to_string(), "No historical data available");
}

// reqwest::Error and sqlx::Error cannot be easily constructed here;
// those conversions are exercised by the store and client tests

#[test]
fn test_app_error_from_serde() {
    let json = r#"{"invalid": json}"#;
    let serde_error = serde_json::from_str::<serde_json::Value>(json).unwrap_err();
    let app_error: AppError = serde_error.into();
    assert!(matches!(app_error, AppError::Json(_)));
}

#[test]
fn test_app_error_from_io() {
    let io_error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
    let app_error: AppError = io_error.into();
    assert!(app_error.to_string().contains("port taken"));
}

#[test]
fn test_status_codes() {
    assert_eq!(
        AppError::BadRequest("x".into()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::NotFound("x".into()).status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::WideColumn("down".into()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_into_response_status() {
    let response = AppError::BadRequest("No historical data available".into()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = AppError::Provider("boom".into()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
