use crate::common::{MemorySink, app_with, get};
use assert_json_diff::assert_json_eq;
use axum::http::StatusCode;
use finance_pipeline::application::interfaces::sink::RouteKind;
use serde_json::json;

#[tokio::test]
async fn test_db_writes_through_relational_sink() {
    let postgres = MemorySink::new("postgres", false);
    let cassandra = MemorySink::new("cassandra", false);
    let app = app_with(vec![postgres.clone(), cassandra.clone()], Some(postgres.clone()));

    let (status, body) = get(&app, "/api/test-db").await;

    assert_eq!(status, StatusCode::OK);
    assert_json_eq!(body, json!({"status": "success", "message": "Test data inserted"}));
    assert_eq!(postgres.tickers(RouteKind::Price), vec!["TEST".to_string()]);
    assert_eq!(cassandra.count(RouteKind::Price), 0);
}

#[tokio::test]
async fn test_db_reports_write_error() {
    let postgres = MemorySink::new("postgres", true);
    let app = app_with(vec![postgres.clone()], Some(postgres));

    let (status, body) = get(&app, "/api/test-db").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("no hosts available"));
}

#[tokio::test]
async fn test_db_without_relational_sink() {
    let app = app_with(vec![MemorySink::new("cassandra", false)], None);

    let (_, body) = get(&app, "/api/test-db").await;

    assert_json_eq!(
        body,
        json!({"status": "error", "message": "relational store is not available"})
    );
}

#[tokio::test]
async fn test_health_all_up() {
    let app = app_with(
        vec![MemorySink::new("postgres", false), MemorySink::new("cassandra", false)],
        None,
    );
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_json_eq!(
        body,
        json!({"status": "ok", "sinks": {"postgres": "up", "cassandra": "up"}})
    );
}

#[tokio::test]
async fn test_health_degraded() {
    let app = app_with(
        vec![MemorySink::new("postgres", false), MemorySink::new("cassandra", true)],
        None,
    );
    let (_, body) = get(&app, "/health").await;

    assert_eq!(body["status"], "degraded");
    assert!(body["sinks"]["cassandra"].as_str().unwrap().starts_with("down: "));

    let (_, body) = get(&app_with(vec![], None), "/health").await;
    assert_eq!(body["status"], "degraded");
}
