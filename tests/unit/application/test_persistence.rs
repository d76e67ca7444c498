use async_trait::async_trait;
use chrono::NaiveDate;
use finance_pipeline::application::interfaces::sink::{Record, RecordSink, RouteKind};
use finance_pipeline::application::services::PersistenceService;
use finance_pipeline::error::AppError;
use finance_pipeline::presentation::market::{CompanyInfo, HistoricalBar};
use std::sync::{Arc, Mutex};

/// Appends every record it receives, keyed by table
#[derive(Default)]
struct MemorySink {
    name: String,
    rows: Mutex<Vec<(&'static str, String)>>,
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl RecordSink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&self, record: &Record<'_>) -> Result<usize, AppError> {
        self.calls.lock().unwrap().push(self.name.clone());
        let table = record.kind().table();
        let mut rows = self.rows.lock().unwrap();
        for _ in 0..record.row_count() {
            rows.push((table, record.ticker().to_string()));
        }
        Ok(record.row_count())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

fn bars(n: usize) -> Vec<HistoricalBar> {
    let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    (0..n)
        .map(|i| HistoricalBar {
            date: (day + chrono::Days::new(i as u64)).and_hms_opt(9, 30, 0).unwrap(),
            open: 10.0,
            high: 11.0,
            low: 9.0,
            close: 10.5,
            volume: 100,
            stock_splits: 0.0,
            dividends: 0.0,
        })
        .collect()
}

#[tokio::test]
async fn test_repeated_history_is_appended() {
    let sink = Arc::new(MemorySink {
        name: "memory".into(),
        ..Default::default()
    });
    let service = PersistenceService::new(vec![sink.clone()]);
    let history = bars(3);
    let record = Record::Historical {
        ticker: "MSFT",
        bars: &history,
    };

    service.persist(&record).await;
    let report = service.persist(&record).await;

    assert_eq!(report.written["memory"], 3);
    let rows = sink.rows.lock().unwrap();
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|(table, ticker)| *table == "market_historical_data" && ticker == "MSFT"));
}

#[tokio::test]
async fn test_sinks_written_in_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let postgres = Arc::new(MemorySink {
        name: "postgres".into(),
        calls: Arc::clone(&calls),
        ..Default::default()
    });
    let cassandra = Arc::new(MemorySink {
        name: "cassandra".into(),
        calls: Arc::clone(&calls),
        ..Default::default()
    });
    let service = PersistenceService::new(vec![postgres, cassandra]);

    let info = CompanyInfo {
        ticker: "AAPL".into(),
        name: "Apple Inc.".into(),
        sector: "Technology".into(),
        industry: "Consumer Electronics".into(),
        country: "United States".into(),
        website: "https://www.apple.com".into(),
        market_cap: 1,
        employee_count: 1,
        description: String::new(),
    };
    let report = service.persist(&Record::Info(&info)).await;

    assert!(report.is_complete());
    assert_eq!(calls.lock().unwrap().as_slice(), ["postgres", "cassandra"]);
    assert_eq!(service.sinks().len(), 2);
}

#[test]
fn test_record_kinds_map_to_tables() {
    let history = bars(2);
    let record = Record::Historical {
        ticker: "AAPL",
        bars: &history,
    };
    assert_eq!(record.kind(), RouteKind::Historical);
    assert_eq!(record.row_count(), 2);
    assert_eq!(RouteKind::Multiple.table(), "multiple_stock_prices");
    assert_eq!(RouteKind::Info.to_string(), "info");
}

#[test]
fn test_debug_lists_sink_names() {
    let sink = Arc::new(MemorySink {
        name: "memory".into(),
        ..Default::default()
    });
    let service = PersistenceService::new(vec![sink]);
    assert!(format!("{service:?}").contains("memory"));
}
