use crate::application::interfaces::sink::{Record, RecordSink};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Outcome of a fan-out write, per sink
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersistReport {
    /// Rows written by each sink that succeeded
    pub written: BTreeMap<String, usize>,
    /// Error text of each sink that failed
    pub failed: BTreeMap<String, String>,
}

impl PersistReport {
    /// Whether every sink accepted the record
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes records to every configured sink
///
/// Sinks are written one after the other. A sink failure is logged and
/// swallowed: it neither stops the remaining sinks nor reaches the caller.
#[derive(Clone, Default)]
pub struct PersistenceService {
    sinks: Vec<Arc<dyn RecordSink>>,
}

impl PersistenceService {
    /// Creates the service over `sinks`, written in that order
    pub fn new(sinks: Vec<Arc<dyn RecordSink>>) -> Self {
        Self { sinks }
    }

    /// Configured sinks
    pub fn sinks(&self) -> &[Arc<dyn RecordSink>] {
        &self.sinks
    }

    /// Appends `record` to every sink
    pub async fn persist(&self, record: &Record<'_>) -> PersistReport {
        let mut report = PersistReport::default();
        if self.sinks.is_empty() {
            debug!("No sinks configured, {} record for {} not stored", record.kind(), record.ticker());
            return report;
        }

        for sink in &self.sinks {
            match sink.write(record).await {
                Ok(rows) => {
                    debug!(
                        "{} stored {} {} row(s) for {}",
                        sink.name(),
                        rows,
                        record.kind(),
                        record.ticker()
                    );
                    report.written.insert(sink.name().to_string(), rows);
                }
                Err(e) => {
                    error!(
                        "{} failed to store {} data for {}: {}",
                        sink.name(),
                        record.kind(),
                        record.ticker(),
                        e
                    );
                    report.failed.insert(sink.name().to_string(), e.to_string());
                }
            }
        }

        info!(
            "Persisted {} record for {} ({}/{} sinks)",
            record.kind(),
            record.ticker(),
            report.written.len(),
            self.sinks.len()
        );
        report
    }

    /// Health of every sink: `up` or `down: <error>`
    pub async fn health(&self) -> BTreeMap<String, String> {
        let mut status = BTreeMap::new();
        for sink in &self.sinks {
            let state = match sink.health_check().await {
                Ok(()) => "up".to_string(),
                Err(e) => format!("down: {e}"),
            };
            status.insert(sink.name().to_string(), state);
        }
        status
    }
}

impl std::fmt::Debug for PersistenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sinks.iter().map(|s| s.name()).collect();
        f.debug_struct("PersistenceService")
            .field("sinks", &names)
            .finish()
    }
}
