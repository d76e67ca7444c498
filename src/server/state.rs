use crate::application::interfaces::market::MarketDataProvider;
use crate::application::interfaces::sink::RecordSink;
use crate::application::services::persistence::PersistenceService;
use std::sync::Arc;

/// Handles shared by every request
///
/// Everything is constructed at startup and injected here; handlers never
/// open connections of their own.
#[derive(Clone)]
pub struct AppState {
    /// Market data source
    pub provider: Arc<dyn MarketDataProvider>,
    /// Fan-out to every configured sink
    pub persistence: Arc<PersistenceService>,
    /// Relational sink alone, for the diagnostic insert
    pub relational: Option<Arc<dyn RecordSink>>,
}

impl AppState {
    /// Creates the state
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        persistence: PersistenceService,
        relational: Option<Arc<dyn RecordSink>>,
    ) -> Self {
        Self {
            provider,
            persistence: Arc::new(persistence),
            relational,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("persistence", &self.persistence)
            .field("relational", &self.relational.as_ref().map(|s| s.name().to_string()))
            .finish()
    }
}
