/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Prelude
//!
//! Commonly used types of the crate in one import.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finance_pipeline::prelude::*;
//!
//! let config = Config::new();
//! let client = YahooClient::new(config.provider.clone())?;
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Service configuration
pub use crate::application::config::{Config, ProviderConfig, RateLimiterConfig, ServerConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::{AppError, AppResult};

// ============================================================================
// INTERFACES
// ============================================================================

/// Market data source trait
pub use crate::application::interfaces::market::MarketDataProvider;

/// Persistence sink trait and the records it accepts
pub use crate::application::interfaces::sink::{Record, RecordSink, RouteKind};

// ============================================================================
// SERVICES
// ============================================================================

/// Yahoo Finance client, forecast and persistence fan-out
pub use crate::application::services::{
    DateStep, LinearFit, PersistReport, PersistenceService, YahooClient, forecast_closes,
};

// ============================================================================
// PRESENTATION LAYER
// ============================================================================

/// Records returned by the API
pub use crate::presentation::market::{
    CompanyInfo, Fetched, Forecast, ForecastPoint, HistoricalBar, HistoricalData,
    ProviderFailure, Quote,
};

// ============================================================================
// STORAGE
// ============================================================================

/// Store configuration
pub use crate::storage::config::{CassandraConfig, DatabaseConfig};

/// Sinks
pub use crate::storage::{CassandraStore, PostgresStore};

/// Connection helpers
pub use crate::storage::utils::{connect_cassandra, connect_postgres, create_connection_pool};

// ============================================================================
// SERVER
// ============================================================================

/// Router and state
pub use crate::server::{AppState, create_app};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Retry policy used at startup
pub use crate::model::retry::{RetryConfig, retry_with_backoff};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};

/// Re-export chrono for date/time handling
pub use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
