use crate::constants::{CASSANDRA_INIT_RETRIES, POSTGRES_INIT_RETRIES};
use crate::model::retry::RetryConfig;
use crate::storage::config::{CassandraConfig, DatabaseConfig};
use crate::utils::config::{get_env_list, get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration of the service
pub struct Config {
    /// HTTP listener
    pub server: ServerConfig,
    /// Market data provider
    pub provider: ProviderConfig,
    /// Relational store
    pub database: DatabaseConfig,
    /// Wide-column store
    pub cassandra: CassandraConfig,
    /// Startup retry policy for the relational store
    #[serde(skip)]
    pub postgres_retry: RetryConfig,
    /// Startup retry policy for the wide-column store
    #[serde(skip)]
    pub cassandra_retry: RetryConfig,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// HTTP listener configuration
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string handed to the TCP listener
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Market data provider configuration
pub struct ProviderConfig {
    /// Base URL of the query API
    pub base_url: String,
    /// URL visited once to obtain the session cookie
    pub cookie_url: String,
    /// Timeout in seconds for each provider request
    pub timeout: u64,
    /// Outbound rate limit
    pub rate_limiter: RateLimiterConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            timeout: 30,
            rate_limiter: RateLimiterConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// Points both provider URLs at `base_url`; used against mock servers
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// Outbound rate limit for provider requests
pub struct RateLimiterConfig {
    /// Requests allowed per period
    pub max_requests: u32,
    /// Period length in seconds
    pub period_seconds: u64,
    /// Requests that may be sent back to back
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            period_seconds: 60,
            burst_size: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Reads the configuration from the environment (and `.env` if present)
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("No .env file loaded: {e}"),
        }

        let server_defaults = ServerConfig::default();
        let provider_defaults = ProviderConfig::default();
        let limiter_defaults = RateLimiterConfig::default();

        Config {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", server_defaults.host),
                port: get_env_or_default("SERVER_PORT", server_defaults.port),
            },
            provider: ProviderConfig {
                base_url: get_env_or_default("YAHOO_BASE_URL", provider_defaults.base_url),
                cookie_url: get_env_or_default("YAHOO_COOKIE_URL", provider_defaults.cookie_url),
                timeout: get_env_or_default("YAHOO_TIMEOUT", provider_defaults.timeout),
                rate_limiter: RateLimiterConfig {
                    max_requests: get_env_or_default(
                        "YAHOO_RATE_LIMIT_MAX_REQUESTS",
                        limiter_defaults.max_requests,
                    ),
                    period_seconds: get_env_or_default(
                        "YAHOO_RATE_LIMIT_PERIOD_SECONDS",
                        limiter_defaults.period_seconds,
                    ),
                    burst_size: get_env_or_default(
                        "YAHOO_RATE_LIMIT_BURST_SIZE",
                        limiter_defaults.burst_size,
                    ),
                },
            },
            database: DatabaseConfig {
                url: get_env_or_none("DATABASE_URL").unwrap_or_else(postgres_url_from_parts),
                max_connections: get_env_or_default("DATABASE_MAX_CONNECTIONS", 5),
            },
            cassandra: CassandraConfig {
                nodes: get_env_list("CASSANDRA_HOST", "cassandra"),
                port: get_env_or_default("CASSANDRA_PORT", 9042),
                username: get_env_or_default("CASSANDRA_USER", String::from("cassandra")),
                password: get_env_or_default("CASSANDRA_PASSWORD", String::from("cassandra")),
                keyspace: get_env_or_default("CASSANDRA_KEYSPACE", String::from("finance")),
            },
            postgres_retry: RetryConfig::from_env("POSTGRES_INIT_RETRIES", POSTGRES_INIT_RETRIES),
            cassandra_retry: RetryConfig::from_env(
                "CASSANDRA_INIT_RETRIES",
                CASSANDRA_INIT_RETRIES,
            ),
        }
    }
}

/// Builds a PostgreSQL URL from `POSTGRES_HOST`, `POSTGRES_PORT`,
/// `POSTGRES_DB`, `POSTGRES_USER` and `POSTGRES_PASSWORD`
fn postgres_url_from_parts() -> String {
    let host = get_env_or_default("POSTGRES_HOST", String::from("postgres"));
    let port: u16 = get_env_or_default("POSTGRES_PORT", 5432);
    let db = get_env_or_default("POSTGRES_DB", String::from("financedb"));
    let user = get_env_or_default("POSTGRES_USER", String::from("financeuser"));
    let password = get_env_or_default("POSTGRES_PASSWORD", String::from("password"));
    format!("postgres://{user}:{password}@{host}:{port}/{db}")
}
