/// Ticker used when a request does not name one
pub const DEFAULT_TICKER: &str = "AAPL";
/// Tickers used by `/api/multiple` when none are given
pub const DEFAULT_TICKERS: &str = "AAPL,MSFT,GOOGL";
/// History range used when the request does not set `period`
pub const DEFAULT_PERIOD: &str = "1mo";
/// Bar size used when the request does not set `interval`
pub const DEFAULT_INTERVAL: &str = "1d";
/// Forecast horizon in days when `days` is not given
pub const DEFAULT_FORECAST_DAYS: u32 = 5;
/// Largest horizon `/api/predict` accepts
pub const MAX_FORECAST_DAYS: u32 = 365;
/// Currency reported when the provider does not return one
pub const DEFAULT_CURRENCY: &str = "USD";
/// Text format of quote timestamps and bar dates
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// User agent sent to the provider; Yahoo rejects obviously scripted agents
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";
/// quoteSummary modules needed for quotes and company profiles
pub const QUOTE_SUMMARY_MODULES: &str = "price,assetProfile,summaryDetail";
/// Connection attempts against PostgreSQL at startup
pub const POSTGRES_INIT_RETRIES: u32 = 5;
/// Connection attempts against Cassandra at startup
pub const CASSANDRA_INIT_RETRIES: u32 = 10;
/// Seconds between startup connection attempts
pub const SCHEMA_RETRY_DELAY_SECS: u64 = 5;
/// Ticker written by the `/api/test-db` diagnostic insert
pub const DIAGNOSTIC_TICKER: &str = "TEST";
