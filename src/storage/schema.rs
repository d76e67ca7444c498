//! Table definitions of both stores.
//!
//! Every statement is idempotent so startup can run them unconditionally.

use crate::application::interfaces::sink::RouteKind;
use crate::error::AppError;

/// PostgreSQL DDL, one statement per entry
pub const POSTGRES_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS market_historical_data (
        id BIGSERIAL PRIMARY KEY,
        ticker VARCHAR(32) NOT NULL,
        date TIMESTAMP NOT NULL,
        open DOUBLE PRECISION NOT NULL,
        high DOUBLE PRECISION NOT NULL,
        low DOUBLE PRECISION NOT NULL,
        close DOUBLE PRECISION NOT NULL,
        volume BIGINT NOT NULL,
        stock_splits DOUBLE PRECISION DEFAULT 0.0,
        dividends DOUBLE PRECISION DEFAULT 0.0,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_ticker_date ON market_historical_data(ticker, date)",
    r#"
    CREATE TABLE IF NOT EXISTS stock_price (
        id BIGSERIAL PRIMARY KEY,
        ticker VARCHAR(32) NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        change DOUBLE PRECISION NOT NULL,
        change_percent DOUBLE PRECISION NOT NULL,
        currency VARCHAR(8) NOT NULL,
        timestamp TIMESTAMP NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_ticker_price ON stock_price(ticker)",
    r#"
    CREATE TABLE IF NOT EXISTS multiple_stock_prices (
        id BIGSERIAL PRIMARY KEY,
        ticker VARCHAR(32) NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        change DOUBLE PRECISION NOT NULL,
        change_percent DOUBLE PRECISION NOT NULL,
        currency VARCHAR(8) NOT NULL,
        timestamp TIMESTAMP NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_ticker_multiple ON multiple_stock_prices(ticker)",
    r#"
    CREATE TABLE IF NOT EXISTS stock_info (
        id BIGSERIAL PRIMARY KEY,
        ticker VARCHAR(32) NOT NULL,
        name VARCHAR(255),
        description TEXT,
        country VARCHAR(100),
        industry VARCHAR(100),
        sector VARCHAR(100),
        employees BIGINT,
        market_cap BIGINT,
        website VARCHAR(255),
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
];

/// Checks that `keyspace` is a plain CQL identifier
///
/// The keyspace name is spliced into statements, so only letters, digits
/// and underscores are accepted, starting with a letter, at most 48 chars.
pub fn validate_keyspace(keyspace: &str) -> Result<(), AppError> {
    let mut chars = keyspace.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if starts_with_letter
        && keyspace.len() <= 48
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "invalid Cassandra keyspace name: {keyspace:?}"
        )))
    }
}

/// Cassandra DDL for `keyspace`: keyspace first, then the tables
///
/// Every table carries an `ingest_id timeuuid` clustering column so that
/// writing the same row twice appends instead of overwriting.
pub fn cassandra_schema(keyspace: &str) -> Result<Vec<String>, AppError> {
    validate_keyspace(keyspace)?;
    Ok(vec![
        format!(
            "CREATE KEYSPACE IF NOT EXISTS {keyspace} \
             WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': 1}}"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {keyspace}.market_historical_data (\
             ticker text, date timestamp, ingest_id timeuuid, \
             open double, high double, low double, close double, volume bigint, \
             PRIMARY KEY ((ticker), date, ingest_id))"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {keyspace}.stock_price (\
             ticker text, timestamp timestamp, ingest_id timeuuid, \
             price double, change double, change_percent double, currency text, \
             PRIMARY KEY ((ticker), timestamp, ingest_id))"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {keyspace}.multiple_stock_prices (\
             ticker text, timestamp timestamp, ingest_id timeuuid, \
             price double, change double, change_percent double, currency text, \
             PRIMARY KEY ((ticker), timestamp, ingest_id))"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {keyspace}.stock_info (\
             ticker text, ingest_id timeuuid, company_name text, sector text, \
             industry text, country text, website text, market_cap bigint, \
             PRIMARY KEY ((ticker), ingest_id))"
        ),
    ])
}

/// Columns of the relational insert of each route, in bind order
#[must_use]
pub fn postgres_columns(kind: RouteKind) -> &'static [&'static str] {
    match kind {
        RouteKind::Historical => &[
            "ticker",
            "date",
            "open",
            "high",
            "low",
            "close",
            "volume",
            "stock_splits",
            "dividends",
        ],
        RouteKind::Price | RouteKind::Multiple => &[
            "ticker",
            "price",
            "change",
            "change_percent",
            "currency",
            "timestamp",
        ],
        RouteKind::Info => &[
            "ticker",
            "name",
            "description",
            "country",
            "industry",
            "sector",
            "employees",
            "market_cap",
            "website",
        ],
    }
}

/// One-row `INSERT` into the relational table of `kind`
#[must_use]
pub fn postgres_insert(kind: RouteKind) -> String {
    let columns = postgres_columns(kind);
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        kind.table(),
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Bound columns of the wide-column insert of each route, in bind order
///
/// `ingest_id` is not listed: the insert fills it with `now()`.
#[must_use]
pub fn cassandra_columns(kind: RouteKind) -> &'static [&'static str] {
    match kind {
        RouteKind::Historical => &["ticker", "date", "open", "high", "low", "close", "volume"],
        RouteKind::Price | RouteKind::Multiple => &[
            "ticker",
            "timestamp",
            "price",
            "change",
            "change_percent",
            "currency",
        ],
        RouteKind::Info => &[
            "ticker",
            "company_name",
            "sector",
            "industry",
            "country",
            "website",
            "market_cap",
        ],
    }
}

/// One-row `INSERT` into `keyspace`'s table of `kind`, with a fresh
/// `ingest_id`
pub fn cassandra_insert(keyspace: &str, kind: RouteKind) -> Result<String, AppError> {
    validate_keyspace(keyspace)?;
    let columns = cassandra_columns(kind);
    Ok(format!(
        "INSERT INTO {keyspace}.{} ({}, ingest_id) VALUES ({}, now())",
        kind.table(),
        columns.join(", "),
        vec!["?"; columns.len()].join(", ")
    ))
}
