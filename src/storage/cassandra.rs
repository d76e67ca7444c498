use crate::application::interfaces::sink::{Record, RecordSink, RouteKind};
use crate::error::AppError;
use crate::presentation::market::{CompanyInfo, HistoricalBar, Quote};
use crate::storage::config::CassandraConfig;
use crate::storage::schema::{cassandra_insert, cassandra_schema};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use scylla::frame::value::CqlTimestamp;
use scylla::prepared_statement::PreparedStatement;
use scylla::{Session, SessionBuilder};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info};

type BarRow<'a> = (&'a str, CqlTimestamp, f64, f64, f64, f64, i64);
type QuoteRow<'a> = (&'a str, CqlTimestamp, f64, f64, f64, &'a str);
type InfoRow<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str, &'a str, i64);

/// Prepared inserts, one per table
#[derive(Debug, Clone)]
struct Statements {
    historical: PreparedStatement,
    price: PreparedStatement,
    multiple: PreparedStatement,
    info: PreparedStatement,
}

/// Wide-column sink backed by a Cassandra session
///
/// One statement per row; there is no batch, so a historical write that
/// fails halfway leaves the rows already written in place.
#[derive(Clone)]
pub struct CassandraStore {
    session: Arc<Session>,
    keyspace: String,
    statements: Statements,
}

fn wide_column_error(e: impl Display) -> AppError {
    AppError::WideColumn(e.to_string())
}

fn cql_timestamp(value: NaiveDateTime) -> CqlTimestamp {
    CqlTimestamp(value.and_utc().timestamp_millis())
}

fn bar_row<'a>(ticker: &'a str, bar: &HistoricalBar) -> BarRow<'a> {
    (
        ticker,
        cql_timestamp(bar.date),
        bar.open,
        bar.high,
        bar.low,
        bar.close,
        i64::try_from(bar.volume).unwrap_or(i64::MAX),
    )
}

fn quote_row(quote: &Quote) -> QuoteRow<'_> {
    (
        quote.ticker.as_str(),
        cql_timestamp(quote.timestamp),
        quote.price,
        quote.change,
        quote.change_percent,
        quote.currency.as_str(),
    )
}

fn info_row(info: &CompanyInfo) -> InfoRow<'_> {
    (
        info.ticker.as_str(),
        info.name.as_str(),
        info.sector.as_str(),
        info.industry.as_str(),
        info.country.as_str(),
        info.website.as_str(),
        info.market_cap,
    )
}

impl CassandraStore {
    /// Connects to the cluster, creates the keyspace and tables and prepares
    /// the inserts
    pub async fn connect(config: &CassandraConfig) -> Result<Self, AppError> {
        let nodes = config.known_nodes();
        info!("Connecting to Cassandra at {}", nodes.join(", "));

        let session = SessionBuilder::new()
            .known_nodes(&nodes)
            .user(&config.username, &config.password)
            .build()
            .await
            .map_err(wide_column_error)?;

        for statement in cassandra_schema(&config.keyspace)? {
            session
                .query_unpaged(statement, ())
                .await
                .map_err(wide_column_error)?;
        }
        info!("Cassandra keyspace {} ready", config.keyspace);

        let keyspace = config.keyspace.as_str();
        let statements = Statements {
            historical: prepare(&session, keyspace, RouteKind::Historical).await?,
            price: prepare(&session, keyspace, RouteKind::Price).await?,
            multiple: prepare(&session, keyspace, RouteKind::Multiple).await?,
            info: prepare(&session, keyspace, RouteKind::Info).await?,
        };

        Ok(Self {
            session: Arc::new(session),
            keyspace: config.keyspace.clone(),
            statements,
        })
    }

    /// Keyspace holding the tables
    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    async fn insert_quote(
        &self,
        statement: &PreparedStatement,
        quote: &Quote,
    ) -> Result<usize, AppError> {
        self.session
            .execute_unpaged(statement, quote_row(quote))
            .await
            .map_err(wide_column_error)?;
        Ok(1)
    }
}

async fn prepare(
    session: &Session,
    keyspace: &str,
    kind: RouteKind,
) -> Result<PreparedStatement, AppError> {
    let statement = cassandra_insert(keyspace, kind)?;
    debug!("Preparing: {}", statement);
    session.prepare(statement).await.map_err(wide_column_error)
}

#[async_trait]
impl RecordSink for CassandraStore {
    fn name(&self) -> &str {
        "cassandra"
    }

    async fn write(&self, record: &Record<'_>) -> Result<usize, AppError> {
        match record {
            Record::Historical { ticker, bars } => {
                let mut inserted = 0;
                for bar in bars.iter() {
                    self.session
                        .execute_unpaged(&self.statements.historical, bar_row(ticker, bar))
                        .await
                        .map_err(wide_column_error)?;
                    inserted += 1;
                }
                Ok(inserted)
            }
            Record::Price(quote) => self.insert_quote(&self.statements.price, quote).await,
            Record::Multiple(quote) => self.insert_quote(&self.statements.multiple, quote).await,
            Record::Info(info) => {
                self.session
                    .execute_unpaged(&self.statements.info, info_row(info))
                    .await
                    .map_err(wide_column_error)?;
                Ok(1)
            }
        }
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.session
            .query_unpaged("SELECT release_version FROM system.local", ())
            .await
            .map_err(wide_column_error)?;
        Ok(())
    }
}

impl std::fmt::Debug for CassandraStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CassandraStore")
            .field("keyspace", &self.keyspace)
            .finish()
    }
}
