/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::application::interfaces::sink::{Record, RecordSink};
use crate::error::AppError;
use crate::presentation::market::{CompanyInfo, HistoricalBar, Quote};
use crate::storage::schema::{POSTGRES_SCHEMA, postgres_insert};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Relational sink backed by a PostgreSQL pool
///
/// Each write runs in its own transaction: all rows of a record are
/// committed together or not at all.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the tables and indexes when missing
    pub async fn init_schema(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for statement in POSTGRES_SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        info!("PostgreSQL schema ready");
        Ok(())
    }

    async fn insert(conn: &mut PgConnection, record: &Record<'_>) -> Result<usize, AppError> {
        let statement = postgres_insert(record.kind());
        let mut inserted = 0;
        match record {
            Record::Historical { ticker, bars } => {
                for bar in bars.iter() {
                    let result = bar_query(&statement, ticker, bar).execute(&mut *conn).await?;
                    inserted += result.rows_affected() as usize;
                }
            }
            Record::Price(quote) | Record::Multiple(quote) => {
                let result = quote_query(&statement, quote).execute(&mut *conn).await?;
                inserted += result.rows_affected() as usize;
            }
            Record::Info(info) => {
                let result = info_query(&statement, info).execute(&mut *conn).await?;
                inserted += result.rows_affected() as usize;
            }
        }
        Ok(inserted)
    }
}

fn bar_query<'q>(statement: &'q str, ticker: &'q str, bar: &HistoricalBar) -> PgQuery<'q> {
    sqlx::query(statement)
        .bind(ticker)
        .bind(bar.date)
        .bind(bar.open)
        .bind(bar.high)
        .bind(bar.low)
        .bind(bar.close)
        .bind(i64::try_from(bar.volume).unwrap_or(i64::MAX))
        .bind(bar.stock_splits)
        .bind(bar.dividends)
}

fn quote_query<'q>(statement: &'q str, quote: &'q Quote) -> PgQuery<'q> {
    sqlx::query(statement)
        .bind(quote.ticker.as_str())
        .bind(quote.price)
        .bind(quote.change)
        .bind(quote.change_percent)
        .bind(quote.currency.as_str())
        .bind(quote.timestamp)
}

fn info_query<'q>(statement: &'q str, info: &'q CompanyInfo) -> PgQuery<'q> {
    sqlx::query(statement)
        .bind(info.ticker.as_str())
        .bind(info.name.as_str())
        .bind(info.description.as_str())
        .bind(info.country.as_str())
        .bind(info.industry.as_str())
        .bind(info.sector.as_str())
        .bind(info.employee_count)
        .bind(info.market_cap)
        .bind(info.website.as_str())
}

#[async_trait]
impl RecordSink for PostgresStore {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn write(&self, record: &Record<'_>) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;
        // an early return drops the transaction, which rolls it back
        let inserted = Self::insert(&mut *tx, record).await?;
        tx.commit().await?;

        debug!(
            "Committed {} row(s) into {}",
            inserted,
            record.kind().table()
        );
        Ok(inserted)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
