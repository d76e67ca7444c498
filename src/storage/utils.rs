use crate::error::AppError;
use crate::model::retry::{RetryConfig, retry_with_backoff};
use crate::storage::cassandra::CassandraStore;
use crate::storage::config::{CassandraConfig, DatabaseConfig};
use crate::storage::postgres::PostgresStore;
use sqlx::PgPool;
use tracing::info;

/// Creates a PostgreSQL connection pool from database configuration
///
/// # Arguments
/// * `config` - Database configuration containing URL and max connections
///
/// # Returns
/// * `Result<PgPool, AppError>` - Connection pool or an error
pub async fn create_connection_pool(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    info!(
        "Creating PostgreSQL connection pool with max {} connections",
        config.max_connections
    );

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .map_err(AppError::Db)?;

    info!("PostgreSQL connection pool created successfully");
    Ok(pool)
}

/// Connects to PostgreSQL and creates the schema, retrying per `retry`
pub async fn connect_postgres(
    config: &DatabaseConfig,
    retry: &RetryConfig,
) -> Result<PostgresStore, AppError> {
    retry_with_backoff("PostgreSQL", retry, || async move {
        let store = PostgresStore::new(create_connection_pool(config).await?);
        store.init_schema().await?;
        Ok(store)
    })
    .await
}

/// Connects to Cassandra and creates the keyspace and tables, retrying per
/// `retry`
pub async fn connect_cassandra(
    config: &CassandraConfig,
    retry: &RetryConfig,
) -> Result<CassandraStore, AppError> {
    retry_with_backoff("Cassandra", retry, || CassandraStore::connect(config)).await
}
