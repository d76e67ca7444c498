/// Wide-column (Cassandra) sink
pub mod cassandra;
/// Module containing database configuration structures
pub mod config;
/// Relational (PostgreSQL) sink
pub mod postgres;
/// Table definitions of both stores
pub mod schema;
/// Connection helpers with startup retry
pub mod utils;

pub use cassandra::CassandraStore;
pub use postgres::PostgresStore;
