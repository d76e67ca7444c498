use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};

/// Configuration of the relational store
#[derive(Debug, DisplaySimple, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// Configuration of the wide-column store
#[derive(Debug, DisplaySimple, Serialize, Deserialize, Clone)]
pub struct CassandraConfig {
    /// Contact points (host names or addresses)
    pub nodes: Vec<String>,
    /// Native protocol port
    pub port: u16,
    /// Plain-text auth user
    pub username: String,
    /// Plain-text auth password
    pub password: String,
    /// Keyspace holding the tables
    pub keyspace: String,
}

impl CassandraConfig {
    /// Contact points as `host:port`
    #[must_use]
    pub fn known_nodes(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|node| {
                if node.contains(':') {
                    node.clone()
                } else {
                    format!("{}:{}", node, self.port)
                }
            })
            .collect()
    }
}
