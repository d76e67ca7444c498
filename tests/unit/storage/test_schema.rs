use finance_pipeline::application::interfaces::sink::RouteKind;
use finance_pipeline::storage::schema::{POSTGRES_SCHEMA, cassandra_schema, validate_keyspace};

const KINDS: [RouteKind; 4] = [
    RouteKind::Historical,
    RouteKind::Price,
    RouteKind::Multiple,
    RouteKind::Info,
];

#[test]
fn test_every_route_table_exists_in_postgres() {
    for kind in KINDS {
        let create = format!("CREATE TABLE IF NOT EXISTS {} (", kind.table());
        assert!(
            POSTGRES_SCHEMA.iter().any(|s| s.contains(&create)),
            "missing table {}",
            kind.table()
        );
    }
}

#[test]
fn test_every_route_table_exists_in_cassandra() {
    let statements = cassandra_schema("finance").unwrap();
    for kind in KINDS {
        let create = format!("CREATE TABLE IF NOT EXISTS finance.{} (", kind.table());
        assert!(statements.iter().any(|s| s.contains(&create)));
    }
}

#[test]
fn test_cassandra_tables_append() {
    for statement in cassandra_schema("finance").unwrap().iter().skip(1) {
        assert!(statement.contains("ingest_id timeuuid"));
        assert!(statement.contains("ingest_id))"));
    }
}

#[test]
fn test_cassandra_schema_rejects_bad_keyspace() {
    assert!(cassandra_schema("finance-prod").is_err());
    assert!(validate_keyspace("finance_prod").is_ok());
}
