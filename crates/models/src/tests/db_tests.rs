use crate::db::{connect_in_memory, connect_with_config, ensure_schema};
use anyhow::Result;
use configs::DatabaseConfig;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// In-memory connection answers a trivial query
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let db = connect_in_memory().await?;
    assert_eq!(db.get_database_backend(), DatabaseBackend::Sqlite);

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1 AS test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}

/// Running the bootstrap twice is harmless
#[tokio::test]
async fn test_ensure_schema_is_idempotent() -> Result<()> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    ensure_schema(&db).await?;
    ensure_schema(&db).await?;

    let stmt = Statement::from_string(
        DatabaseBackend::Sqlite,
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'users'".to_string(),
    );
    let found = db.query_one(stmt).await?;
    assert!(found.is_some());
    Ok(())
}

/// A bad URL surfaces as an error, not a panic
#[tokio::test]
async fn test_connect_rejects_unknown_scheme() {
    let cfg = DatabaseConfig { url: "nosuchdb://localhost".into(), ..DatabaseConfig::default() };
    assert!(connect_with_config(&cfg).await.is_err());
}
