//! Database Module
//!
//! Embedded SurrealDB storage: connection setup and table definitions.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "booking";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB instance
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;

        define_tables(&db).await?;

        tracing::info!("Database ready at {}", db_path);
        Ok(Self { db })
    }
}

/// In-memory database for unit tests
#[cfg(test)]
pub(crate) async fn test_db() -> Surreal<Db> {
    use surrealdb::engine::local::Mem;

    let db = Surreal::new::<Mem>(()).await.expect("in-memory db");
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .expect("namespace");
    define_tables(&db).await.expect("schema");
    db
}

/// Define the application tables.
///
/// Tables stay schemaless (legacy rows carry status tokens outside the
/// current vocabulary); the definitions exist so a fresh database starts
/// with every table present instead of materializing them on first write.
pub async fn define_tables(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "
        DEFINE TABLE IF NOT EXISTS room SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS reservation SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS status_history SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS blocked_date SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS payment_proof SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS account SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS message SCHEMALESS;
        ",
    )
    .await
    .map_err(|e| AppError::Database(format!("Failed to define tables: {e}")))?;
    Ok(())
}
