//! Connection pool and schema management.

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rotaboard_domain::{Result, RotaBoardError};
use tracing::info;

/// Pooled connection handle used by repositories.
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS rota_records (
        id TEXT PRIMARY KEY,
        person_name TEXT NOT NULL,
        rota_type TEXT NOT NULL,
        month TEXT NOT NULL,
        year INTEGER NOT NULL,
        days_json TEXT NOT NULL,
        description TEXT,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_rota_records_year_month
        ON rota_records (year, month);
";

/// Shared SQLite connection pool.
pub struct DbManager {
    pool: Pool<SqliteConnectionManager>,
}

impl DbManager {
    /// Open (or create) the database at `path` with a pool of `pool_size`
    /// connections.
    pub fn new(path: &Path, pool_size: u32) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(pool_size).build(manager).map_err(|err| {
            RotaBoardError::Database(format!("failed to build connection pool: {err}"))
        })?;

        info!(path = %path.display(), pool_size, "database pool initialized");
        Ok(Self { pool })
    }

    /// Borrow a connection from the pool.
    pub fn get_connection(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .map_err(|err| RotaBoardError::Database(format!("connection unavailable: {err}")))
    }

    /// Apply the schema. Idempotent; safe to run at every startup.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|err| RotaBoardError::Database(format!("migration failed: {err}")))
    }
}
