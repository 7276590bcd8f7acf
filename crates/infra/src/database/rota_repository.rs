//! SQLite-backed rota record repository.
//!
//! Implements the async `RotaRecordRepository` port over the shared
//! connection pool. The sparse `days` mapping persists as a JSON text
//! column; `rota_type` persists as its snake_case string and is re-parsed
//! at the type boundary on read.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rotaboard_core::RotaRecordRepository as RotaRecordRepositoryPort;
use rotaboard_domain::{DaySlot, Result as DomainResult, RotaBoardError, RotaRecord, RotaType};
use rusqlite::types::Type;
use rusqlite::{Row, ToSql};
use tokio::task;

use super::manager::DbManager;

/// Async rota record repository backed by SQLite.
pub struct SqliteRotaRepository {
    db: Arc<DbManager>,
}

impl SqliteRotaRepository {
    /// Construct a repository backed by the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RotaRecordRepositoryPort for SqliteRotaRepository {
    async fn fetch_all(&self) -> DomainResult<Vec<RotaRecord>> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> DomainResult<Vec<RotaRecord>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(SELECT_ALL_SQL).map_err(map_sql_error)?;
            let rows = stmt
                .query_map([], map_record_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<RotaRecord>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        task::spawn_blocking(move || -> DomainResult<Option<RotaRecord>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(SELECT_BY_ID_SQL).map_err(map_sql_error)?;
            let params: [&dyn ToSql; 1] = [&id];
            let mut rows =
                stmt.query_map(params.as_slice(), map_record_row).map_err(map_sql_error)?;
            rows.next().transpose().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert(&self, record: RotaRecord) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let days_json = encode_days(&record.days)?;
            let rota_type = record.rota_type.as_str();
            let now = Utc::now().timestamp();

            let params: [&dyn ToSql; 9] = [
                &record.id,
                &record.person_name,
                &rota_type,
                &record.month,
                &record.year,
                &days_json,
                &record.description,
                &now,
                &now,
            ];
            conn.execute(INSERT_RECORD_SQL, params.as_slice()).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, record: RotaRecord) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let days_json = encode_days(&record.days)?;
            let rota_type = record.rota_type.as_str();
            let now = Utc::now().timestamp();

            let params: [&dyn ToSql; 8] = [
                &record.person_name,
                &rota_type,
                &record.month,
                &record.year,
                &days_json,
                &record.description,
                &now,
                &record.id,
            ];
            let updated =
                conn.execute(UPDATE_RECORD_SQL, params.as_slice()).map_err(map_sql_error)?;
            if updated == 0 {
                return Err(RotaBoardError::NotFound(format!("rota record {}", record.id)));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let params: [&dyn ToSql; 1] = [&id];
            let deleted =
                conn.execute(DELETE_RECORD_SQL, params.as_slice()).map_err(map_sql_error)?;
            if deleted == 0 {
                return Err(RotaBoardError::NotFound(format!("rota record {id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

const INSERT_RECORD_SQL: &str = "INSERT INTO rota_records (
        id, person_name, rota_type, month, year,
        days_json, description, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

const SELECT_ALL_SQL: &str = "SELECT id, person_name, rota_type, month, year,
        days_json, description
    FROM rota_records
    ORDER BY created_at, id";

const SELECT_BY_ID_SQL: &str = "SELECT id, person_name, rota_type, month, year,
        days_json, description
    FROM rota_records
    WHERE id = ?1";

const UPDATE_RECORD_SQL: &str = "UPDATE rota_records SET
        person_name = ?1, rota_type = ?2, month = ?3, year = ?4,
        days_json = ?5, description = ?6, updated_at = ?7
    WHERE id = ?8";

const DELETE_RECORD_SQL: &str = "DELETE FROM rota_records WHERE id = ?1";

fn map_record_row(row: &Row<'_>) -> rusqlite::Result<RotaRecord> {
    let rota_type_raw: String = row.get(2)?;
    let rota_type = RotaType::from_str(&rota_type_raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(err)))?;

    let days_json: String = row.get(5)?;
    let days: BTreeMap<String, DaySlot> = serde_json::from_str(&days_json)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(err)))?;

    Ok(RotaRecord {
        id: row.get(0)?,
        person_name: row.get(1)?,
        rota_type,
        month: row.get(3)?,
        year: row.get(4)?,
        days,
        description: row.get(6)?,
    })
}

fn encode_days(days: &BTreeMap<String, DaySlot>) -> DomainResult<String> {
    serde_json::to_string(days)
        .map_err(|err| RotaBoardError::Database(format!("failed to encode days: {err}")))
}

fn map_sql_error(err: rusqlite::Error) -> RotaBoardError {
    RotaBoardError::Database(err.to_string())
}

fn map_join_error(err: task::JoinError) -> RotaBoardError {
    if err.is_cancelled() {
        RotaBoardError::Internal("blocking rota repository task cancelled".into())
    } else {
        RotaBoardError::Internal(format!("blocking rota repository task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn setup_repository() -> (SqliteRotaRepository, Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("tempdir created");
        let db_path = temp_dir.path().join("rota.db");

        let manager = Arc::new(DbManager::new(&db_path, 4).expect("db manager created"));
        manager.run_migrations().expect("migrations run");

        let repo = SqliteRotaRepository::new(manager.clone());
        (repo, manager, temp_dir)
    }

    fn sample_record(id: &str, month: &str) -> RotaRecord {
        let mut days = BTreeMap::new();
        days.insert("10".to_string(), DaySlot { time: Some("14:00".to_string()) });
        days.insert("15".to_string(), DaySlot::default());

        RotaRecord {
            id: id.to_string(),
            person_name: "Dupont".to_string(),
            rota_type: RotaType::Technical,
            month: month.to_string(),
            year: 2025,
            days,
            description: Some("permanence".to_string()),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn insert_and_fetch_round_trip() {
        let (repo, _manager, _temp_dir) = setup_repository().await;
        let record = sample_record("rec-1", "août");

        repo.insert(record.clone()).await.expect("insert succeeds");

        let all = repo.fetch_all().await.expect("fetch succeeds");
        assert_eq!(all, vec![record]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn find_by_id_returns_none_for_missing_record() {
        let (repo, _manager, _temp_dir) = setup_repository().await;
        let found = repo.find_by_id("ghost").await.expect("lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_replaces_the_stored_days() {
        let (repo, _manager, _temp_dir) = setup_repository().await;
        let mut record = sample_record("rec-1", "juillet");
        repo.insert(record.clone()).await.expect("insert succeeds");

        record.days.insert("20".to_string(), DaySlot { time: Some("09:30".to_string()) });
        record.person_name = "Martin".to_string();
        repo.update(record.clone()).await.expect("update succeeds");

        let found = repo.find_by_id("rec-1").await.expect("lookup succeeds");
        assert_eq!(found, Some(record));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_missing_record_reports_not_found() {
        let (repo, _manager, _temp_dir) = setup_repository().await;
        let err = repo.update(sample_record("ghost", "juillet")).await.expect_err("update fails");
        assert!(matches!(err, RotaBoardError::NotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_removes_the_record() {
        let (repo, _manager, _temp_dir) = setup_repository().await;
        repo.insert(sample_record("rec-1", "juillet")).await.expect("insert succeeds");

        repo.delete("rec-1").await.expect("delete succeeds");
        assert!(repo.fetch_all().await.expect("fetch succeeds").is_empty());

        let err = repo.delete("rec-1").await.expect_err("second delete fails");
        assert!(matches!(err, RotaBoardError::NotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn duplicate_insert_is_a_database_error() {
        let (repo, _manager, _temp_dir) = setup_repository().await;
        repo.insert(sample_record("rec-1", "juillet")).await.expect("insert succeeds");

        let err =
            repo.insert(sample_record("rec-1", "juillet")).await.expect_err("duplicate fails");
        assert!(matches!(err, RotaBoardError::Database(_)));
    }
}
