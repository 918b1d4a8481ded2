//! SQLite diagnostic repository implementation.
//!
//! Implements `DiagnosticRepository` from `pitstop-core` using sqlx with
//! split read/write pools: raw queries, a private Row struct, reads on
//! the reader pool and writes on the writer pool.

use chrono::{DateTime, Utc};
use sqlx::Row;

use pitstop_core::repository::diagnostic::DiagnosticRepository;
use pitstop_types::diagnostic::{Diagnostic, DiagnosticDraft, DiagnosticType};
use pitstop_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `DiagnosticRepository`.
pub struct SqliteDiagnosticRepository {
    pool: DatabasePool,
}

impl SqliteDiagnosticRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Diagnostic.
struct DiagnosticRow {
    id: i64,
    mechanic: String,
    car_number: String,
    mileage: i64,
    diagnostic_type: String,
    created_at: String,
}

impl DiagnosticRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            mechanic: row.try_get("mechanic")?,
            car_number: row.try_get("car_number")?,
            mileage: row.try_get("mileage")?,
            diagnostic_type: row.try_get("diagnostic_type")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_diagnostic(self) -> Result<Diagnostic, RepositoryError> {
        let diagnostic_type: DiagnosticType = self
            .diagnostic_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Diagnostic {
            id: self.id,
            mechanic: self.mechanic,
            car_number: self.car_number,
            mileage: self.mileage,
            diagnostic_type,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl DiagnosticRepository for SqliteDiagnosticRepository {
    async fn save(&self, draft: &DiagnosticDraft) -> Result<Diagnostic, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO diagnostics (mechanic, car_number, mileage, diagnostic_type, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&draft.mechanic)
        .bind(&draft.car_number)
        .bind(draft.mileage)
        .bind(draft.diagnostic_type.code())
        .bind(format_datetime(&created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Diagnostic {
            id: result.last_insert_rowid(),
            mechanic: draft.mechanic.clone(),
            car_number: draft.car_number.clone(),
            mileage: draft.mileage,
            diagnostic_type: draft.diagnostic_type,
            created_at,
        })
    }

    async fn list(&self, limit: i64) -> Result<Vec<Diagnostic>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, mechanic, car_number, mileage, diagnostic_type, created_at
             FROM diagnostics ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                DiagnosticRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_diagnostic()
            })
            .collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Diagnostic>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, mechanic, car_number, mileage, diagnostic_type, created_at
             FROM diagnostics WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let diagnostic_row = DiagnosticRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(diagnostic_row.into_diagnostic()?))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM diagnostics WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> (tempfile::TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, pool)
    }

    fn draft(car_number: &str) -> DiagnosticDraft {
        DiagnosticDraft {
            mechanic: "Костенко В.Ю.".to_string(),
            car_number: car_number.to_string(),
            mileage: 150_000,
            diagnostic_type: DiagnosticType::Dhch,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_timestamp() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteDiagnosticRepository::new(pool);

        let saved = repo.save(&draft("A159BK124")).await.unwrap();
        assert!(saved.id > 0);
        assert_eq!(saved.car_number, "A159BK124");
        assert_eq!(saved.diagnostic_type, DiagnosticType::Dhch);
    }

    #[tokio::test]
    async fn test_get_round_trips() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteDiagnosticRepository::new(pool);

        let saved = repo.save(&draft("A159BK124")).await.unwrap();
        let fetched = repo.get(saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, saved.id);
        assert_eq!(fetched.mechanic, "Костенко В.Ю.");
        assert_eq!(fetched.mileage, 150_000);

        assert!(repo.get(saved.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_limited() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteDiagnosticRepository::new(pool);

        for n in 0..3 {
            repo.save(&draft(&format!("A{n}00BK124"))).await.unwrap();
        }

        let all = repo.list(50).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all[0].id > all[1].id && all[1].id > all[2].id);

        let limited = repo.list(2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteDiagnosticRepository::new(pool);

        let saved = repo.save(&draft("A159BK124")).await.unwrap();
        repo.delete(saved.id).await.unwrap();
        assert!(matches!(
            repo.delete(saved.id).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
