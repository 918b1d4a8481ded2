//! SQLite mechanic repository implementation.

use chrono::{DateTime, Utc};
use sqlx::Row;

use pitstop_core::repository::mechanic::MechanicRepository;
use pitstop_types::error::RepositoryError;
use pitstop_types::mechanic::Mechanic;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MechanicRepository`.
pub struct SqliteMechanicRepository {
    pool: DatabasePool,
}

impl SqliteMechanicRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn mechanic_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Mechanic, RepositoryError> {
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    Ok(Mechanic {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl MechanicRepository for SqliteMechanicRepository {
    async fn create(&self, name: &str) -> Result<Mechanic, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query("INSERT INTO mechanics (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(created_at.to_rfc3339())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Mechanic {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            created_at,
        })
    }

    async fn list(&self) -> Result<Vec<Mechanic>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, created_at FROM mechanics ORDER BY name")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(mechanic_from_row).collect()
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM mechanics WHERE id = ?")
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

    #[tokio::test]
    async fn test_create_and_list_sorted_by_name() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteMechanicRepository::new(pool);

        repo.create("Подкорытов С.А.").await.unwrap();
        repo.create("Иванюта Д.И.").await.unwrap();

        let mechanics = repo.list().await.unwrap();
        assert_eq!(mechanics.len(), 2);
        assert_eq!(mechanics[0].name, "Иванюта Д.И.");
        assert_eq!(mechanics[1].name, "Подкорытов С.А.");
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteMechanicRepository::new(pool);

        let mechanic = repo.create("Костенко В.Ю.").await.unwrap();
        repo.delete(mechanic.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(
            repo.delete(mechanic.id).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
