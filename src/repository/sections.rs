//! Sections repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::section::{CreateSection, Section},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// List all sections
    async fn find_all(&self) -> AppResult<Vec<Section>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Section>>;

    async fn create(&self, data: &CreateSection) -> AppResult<Section>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Number of books shelved in the section
    async fn count_books(&self, id: i64) -> AppResult<i64>;
}

/// A book shelved between the emptiness check and the delete trips the
/// `books.section_id` foreign key.
fn delete_error(id: i64, e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            AppError::BusinessRule(format!("Section {} still has books", id))
        }
        e => AppError::Database(e),
    }
}

#[derive(Clone)]
pub struct PgSectionRepository {
    pool: Pool<Postgres>,
}

impl PgSectionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionRepository for PgSectionRepository {
    async fn find_all(&self) -> AppResult<Vec<Section>> {
        let rows = sqlx::query_as::<_, Section>("SELECT id, name FROM sections ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Section>> {
        let row = sqlx::query_as::<_, Section>("SELECT id, name FROM sections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, data: &CreateSection) -> AppResult<Section> {
        let row = sqlx::query_as::<_, Section>(
            "INSERT INTO sections (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Section {} already exists", data.name))
            }
            e => AppError::Database(e),
        })?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(id, e))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Section {} not found", id)));
        }
        Ok(())
    }

    async fn count_books(&self, id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM books WHERE section_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
