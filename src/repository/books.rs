//! Books repository
//!
//! Books are stored with a plain `section_id` foreign key; the author links
//! live in the `wrotes` join table and are loaded in one extra query per call.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDraft, BookRow, Wrote, WroteRow},
};

const SELECT_BOOKS: &str = r#"
    SELECT b.id, b.title, b.isbn, b.publication_year, b.section_id, s.name AS section_name
    FROM books b
    LEFT JOIN sections s ON s.id = b.section_id
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// List all books with their section and authors
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// Insert (`draft.id == None`) or replace a book and its author links.
    async fn save(&self, draft: BookDraft) -> AppResult<Book>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Delete every book, returning how many were removed
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Author order within a book, as stored in `wrotes.position`
fn link_position(index: usize) -> AppResult<i32> {
    i32::try_from(index)
        .map_err(|_| AppError::Internal(format!("Author position {} out of range", index)))
}

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Load the author links of the given books, grouped by book id
    async fn wrotes_for(&self, book_ids: &[i64]) -> AppResult<HashMap<i64, Vec<Wrote>>> {
        let rows = sqlx::query_as::<_, WroteRow>(
            r#"
            SELECT w.book_id, w.author_id, a.first_name, a.last_name
            FROM wrotes w
            JOIN authors a ON a.id = w.author_id
            WHERE w.book_id = ANY($1)
            ORDER BY w.book_id, w.position
            "#,
        )
        .bind(book_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<Wrote>> = HashMap::new();
        for row in rows {
            grouped.entry(row.book_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!("{} ORDER BY b.id", SELECT_BOOKS))
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut wrotes = self.wrotes_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let links = wrotes.remove(&row.id).unwrap_or_default();
                row.into_book(links)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!("{} WHERE b.id = $1", SELECT_BOOKS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let links = self.wrotes_for(&[row.id]).await?.remove(&row.id).unwrap_or_default();
                Ok(Some(row.into_book(links)))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, draft: BookDraft) -> AppResult<Book> {
        let section_id = draft.section.as_ref().map(|section| section.id);
        let mut tx = self.pool.begin().await?;

        let id: i64 = match draft.id {
            Some(id) => sqlx::query_scalar(
                r#"
                UPDATE books
                SET title = $1, isbn = $2, publication_year = $3, section_id = $4, modif_date = NOW()
                WHERE id = $5
                RETURNING id
                "#,
            )
            .bind(&draft.title)
            .bind(&draft.isbn)
            .bind(draft.publication_year)
            .bind(section_id)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?,
            None => sqlx::query_scalar(
                r#"
                INSERT INTO books (title, isbn, publication_year, section_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(&draft.title)
            .bind(&draft.isbn)
            .bind(draft.publication_year)
            .bind(section_id)
            .fetch_one(&mut *tx)
            .await?,
        };

        sqlx::query("DELETE FROM wrotes WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (position, author) in draft.authors.iter().enumerate() {
            sqlx::query("INSERT INTO wrotes (book_id, author_id, position) VALUES ($1, $2, $3)")
                .bind(id)
                .bind(author.id)
                .bind(link_position(position)?)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(draft.into_book(id))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
