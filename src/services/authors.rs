//! Author service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor},
    repository::AuthorRepository,
};

#[derive(Clone)]
pub struct AuthorService {
    authors: Arc<dyn AuthorRepository>,
}

impl AuthorService {
    pub fn new(authors: Arc<dyn AuthorRepository>) -> Self {
        Self { authors }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Author>> {
        self.authors.find_all().await
    }

    pub async fn find_author_by_id(&self, id: i64) -> AppResult<Author> {
        self.authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    pub async fn save(&self, data: &CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self.authors.create(data).await?;
        tracing::info!(
            "Created author id={} ({} {})",
            author.id,
            author.first_name,
            author.last_name
        );
        Ok(author)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.find_author_by_id(id).await?;
        self.authors.delete_by_id(id).await?;
        tracing::info!("Deleted author id={}", id);
        Ok(())
    }
}
