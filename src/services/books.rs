//! Book service
//!
//! Resolves a book's section and authors against the store before it is
//! persisted, so a saved book never points at a missing section or author.

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookDraft, PatchBook, SaveBook, WroteRef},
        Author,
    },
    repository::{AuthorRepository, BookRepository},
};

use super::sections::SectionService;

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
    authors: Arc<dyn AuthorRepository>,
    sections: SectionService,
}

impl BookService {
    pub fn new(
        books: Arc<dyn BookRepository>,
        authors: Arc<dyn AuthorRepository>,
        sections: SectionService,
    ) -> Self {
        Self {
            books,
            authors,
            sections,
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Book>> {
        self.books.find_all().await
    }

    pub async fn find_book_by_id(&self, id: i64) -> AppResult<Book> {
        tracing::debug!("Looking up book id={}", id);
        self.books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Create a book (`id == None`) or fully replace an existing one.
    pub async fn save(&self, id: Option<i64>, book: SaveBook) -> AppResult<Book> {
        book.validate()?;

        if let Some(id) = id {
            self.find_book_by_id(id).await?;
        }

        let section = match book.section {
            Some(section) => Some(self.sections.find_section_by_id(section.id).await?),
            None => None,
        };
        let authors = self.resolve_authors(&book.wrotes).await?;

        let saved = self
            .books
            .save(BookDraft {
                id,
                title: book.title,
                isbn: book.isbn,
                publication_year: book.publication_year,
                section,
                authors,
            })
            .await?;

        tracing::info!("Saved book id={} title={:?}", saved.id, saved.title);
        Ok(saved)
    }

    /// Apply the fields present in `patch` to a stored book
    pub async fn update(&self, id: i64, patch: PatchBook) -> AppResult<Book> {
        patch.validate()?;

        let mut draft = BookDraft::from(self.find_book_by_id(id).await?);

        if let Some(title) = patch.title {
            draft.title = title;
        }
        if let Some(isbn) = patch.isbn {
            draft.isbn = isbn;
        }
        if patch.publication_year.is_some() {
            draft.publication_year = patch.publication_year;
        }
        if let Some(section) = patch.section {
            draft.section = Some(self.sections.find_section_by_id(section.id).await?);
        }
        if let Some(wrotes) = patch.wrotes.filter(|wrotes| !wrotes.is_empty()) {
            draft.authors = self.resolve_authors(&wrotes).await?;
        }

        let updated = self.books.save(draft).await?;
        tracing::info!("Updated book id={}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.find_book_by_id(id).await?;
        self.books.delete_by_id(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    pub async fn delete_all(&self) -> AppResult<u64> {
        let removed = self.books.delete_all().await?;
        tracing::info!("Deleted all books ({} removed)", removed);
        Ok(removed)
    }

    /// Look every referenced author up, keeping the first occurrence of
    /// duplicated ids.
    async fn resolve_authors(&self, wrotes: &[WroteRef]) -> AppResult<Vec<Author>> {
        let mut authors: Vec<Author> = Vec::with_capacity(wrotes.len());
        for wrote in wrotes {
            let id = wrote.author.id;
            if authors.iter().any(|author| author.id == id) {
                continue;
            }
            let author = self
                .authors
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;
            authors.push(author);
        }
        Ok(authors)
    }
}
