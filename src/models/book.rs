//! Book model and its author links

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{author::Author, section::Section};

/// Link between a book and one of its authors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Wrote {
    pub author: Author,
}

/// Full book with its section and authors resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    /// Copyright / publication year
    pub publication_year: Option<i32>,
    pub section: Option<Section>,
    #[serde(default)]
    pub wrotes: Vec<Wrote>,
}

impl Book {
    /// Ids of the book's authors, in link order
    pub fn author_ids(&self) -> Vec<i64> {
        self.wrotes.iter().map(|w| w.author.id).collect()
    }
}

/// Reference to a section by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectionRef {
    pub id: i64,
}

/// Reference to an author by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorRef {
    pub id: i64,
}

/// Author link as sent by clients; only the author id is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WroteRef {
    pub author: AuthorRef,
}

/// Create or replace book request.
///
/// Accepts the same shape as a serialized [`Book`]: nested section and
/// authors only need their `id`, every other field is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveBook {
    #[validate(length(min = 1, max = 512, message = "Title must be 1 to 512 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 20, message = "ISBN must be 1 to 20 characters"))]
    pub isbn: String,
    pub publication_year: Option<i32>,
    pub section: Option<SectionRef>,
    #[serde(default)]
    pub wrotes: Vec<WroteRef>,
}

/// Partial book update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PatchBook {
    #[validate(length(min = 1, max = 512, message = "Title must be 1 to 512 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 20, message = "ISBN must be 1 to 20 characters"))]
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub section: Option<SectionRef>,
    /// Replaces the author list when non-empty
    pub wrotes: Option<Vec<WroteRef>>,
}

/// Book ready to persist: relations already resolved against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    /// `None` inserts a new book, `Some` replaces an existing one
    pub id: Option<i64>,
    pub title: String,
    pub isbn: String,
    pub publication_year: Option<i32>,
    pub section: Option<Section>,
    pub authors: Vec<Author>,
}

impl BookDraft {
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            isbn: self.isbn,
            publication_year: self.publication_year,
            section: self.section,
            wrotes: self.authors.into_iter().map(|author| Wrote { author }).collect(),
        }
    }
}

impl From<Book> for BookDraft {
    fn from(book: Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title,
            isbn: book.isbn,
            publication_year: book.publication_year,
            section: book.section,
            authors: book.wrotes.into_iter().map(|w| w.author).collect(),
        }
    }
}

/// Book row joined with its section
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub publication_year: Option<i32>,
    pub section_id: Option<i64>,
    pub section_name: Option<String>,
}

/// Wrote row joined with its author
#[derive(Debug, Clone, FromRow)]
pub struct WroteRow {
    pub book_id: i64,
    pub author_id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl BookRow {
    /// Assemble the book from its row and the wrote rows belonging to it
    pub fn into_book(self, wrotes: Vec<Wrote>) -> Book {
        let section = match (self.section_id, self.section_name) {
            (Some(id), Some(name)) => Some(Section { id, name }),
            _ => None,
        };
        Book {
            id: self.id,
            title: self.title,
            isbn: self.isbn,
            publication_year: self.publication_year,
            section,
            wrotes,
        }
    }
}

impl From<WroteRow> for Wrote {
    fn from(row: WroteRow) -> Self {
        Wrote {
            author: Author {
                id: row.author_id,
                first_name: row.first_name,
                last_name: row.last_name,
            },
        }
    }
}
