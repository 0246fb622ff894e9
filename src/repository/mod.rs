//! Repository layer for database operations
//!
//! Each entity gets an object-safe async trait so services can be wired to
//! PostgreSQL in production and to mocks in tests.

pub mod authors;
pub mod books;
pub mod sections;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use authors::{AuthorRepository, PgAuthorRepository};
pub use books::{BookRepository, PgBookRepository};
pub use sections::{PgSectionRepository, SectionRepository};
pub use users::{PgUserRepository, UserRepository};

/// Set of repositories shared by the services
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repository {
    /// Create PostgreSQL-backed repositories on the given pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBookRepository::new(pool.clone())),
            authors: Arc::new(PgAuthorRepository::new(pool.clone())),
            sections: Arc::new(PgSectionRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }
}
