//! Business logic services

pub mod auth;
pub mod authors;
pub mod books;
pub mod sections;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub authors: authors::AuthorService,
    pub books: books::BookService,
    pub sections: sections::SectionService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let sections = sections::SectionService::new(repository.sections.clone());
        Self {
            auth: auth::AuthService::new(repository.users.clone(), auth_config),
            authors: authors::AuthorService::new(repository.authors.clone()),
            books: books::BookService::new(
                repository.books.clone(),
                repository.authors.clone(),
                sections.clone(),
            ),
            sections,
        }
    }
}
