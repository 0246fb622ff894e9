//! Seed catalog and request helpers shared by the unit tests.
//!
//! The catalog mirrors the rows inserted by the initial migration.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
};
use tower::ServiceExt;

use crate::{
    api::create_router,
    models::{Author, Book, Role, Section, UserClaims, Wrote},
    repository::{
        authors::MockAuthorRepository, books::MockBookRepository,
        sections::MockSectionRepository, users::MockUserRepository, Repository,
    },
    services::Services,
    AppConfig, AppState,
};

pub fn authors() -> Vec<Author> {
    vec![
        Author::new(1, "John", "Mitchell"),
        Author::new(2, "Dan", "Brown"),
        Author::new(3, "Jerry", "Poe"),
        Author::new(4, "Wells", "Teague"),
        Author::new(5, "George", "Gallinger"),
        Author::new(6, "Ian", "Stewart"),
    ]
}

pub fn sections() -> Vec<Section> {
    ["Fiction", "Technology", "Travel", "Business", "Religion"]
        .iter()
        .zip(1..)
        .map(|(name, id)| Section {
            id,
            name: name.to_string(),
        })
        .collect()
}

fn book(id: i64, title: &str, isbn: &str, year: Option<i32>, section: usize, authors: &[usize]) -> Book {
    let all_authors = self::authors();
    Book {
        id,
        title: title.to_string(),
        isbn: isbn.to_string(),
        publication_year: year,
        section: Some(sections()[section - 1].clone()),
        wrotes: authors
            .iter()
            .map(|a| Wrote {
                author: all_authors[a - 1].clone(),
            })
            .collect(),
    }
}

pub fn books() -> Vec<Book> {
    vec![
        book(1, "Flatterland", "9780738206752", Some(2001), 1, &[6]),
        book(2, "Digital Fortess", "9788489367012", Some(2007), 1, &[2]),
        book(3, "The Da Vinci Code", "9780307474278", Some(2009), 1, &[2]),
        book(4, "Essentials of Finance", "1314241651234", None, 4, &[3, 5]),
        book(5, "Calling Texas Home", "1885171382134", Some(2000), 3, &[4]),
    ]
}

/// Section repository that knows the seeded sections
pub fn section_repository() -> MockSectionRepository {
    let mut sections = MockSectionRepository::new();
    sections
        .expect_find_by_id()
        .returning(|id| Ok(self::sections().into_iter().find(|s| s.id == id)));
    sections
}

/// Author repository that knows the seeded authors
pub fn author_repository() -> MockAuthorRepository {
    let mut authors = MockAuthorRepository::new();
    authors
        .expect_find_by_id()
        .returning(|id| Ok(self::authors().into_iter().find(|a| a.id == id)));
    authors
}

/// Application state over the given repositories, default configuration
pub fn state(repository: Repository) -> AppState {
    let config = AppConfig::default();
    AppState {
        services: Arc::new(Services::new(repository, config.auth.clone())),
        config: Arc::new(config),
    }
}

/// Repositories that fail the test on any call unless overridden
pub fn repository() -> Repository {
    Repository {
        books: Arc::new(MockBookRepository::new()),
        authors: Arc::new(MockAuthorRepository::new()),
        sections: Arc::new(MockSectionRepository::new()),
        users: Arc::new(MockUserRepository::new()),
    }
}

/// Bearer header value for a user holding `roles`
pub fn bearer(roles: &[Role]) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = UserClaims {
        sub: "admin".to_string(),
        user_id: 1,
        roles: roles.to_vec(),
        exp: now + 3600,
        iat: now,
    };
    let token = claims
        .create_token(&AppConfig::default().auth.jwt_secret)
        .unwrap();
    format!("Bearer {}", token)
}

/// Send one request through the full router
pub async fn send(state: AppState, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}
