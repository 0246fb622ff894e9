//! Book endpoints

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::AppResult,
    models::book::{Book, PatchBook, SaveBook},
};

use super::{AuthenticatedUser, CatalogWriter, JsonBody};

/// List all books
#[utoipa::path(
    get,
    path = "/books/books",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All books", body = Vec<Book>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_all_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.find_all().await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/book/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_by_id(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.find_book_by_id(id).await?;
    Ok(Json(book))
}

/// Create a book; its section and authors are referenced by id
#[utoipa::path(
    post,
    path = "/books/book",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = SaveBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Malformed or invalid book", body = crate::error::ErrorResponse),
        (status = 403, description = "ADMIN or DATA role required"),
        (status = 404, description = "Referenced section or author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_new_book(
    State(state): State<crate::AppState>,
    CatalogWriter(_writer): CatalogWriter,
    WithRejection(Json(data), _): JsonBody<SaveBook>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<Book>)> {
    let book = state.services.books.save(None, data).await?;
    let location = format!("/books/book/{}", book.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

/// Replace a book
#[utoipa::path(
    put,
    path = "/books/book/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body = SaveBook,
    responses(
        (status = 200, description = "Book replaced", body = Book),
        (status = 404, description = "Book, section or author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_full_book(
    State(state): State<crate::AppState>,
    CatalogWriter(_writer): CatalogWriter,
    Path(id): Path<i64>,
    WithRejection(Json(data), _): JsonBody<SaveBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.save(Some(id), data).await?;
    Ok(Json(book))
}

/// Update some fields of a book
#[utoipa::path(
    patch,
    path = "/books/book/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body = PatchBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book, section or author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    CatalogWriter(_writer): CatalogWriter,
    Path(id): Path<i64>,
    WithRejection(Json(data), _): JsonBody<PatchBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update(id, data).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/book/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book_by_id(
    State(state): State<crate::AppState>,
    CatalogWriter(_writer): CatalogWriter,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, header::CONTENT_TYPE, Request},
    };

    use super::*;
    use crate::{
        error::ErrorResponse,
        fixtures,
        models::{Author, Role, Section, Wrote},
        repository::books::MockBookRepository,
    };

    const ADMIN: &[Role] = &[Role::Admin, Role::Data];

    fn state_with(books: MockBookRepository) -> crate::AppState {
        let mut repository = fixtures::repository();
        repository.books = Arc::new(books);
        repository.authors = Arc::new(fixtures::author_repository());
        repository.sections = Arc::new(fixtures::section_repository());
        fixtures::state(repository)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(AUTHORIZATION, fixtures::bearer(ADMIN))
            .body(Body::empty())
            .unwrap()
    }

    fn new_book_json() -> String {
        let book = Book {
            id: 0,
            title: "Flatterland".to_string(),
            isbn: "9780738206752".to_string(),
            publication_year: Some(2001),
            section: Some(Section {
                id: 1,
                name: "Fiction".to_string(),
            }),
            wrotes: vec![Wrote {
                author: Author::new(1, "Ian", "Stewart"),
            }],
        };
        serde_json::to_string(&book).unwrap()
    }

    fn post_book(roles: &[Role]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/books/book")
            .header(AUTHORIZATION, fixtures::bearer(roles))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(new_book_json()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_all_books() {
        let mut books = MockBookRepository::new();
        books.expect_find_all().returning(|| Ok(fixtures::books()));

        let (status, _, body) = fixtures::send(state_with(books), get("/books/books")).await;

        assert_eq!(status, StatusCode::OK);
        let expected = serde_json::to_string(&fixtures::books()).unwrap();
        assert_eq!(String::from_utf8(body.to_vec()).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_get_book_by_id() {
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .returning(|_| Ok(fixtures::books().into_iter().next()));

        let (status, _, body) = fixtures::send(state_with(books), get("/books/book/1")).await;

        assert_eq!(status, StatusCode::OK);
        let expected = serde_json::to_string(&fixtures::books()[0]).unwrap();
        assert_eq!(String::from_utf8(body.to_vec()).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_get_no_book_by_id() {
        let mut books = MockBookRepository::new();
        books.expect_find_by_id().returning(|_| Ok(None));

        let (status, _, body) = fixtures::send(state_with(books), get("/books/book/100")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "ResourceNotFound");
        assert_eq!(error.message, "Book 100 not found");
    }

    #[tokio::test]
    async fn test_list_requires_token() {
        let request = Request::builder()
            .uri("/books/books")
            .body(Body::empty())
            .unwrap();

        let (status, _, _) = fixtures::send(state_with(MockBookRepository::new()), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_add_new_book() {
        let mut books = MockBookRepository::new();
        books
            .expect_save()
            .times(1)
            .returning(|draft| Ok(draft.into_book(6)));

        let (status, headers, body) = fixtures::send(state_with(books), post_book(ADMIN)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(headers[header::LOCATION], "/books/book/6");
        let created: Book = serde_json::from_slice(&body).unwrap();
        assert_eq!(created.title, "Flatterland");
        // Author 1 resolves to the stored record, not the client copy
        assert_eq!(created.wrotes[0].author.last_name, "Mitchell");
    }

    #[tokio::test]
    async fn test_add_new_book_forbidden_for_plain_user() {
        let mut books = MockBookRepository::new();
        books.expect_save().never();

        let (status, _, _) = fixtures::send(state_with(books), post_book(&[Role::User])).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    fn post_raw(authorization: Option<String>, body: &'static str) -> Request<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri("/books/book")
            .header(CONTENT_TYPE, "application/json");
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        request.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_add_book_without_isbn() {
        let mut books = MockBookRepository::new();
        books.expect_save().never();

        let request = post_raw(
            Some(fixtures::bearer(ADMIN)),
            r#"{"title":"X","section":{"id":1}}"#,
        );
        let (status, headers, body) = fixtures::send(state_with(books), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "BadValue");
        assert!(error.message.contains("isbn"));
    }

    #[tokio::test]
    async fn test_add_book_malformed_json() {
        let request = post_raw(Some(fixtures::bearer(ADMIN)), "{not json");
        let (status, _, body) = fixtures::send(state_with(MockBookRepository::new()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(serde_json::from_slice::<ErrorResponse>(&body).is_ok());
    }

    #[tokio::test]
    async fn test_plain_user_with_invalid_body_forbidden() {
        let request = post_raw(Some(fixtures::bearer(&[Role::User])), r#"{"title":"X"}"#);
        let (status, _, body) = fixtures::send(state_with(MockBookRepository::new()), request).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "NotAuthorized");
    }

    #[tokio::test]
    async fn test_add_book_requires_token() {
        let mut books = MockBookRepository::new();
        books.expect_save().never();

        let request = post_raw(None, r#"{"title":"X","isbn":"1"}"#);
        let (status, _, _) = fixtures::send(state_with(books), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_full_book() {
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_id()
            .returning(|id| Ok(fixtures::books().into_iter().find(|b| b.id == id)));
        books
            .expect_save()
            .withf(|draft| draft.id == Some(1))
            .returning(|draft| Ok(draft.into_book(1)));

        let request = Request::builder()
            .method("PUT")
            .uri("/books/book/1")
            .header(AUTHORIZATION, fixtures::bearer(&[Role::Data]))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(new_book_json()))
            .unwrap();

        let (status, _, body) = fixtures::send(state_with(books), request).await;

        assert_eq!(status, StatusCode::OK);
        let updated: Book = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.id, 1);
    }

    #[tokio::test]
    async fn test_patch_book_title() {
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_id()
            .returning(|id| Ok(fixtures::books().into_iter().find(|b| b.id == id)));
        books
            .expect_save()
            .returning(|draft| Ok(draft.into_book(2)));

        let request = Request::builder()
            .method("PATCH")
            .uri("/books/book/2")
            .header(AUTHORIZATION, fixtures::bearer(ADMIN))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"Digital Fortress"}"#))
            .unwrap();

        let (status, _, body) = fixtures::send(state_with(books), request).await;

        assert_eq!(status, StatusCode::OK);
        let updated: Book = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.title, "Digital Fortress");
        assert_eq!(updated.isbn, "9788489367012");
    }

    #[tokio::test]
    async fn test_delete_book_by_id() {
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_id()
            .returning(|_| Ok(fixtures::books().into_iter().next()));
        books
            .expect_delete_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(()));

        let request = Request::builder()
            .method("DELETE")
            .uri("/books/book/1")
            .header(AUTHORIZATION, fixtures::bearer(ADMIN))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .unwrap();

        let (status, _, body) = fixtures::send(state_with(books), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }
}
