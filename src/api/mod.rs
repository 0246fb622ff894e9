//! API handlers for the bookstore REST endpoints

pub mod auth;
pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;
pub mod sections;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    models::user::{Role, UserClaims},
    AppState,
};

/// Roles allowed to change the catalog (books, authors, sections)
pub const CATALOG_WRITERS: &[Role] = &[Role::Admin, Role::Data];

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Authenticated user holding one of [`CATALOG_WRITERS`].
///
/// Rejects before the request body is read.
pub struct CatalogWriter(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for CatalogWriter {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(claims) = AuthenticatedUser::from_request_parts(parts, state).await?;
        claims.require_any_role(CATALOG_WRITERS)?;
        Ok(CatalogWriter(claims))
    }
}

/// JSON request body whose rejections render as an `ErrorResponse`
pub type JsonBody<T> = WithRejection<Json<T>, AppError>;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let prefix = state.config.server.route_prefix();

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Books
        .route("/books/books", get(books::list_all_books))
        .route("/books/book", post(books::add_new_book))
        .route(
            "/books/book/:id",
            get(books::get_book_by_id)
                .put(books::update_full_book)
                .patch(books::update_book)
                .delete(books::delete_book_by_id),
        )
        // Authors
        .route("/authors/authors", get(authors::list_all_authors))
        .route("/authors/author", post(authors::add_new_author))
        .route(
            "/authors/author/:id",
            get(authors::get_author_by_id).delete(authors::delete_author_by_id),
        )
        // Sections
        .route("/sections/sections", get(sections::list_all_sections))
        .route("/sections/section", post(sections::add_new_section))
        .route(
            "/sections/section/:id",
            get(sections::get_section_by_id).delete(sections::delete_section_by_id),
        )
        .with_state(state);

    let api = match prefix {
        Some(prefix) => Router::new().nest(&prefix, api),
        None => api,
    };

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
