//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, health, sections};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        version = "0.1.0",
        description = "Bookstore catalog REST API: books, authors and sections"
    ),
    paths(
        health::health_check,
        auth::login,
        auth::me,
        books::list_all_books,
        books::get_book_by_id,
        books::add_new_book,
        books::update_full_book,
        books::update_book,
        books::delete_book_by_id,
        authors::list_all_authors,
        authors::get_author_by_id,
        authors::add_new_author,
        authors::delete_author_by_id,
        sections::list_all_sections,
        sections::get_section_by_id,
        sections::add_new_section,
        sections::delete_section_by_id,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::Wrote,
            crate::models::book::SaveBook,
            crate::models::book::PatchBook,
            crate::models::book::SectionRef,
            crate::models::book::AuthorRef,
            crate::models::book::WroteRef,
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::section::Section,
            crate::models::section::CreateSection,
            crate::models::user::Role,
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::UserInfo,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Authors"),
        (name = "sections", description = "Shelf sections")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the secured paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
