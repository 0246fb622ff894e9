//! Section endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::AppResult,
    models::section::{CreateSection, Section},
};

use super::{AuthenticatedUser, CatalogWriter, JsonBody};

/// List all sections
#[utoipa::path(
    get,
    path = "/sections/sections",
    tag = "sections",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All sections", body = Vec<Section>)
    )
)]
pub async fn list_all_sections(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Section>>> {
    let sections = state.services.sections.find_all().await?;
    Ok(Json(sections))
}

/// Get section by ID
#[utoipa::path(
    get,
    path = "/sections/section/{id}",
    tag = "sections",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section details", body = Section),
        (status = 404, description = "Section not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_section_by_id(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Section>> {
    let section = state.services.sections.find_section_by_id(id).await?;
    Ok(Json(section))
}

/// Create a section
#[utoipa::path(
    post,
    path = "/sections/section",
    tag = "sections",
    security(("bearer_auth" = [])),
    request_body = CreateSection,
    responses(
        (status = 201, description = "Section created", body = Section)
    )
)]
pub async fn add_new_section(
    State(state): State<crate::AppState>,
    CatalogWriter(_writer): CatalogWriter,
    WithRejection(Json(data), _): JsonBody<CreateSection>,
) -> AppResult<(StatusCode, Json<Section>)> {
    let section = state.services.sections.save(&data).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// Delete an empty section
#[utoipa::path(
    delete,
    path = "/sections/section/{id}",
    tag = "sections",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section deleted"),
        (status = 404, description = "Section not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Books are still shelved in the section", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_section_by_id(
    State(state): State<crate::AppState>,
    CatalogWriter(_writer): CatalogWriter,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.sections.delete(id).await?;
    Ok(StatusCode::OK)
}
