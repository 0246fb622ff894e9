//! Section model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Shelf section a book belongs to (Fiction, Travel, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Section {
    pub id: i64,
    pub name: String,
}

/// Create section request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSection {
    #[validate(length(min = 1, max = 255, message = "Section name must not be empty"))]
    pub name: String,
}
