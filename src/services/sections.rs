//! Section service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::section::{CreateSection, Section},
    repository::SectionRepository,
};

#[derive(Clone)]
pub struct SectionService {
    sections: Arc<dyn SectionRepository>,
}

impl SectionService {
    pub fn new(sections: Arc<dyn SectionRepository>) -> Self {
        Self { sections }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Section>> {
        self.sections.find_all().await
    }

    /// Resolve a section id, failing with NotFound when it does not exist
    pub async fn find_section_by_id(&self, id: i64) -> AppResult<Section> {
        self.sections
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Section {} not found", id)))
    }

    pub async fn save(&self, data: &CreateSection) -> AppResult<Section> {
        data.validate()?;
        let section = self.sections.create(data).await?;
        tracing::info!("Created section id={} name={}", section.id, section.name);
        Ok(section)
    }

    /// Delete a section; refused while books are still shelved in it
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.find_section_by_id(id).await?;

        let books = self.sections.count_books(id).await?;
        if books > 0 {
            return Err(AppError::BusinessRule(format!(
                "Section {} still holds {} book(s)",
                id, books
            )));
        }

        self.sections.delete_by_id(id).await?;
        tracing::info!("Deleted section id={}", id);
        Ok(())
    }
}
