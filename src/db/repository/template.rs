//! Session template repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::TemplateId;
use crate::db::models::{SessionTemplate, WeightEntry};

/// Repository trait for reusable session templates.
///
/// Templates are global (not scoped to a session) and store a full
/// hour range plus weight distribution for later reuse.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// List all templates ordered by name.
    async fn list_templates(&self) -> RepositoryResult<Vec<SessionTemplate>>;

    /// Retrieve a template by ID.
    ///
    /// # Returns
    /// * `Ok(SessionTemplate)` - The template
    /// * `Err(RepositoryError::NotFound)` - If the template doesn't exist
    async fn get_template(&self, template_id: TemplateId) -> RepositoryResult<SessionTemplate>;

    /// Look up a template by exact name.
    async fn find_template_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<SessionTemplate>>;

    /// Store a new template.
    async fn create_template(
        &self,
        name: &str,
        start_hour: i32,
        end_hour: i32,
        weights: &[WeightEntry],
    ) -> RepositoryResult<SessionTemplate>;

    /// Delete a template.
    ///
    /// Sessions a template was applied to keep their copied hours and
    /// weights; deletion only removes the template itself.
    async fn delete_template(&self, template_id: TemplateId) -> RepositoryResult<()>;
}
