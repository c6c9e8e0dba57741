use async_trait::async_trait;

use crate::entities::project::project_entity::{
    Assignee, ProgressPatch, Project, ProjectCreate, ProjectDetailsPatch, ProjectFilter,
    SubmissionCreate,
};
use crate::entities::project::project_status::ProjectStatus;
use crate::middleware::error::AppResult;

/// Conditional writes return `None` when no document matched the id and guards,
/// the caller decides whether that means missing or conflicting.
#[async_trait]
pub trait ProjectRepositoryInterface {
    async fn create(&self, data: ProjectCreate) -> AppResult<Project>;
    async fn get(&self, project_id: &str) -> AppResult<Option<Project>>;
    async fn list(&self, filter: ProjectFilter) -> AppResult<Vec<Project>>;
    async fn count_by_status(&self) -> AppResult<Vec<(ProjectStatus, u64)>>;
    async fn update_details(
        &self,
        project_id: &str,
        patch: ProjectDetailsPatch,
    ) -> AppResult<Option<Project>>;
    async fn delete(&self, project_id: &str) -> AppResult<Option<Project>>;
    async fn assign(
        &self,
        project_id: &str,
        assignee: Assignee,
        allowed_from: Option<Vec<ProjectStatus>>,
    ) -> AppResult<Option<Project>>;
    async fn update_progress(
        &self,
        project_id: &str,
        patch: ProgressPatch,
        allowed_from: Option<Vec<ProjectStatus>>,
    ) -> AppResult<Option<Project>>;
    async fn submit(
        &self,
        project_id: &str,
        submission: SubmissionCreate,
        allowed_from: Option<Vec<ProjectStatus>>,
    ) -> AppResult<Option<Project>>;
    async fn set_rating_summary(
        &self,
        project_id: &str,
        score: f64,
        review: Option<String>,
        allowed_from: Option<Vec<ProjectStatus>>,
    ) -> AppResult<Option<Project>>;
    async fn clear_rating_summary(&self, project_id: &str) -> AppResult<()>;
}
