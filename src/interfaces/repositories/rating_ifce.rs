use async_trait::async_trait;

use crate::entities::project::rating_entity::{Rating, RatingCreate};
use crate::middleware::error::AppResult;

#[async_trait]
pub trait RatingRepositoryInterface {
    async fn create(&self, data: RatingCreate) -> AppResult<Rating>;
    async fn get_by_project(&self, project_id: &str) -> AppResult<Option<Rating>>;
    async fn get_by_projects(&self, project_ids: Vec<String>) -> AppResult<Vec<Rating>>;
    async fn list(&self, start: u32, count: u16) -> AppResult<Vec<Rating>>;
    async fn average_score(&self) -> AppResult<Option<f64>>;
    async fn delete_by_project(&self, project_id: &str) -> AppResult<()>;
}
