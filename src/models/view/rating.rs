use serde::{Deserialize, Serialize};

use crate::entities::project::rating_entity::{Rating, RatingCategories};
use crate::utils::format_utils::format_datetime_label;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RatingCategoriesView {
    pub deliverables: u8,
    pub communication: u8,
    pub timeliness: u8,
    pub professionalism: u8,
    pub match_quality: u8,
    pub would_hire_again: u8,
}

impl From<&RatingCategories> for RatingCategoriesView {
    fn from(value: &RatingCategories) -> Self {
        Self {
            deliverables: value.deliverables,
            communication: value.communication,
            timeliness: value.timeliness,
            professionalism: value.professionalism,
            match_quality: value.match_quality,
            would_hire_again: value.would_hire_again,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    pub project_id: String,
    pub score: f64,
    pub review: Option<String>,
    pub suggestion: Option<String>,
    pub categories: Option<RatingCategoriesView>,
    pub job_title: String,
    pub freelancer_id: Option<String>,
    pub freelancer_name: Option<String>,
    pub client_email: String,
    pub rated_at: String,
}

impl From<&Rating> for RatingView {
    fn from(value: &Rating) -> Self {
        Self {
            project_id: value.project_key(),
            score: value.score,
            review: value.review.clone(),
            suggestion: value.suggestion.clone(),
            categories: value.categories.as_ref().map(RatingCategoriesView::from),
            job_title: value.job_title.clone(),
            freelancer_id: value.freelancer_id.clone(),
            freelancer_name: value.freelancer_name.clone(),
            client_email: value.client_email.clone(),
            rated_at: format_datetime_label(Some(&value.created_at)),
        }
    }
}
