use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub const TABLE_NAME: &str = "rating";

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rating {
    pub id: Thing,
    pub project: Thing,
    pub score: f64,
    pub review: Option<String>,
    pub categories: Option<RatingCategories>,
    pub suggestion: Option<String>,
    pub job_title: String,
    pub freelancer_id: Option<String>,
    pub freelancer_name: Option<String>,
    pub client_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    pub fn project_key(&self) -> String {
        self.project.id.to_raw()
    }
}

/// Sub-scores from the six question feedback form, in form order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingCategories {
    pub deliverables: u8,
    pub communication: u8,
    pub timeliness: u8,
    pub professionalism: u8,
    pub match_quality: u8,
    pub would_hire_again: u8,
}

impl RatingCategories {
    pub fn from_vector(values: [u8; 6]) -> Self {
        let [deliverables, communication, timeliness, professionalism, match_quality, would_hire_again] =
            values;
        Self {
            deliverables,
            communication,
            timeliness,
            professionalism,
            match_quality,
            would_hire_again,
        }
    }

    /// Mean of the six answers rounded to one decimal.
    pub fn score(&self) -> f64 {
        let sum: u32 = [
            self.deliverables,
            self.communication,
            self.timeliness,
            self.professionalism,
            self.match_quality,
            self.would_hire_again,
        ]
        .iter()
        .map(|v| *v as u32)
        .sum();
        (sum as f64 / 6.0 * 10.0).round() / 10.0
    }
}

#[derive(Debug, Serialize)]
pub struct RatingCreate {
    pub project: Thing,
    pub score: f64,
    pub review: Option<String>,
    pub categories: Option<RatingCategories>,
    pub suggestion: Option<String>,
    pub job_title: String,
    pub freelancer_id: Option<String>,
    pub freelancer_name: Option<String>,
    pub client_email: String,
}
