use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::project_status::ProjectStatus;
use crate::middleware::utils::db_utils::Pagination;

pub const TABLE_NAME: &str = "project";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: Thing,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub requirements: Option<String>,
    pub budget_from: Option<u64>,
    pub budget_to: Option<u64>,
    pub deadline: Option<String>,
    pub duration_days: Option<u32>,
    pub client_email: String,
    pub client_name: Option<String>,
    pub selected_freelancer: Option<Assignee>,
    pub freelancer_id: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub progress: u8,
    pub submission: Option<Submission>,
    pub rating: Option<f64>,
    pub review: Option<String>,
    pub rated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Record key without the table prefix, as used in URLs.
    pub fn key(&self) -> String {
        self.id.id.to_raw()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AssigneeKind {
    #[default]
    Freelancer,
    Group,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(default)]
    pub kind: AssigneeKind,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub match_score: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    pub link: Option<String>,
    pub file: Option<String>,
    pub file_name: Option<String>,
    pub note: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProjectCreate {
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub requirements: Option<String>,
    pub budget_from: Option<u64>,
    pub budget_to: Option<u64>,
    pub deadline: Option<String>,
    pub duration_days: Option<u32>,
    pub client_email: String,
    pub client_name: Option<String>,
    pub status: ProjectStatus,
    pub progress: u8,
}

/// Descriptive fields a client may edit after posting. Absent fields are left untouched.
#[derive(Debug, Serialize, Default)]
pub struct ProjectDetailsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_to: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ProgressPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct SubmissionCreate {
    pub link: Option<String>,
    pub file: Option<String>,
    pub file_name: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Default)]
pub struct ProjectFilter {
    pub client_email: Option<String>,
    pub freelancer_id: Option<String>,
    pub status: Option<ProjectStatus>,
    pub unassigned_only: bool,
    pub pagination: Pagination,
}
