use serde::{Deserialize, Serialize};

use crate::entities::project::{
    project_entity::{Assignee, AssigneeKind, Project, Submission},
    project_status::{ProjectStatus, ViewerRole},
    rating_entity::Rating,
};
use crate::models::view::rating::RatingView;
use crate::utils::format_utils::{
    format_budget_range, format_date_label, format_datetime_label, format_duration_days,
    NOT_AVAILABLE, NO_DEADLINE,
};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeView {
    pub id: String,
    pub name: String,
    pub skills: Vec<String>,
    pub match_score: Option<f64>,
    pub is_group: bool,
}

impl From<&Assignee> for AssigneeView {
    fn from(value: &Assignee) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            skills: value.skills.clone(),
            match_score: value.match_score,
            is_group: value.kind == AssigneeKind::Group,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub link: Option<String>,
    pub file_name: Option<String>,
    pub has_file: bool,
    pub file_url: Option<String>,
    pub note: Option<String>,
    pub submitted_at: String,
}

impl SubmissionView {
    fn build(project_key: &str, submission: &Submission) -> Self {
        let has_file = submission.file.is_some();
        Self {
            link: submission.link.clone(),
            file_name: submission.file_name.clone(),
            has_file,
            file_url: has_file.then(|| format!("/api/projects/{project_key}/file")),
            note: submission.note.clone(),
            submitted_at: format_datetime_label(Some(&submission.submitted_at)),
        }
    }
}

/// Dashboard view for the UMKM that posted the project.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClientProjectView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub budget: String,
    pub deadline: String,
    pub duration: String,
    pub status: String,
    pub progress: u8,
    pub freelancer: Option<AssigneeView>,
    pub submission: Option<SubmissionView>,
    pub rating: Option<RatingView>,
}

impl ClientProjectView {
    pub fn build(project: &Project, rating: Option<&Rating>) -> Self {
        let key = project.key();
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            skills: project.skills.clone(),
            budget: format_budget_range(project.budget_from, project.budget_to),
            deadline: format_date_label(project.deadline.as_deref(), NO_DEADLINE),
            duration: format_duration_days(project.duration_days),
            status: project.status.label_for(ViewerRole::Client).to_string(),
            progress: project.progress,
            freelancer: project.selected_freelancer.as_ref().map(AssigneeView::from),
            submission: project
                .submission
                .as_ref()
                .map(|s| SubmissionView::build(&key, s)),
            rating: rating.map(RatingView::from),
            id: key,
        }
    }
}

/// What a freelancer sees on their board or when browsing open work.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerProjectView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub requirements: Option<String>,
    pub client_email: String,
    pub client_name: String,
    pub budget: String,
    pub deadline: String,
    pub duration: String,
    pub status: String,
    pub progress: u8,
    pub is_assigned_to_me: bool,
    pub submission: Option<SubmissionView>,
    pub rating: Option<RatingView>,
}

impl FreelancerProjectView {
    pub fn build(project: &Project, rating: Option<&Rating>, viewer_id: Option<&str>) -> Self {
        let key = project.key();
        let is_assigned_to_me = match (viewer_id, project.freelancer_id.as_deref()) {
            (Some(viewer), Some(assigned)) => viewer == assigned,
            _ => false,
        };
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            skills: project.skills.clone(),
            requirements: project.requirements.clone(),
            client_email: project.client_email.clone(),
            client_name: project
                .client_name
                .clone()
                .unwrap_or_else(|| project.client_email.clone()),
            budget: format_budget_range(project.budget_from, project.budget_to),
            deadline: format_date_label(project.deadline.as_deref(), NO_DEADLINE),
            duration: format_duration_days(project.duration_days),
            status: project.status.label_for(ViewerRole::Freelancer).to_string(),
            progress: project.progress,
            is_assigned_to_me,
            submission: project
                .submission
                .as_ref()
                .map(|s| SubmissionView::build(&key, s)),
            rating: rating.map(RatingView::from),
            id: key,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdminProjectView {
    pub id: String,
    pub title: String,
    pub client_email: String,
    pub client_name: Option<String>,
    pub freelancer_id: Option<String>,
    pub freelancer: Option<AssigneeView>,
    pub budget: String,
    pub deadline: String,
    pub status: ProjectStatus,
    pub status_label: String,
    pub progress: u8,
    pub submitted_at: String,
    pub has_rating: bool,
    pub rating: Option<RatingView>,
    pub created_at: String,
    pub updated_at: String,
}

impl AdminProjectView {
    pub fn build(project: &Project, rating: Option<&Rating>) -> Self {
        Self {
            id: project.key(),
            title: project.title.clone(),
            client_email: project.client_email.clone(),
            client_name: project.client_name.clone(),
            freelancer_id: project.freelancer_id.clone(),
            freelancer: project.selected_freelancer.as_ref().map(AssigneeView::from),
            budget: format_budget_range(project.budget_from, project.budget_to),
            deadline: format_date_label(project.deadline.as_deref(), NOT_AVAILABLE),
            status: project.status,
            status_label: project.status.label_for(ViewerRole::Admin).to_string(),
            progress: project.progress,
            submitted_at: format_datetime_label(
                project.submission.as_ref().map(|s| &s.submitted_at),
            ),
            has_rating: rating.is_some() || project.rated_at.is_some(),
            rating: rating.map(RatingView::from),
            created_at: format_datetime_label(Some(&project.created_at)),
            updated_at: format_datetime_label(Some(&project.updated_at)),
        }
    }
}

/// Raw job record for the hiring portal. Fields keep their stored values.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub id: String,
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
    pub freelancer_id: Option<String>,
    pub status: ProjectStatus,
    pub progress: u8,
    pub rating: Option<f64>,
    pub review: Option<String>,
}

impl From<&Project> for JobView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.key(),
            title: project.title.clone(),
            description: project.description.clone(),
            skills: project.skills.clone(),
            requirements: project.requirements.clone(),
            budget_from: project.budget_from,
            budget_to: project.budget_to,
            deadline: project.deadline.clone(),
            duration_days: project.duration_days,
            client_email: project.client_email.clone(),
            client_name: project.client_name.clone(),
            freelancer_id: project.freelancer_id.clone(),
            status: project.status,
            progress: project.progress,
            rating: project.rating,
            review: project.review.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatsView {
    pub total: u64,
    pub pending: u64,
    pub assigned: u64,
    pub completed: u64,
    pub canceled: u64,
    pub average_rating: Option<f64>,
}

impl ProjectStatsView {
    pub fn build(counts: &[(ProjectStatus, u64)], average_rating: Option<f64>) -> Self {
        let count_of = |status: ProjectStatus| {
            counts
                .iter()
                .find(|(s, _)| *s == status)
                .map(|(_, c)| *c)
                .unwrap_or(0)
        };
        Self {
            total: counts.iter().map(|(_, c)| c).sum(),
            pending: count_of(ProjectStatus::Pending),
            assigned: count_of(ProjectStatus::Assigned),
            completed: count_of(ProjectStatus::Completed),
            canceled: count_of(ProjectStatus::Canceled),
            average_rating,
        }
    }
}
