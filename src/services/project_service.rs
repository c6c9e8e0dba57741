use std::collections::HashMap;
use std::future::Future;

use serde::Deserialize;
use tracing::{error, info, warn};
use validator::Validate;

use crate::config::upload_limit_bytes;
use crate::entities::project::{
    project_entity::{
        Assignee, AssigneeKind, ProgressPatch, Project, ProjectCreate, ProjectDetailsPatch,
        ProjectFilter, SubmissionCreate, TABLE_NAME,
    },
    project_status::{ProjectStatus, TransitionPolicy},
    rating_entity::{Rating, RatingCategories, RatingCreate},
};
use crate::interfaces::repositories::{
    project_ifce::ProjectRepositoryInterface, rating_ifce::RatingRepositoryInterface,
};
use crate::middleware::{
    ctx::Ctx,
    error::{AppError, AppResult, CtxError, CtxResult},
    utils::{
        db_utils::{with_not_found_err, Pagination},
        string_utils::{get_str_id_thing, LEN_OR_NONE},
    },
};
use crate::models::view::{
    project::{
        AdminProjectView, ClientProjectView, FreelancerProjectView, JobView, ProjectStatsView,
    },
    rating::RatingView,
};
use crate::utils::file::convert::{
    decode_data_uri, normalize_upload, sanitize_filename, DecodedFile,
};
use crate::utils::format_utils::parse_date;
use crate::utils::validate_utils::{
    deserialize_skills, deserialize_skills_opt, trim_string, validate_budget_order,
    validate_feedback_scores, validate_iso_date,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_skills")]
    pub skills: Vec<String>,
    pub requirements: Option<String>,
    #[serde(alias = "budget_from")]
    pub budget_from: Option<u64>,
    #[serde(alias = "budget_to")]
    pub budget_to: Option<u64>,
    #[serde(alias = "deadlineDate", alias = "dueDate", alias = "due_date")]
    #[validate(custom(function = "validate_iso_date"))]
    pub deadline: Option<String>,
    #[serde(alias = "duration_days")]
    pub duration_days: Option<u32>,
    #[serde(alias = "client_email", alias = "umkmEmail")]
    #[validate(email(message = "Client email is invalid"))]
    pub client_email: String,
    #[serde(alias = "client_name")]
    pub client_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdateInput {
    #[validate(length(min = 1, max = 200, message = "Title can not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_skills_opt")]
    pub skills: Option<Vec<String>>,
    pub requirements: Option<String>,
    #[serde(alias = "budget_from")]
    pub budget_from: Option<u64>,
    #[serde(alias = "budget_to")]
    pub budget_to: Option<u64>,
    #[serde(alias = "deadlineDate", alias = "dueDate", alias = "due_date")]
    #[validate(custom(function = "validate_iso_date"))]
    pub deadline: Option<String>,
    #[serde(alias = "duration_days")]
    pub duration_days: Option<u32>,
    #[serde(alias = "client_name")]
    pub client_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInput {
    #[serde(alias = "freelancer_id", deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "freelancerId is required"))]
    pub freelancer_id: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_skills")]
    pub skills: Vec<String>,
    #[serde(alias = "match_score")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub match_score: Option<f64>,
    #[serde(default, alias = "is_group")]
    pub is_group: bool,
}

#[derive(Debug, Deserialize, Validate, Default)]
pub struct ProgressInput {
    pub status: Option<String>,
    #[validate(range(max = 100, message = "Progress must be 0-100"))]
    pub progress: Option<u8>,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInput {
    #[validate(url(message = "Link must be a valid url"))]
    pub link: Option<String>,
    pub file: Option<String>,
    #[serde(alias = "file_name")]
    pub file_name: Option<String>,
    pub note: Option<String>,
}

/// UMKM dashboard rating form.
#[derive(Debug, Deserialize, Validate)]
pub struct RateInput {
    #[serde(alias = "score")]
    #[validate(range(min = 1, max = 5, message = "Rating must be 1-5"))]
    pub rating: u8,
    pub review: Option<String>,
}

/// Hiring portal feedback form with six answers.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackInput {
    #[validate(custom(function = "validate_feedback_scores"))]
    pub ratings: Vec<u8>,
    pub suggestion: Option<String>,
    #[serde(alias = "freelancer_id")]
    pub freelancer_id: Option<String>,
    #[serde(alias = "umkm_email")]
    pub umkm_email: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    pub email: Option<String>,
    pub client_email: Option<String>,
    #[serde(alias = "freelancer_id")]
    pub freelancer_id: Option<String>,
    pub status: Option<String>,
    pub start: Option<u32>,
    pub count: Option<u16>,
}

impl ProjectListQuery {
    fn pagination(&self) -> Pagination {
        Pagination::new(self.start, self.count)
    }
}

/// Attempts per guarded write when the store reports a transaction conflict.
const WRITE_CONFLICT_ATTEMPTS: u8 = 3;

/// Which conditional write matched nothing, used to explain the failure.
#[derive(Debug, Clone, Copy)]
enum Guarded {
    Assign,
    Status(ProjectStatus),
    Progress,
    Rate,
}

pub struct ProjectService<'a, P, R>
where
    P: ProjectRepositoryInterface,
    R: RatingRepositoryInterface,
{
    ctx: &'a Ctx,
    projects: &'a P,
    ratings: &'a R,
    policy: TransitionPolicy,
    upload_max_bytes: usize,
}

impl<'a, P, R> ProjectService<'a, P, R>
where
    P: ProjectRepositoryInterface,
    R: RatingRepositoryInterface,
{
    pub fn new(
        ctx: &'a Ctx,
        projects: &'a P,
        ratings: &'a R,
        policy: TransitionPolicy,
        upload_max_size_mb: u64,
    ) -> Self {
        Self {
            ctx,
            projects,
            ratings,
            policy,
            upload_max_bytes: upload_limit_bytes(upload_max_size_mb),
        }
    }

    fn validation(&self, description: impl Into<String>) -> CtxError {
        self.ctx.to_ctx_error(AppError::Validation {
            description: description.into(),
        })
    }

    /// Checks the path key and returns it unchanged.
    fn project_key<'k>(&self, project_id: &'k str) -> CtxResult<&'k str> {
        get_str_id_thing(TABLE_NAME, project_id).map_err(CtxError::from(self.ctx))?;
        Ok(project_id)
    }

    async fn load(&self, project_id: &str) -> CtxResult<Project> {
        let key = self.project_key(project_id)?;
        let project = self
            .projects
            .get(key)
            .await
            .map_err(CtxError::from(self.ctx))?;
        with_not_found_err(project, self.ctx, project_id)
    }

    /// Runs a conditional write and retries store transaction conflicts. A conflict
    /// that outlasts the retries counts as a write that matched nothing.
    async fn guarded_write<T, F, Fut>(&self, project_id: &str, write: F) -> CtxResult<Option<T>>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = AppResult<Option<T>>>,
    {
        let mut attempt = 1;
        loop {
            match write().await {
                Err(AppError::WriteConflict { source }) => {
                    warn!(project_id, attempt, error = %source, "project write conflicted");
                    if attempt >= WRITE_CONFLICT_ATTEMPTS {
                        return Ok(None);
                    }
                    attempt += 1;
                }
                other => return other.map_err(CtxError::from(self.ctx)),
            }
        }
    }

    /// Re-reads a project after a conditional write matched nothing and names the reason.
    async fn guard_failure(&self, project_id: &str, guarded: Guarded) -> CtxError {
        let current = match self.projects.get(project_id).await {
            Ok(current) => current,
            Err(err) => return self.ctx.to_ctx_error(err),
        };
        let Some(project) = current else {
            return self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                ident: project_id.to_string(),
            });
        };

        let error = match guarded {
            Guarded::Assign if project.selected_freelancer.is_some() => AppError::AlreadyAssigned {
                ident: project_id.to_string(),
            },
            Guarded::Rate if project.rated_at.is_some() => AppError::AlreadyRated {
                ident: project_id.to_string(),
            },
            Guarded::Assign => self.invalid_transition(&project, ProjectStatus::Assigned),
            Guarded::Status(to) => self.invalid_transition(&project, to),
            Guarded::Progress => AppError::InvalidTransition {
                ident: project_id.to_string(),
                from: project.status.to_string(),
                to: "progress update".to_string(),
            },
            Guarded::Rate => AppError::InvalidTransition {
                ident: project_id.to_string(),
                from: project.status.to_string(),
                to: "Rated".to_string(),
            },
        };
        warn!(project_id, error = %error, "conditional project write rejected");
        self.ctx.to_ctx_error(error)
    }

    fn invalid_transition(&self, project: &Project, to: ProjectStatus) -> AppError {
        AppError::InvalidTransition {
            ident: project.key(),
            from: project.status.to_string(),
            to: to.to_string(),
        }
    }

    async fn ratings_by_project(&self, projects: &[Project]) -> CtxResult<HashMap<String, Rating>> {
        let keys = projects.iter().map(Project::key).collect::<Vec<String>>();
        let ratings = self
            .ratings
            .get_by_projects(keys)
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(ratings
            .into_iter()
            .map(|rating| (rating.project_key(), rating))
            .collect())
    }

    async fn rating_of(&self, project: &Project) -> CtxResult<Option<Rating>> {
        self.ratings
            .get_by_project(&project.key())
            .await
            .map_err(CtxError::from(self.ctx))
    }

    fn parse_status_filter(&self, status: Option<&str>) -> CtxResult<Option<ProjectStatus>> {
        match status.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(raw) => ProjectStatus::from_raw(raw)
                .map(Some)
                .ok_or_else(|| self.validation(format!("Unknown status '{raw}'"))),
        }
    }

    // jobs

    pub async fn create_job(&self, input: JobInput) -> CtxResult<JobView> {
        validate_budget_order(input.budget_from, input.budget_to)
            .map_err(|e| self.validation(e.to_string()))?;

        let deadline = input
            .deadline
            .as_deref()
            .and_then(parse_date)
            .map(|date| date.format("%Y-%m-%d").to_string());

        let project = self
            .projects
            .create(ProjectCreate {
                title: input.title,
                description: input.description,
                skills: input.skills,
                requirements: input.requirements.and_then(LEN_OR_NONE),
                budget_from: input.budget_from,
                budget_to: input.budget_to,
                deadline,
                duration_days: input.duration_days,
                client_email: input.client_email.trim().to_lowercase(),
                client_name: input.client_name.and_then(LEN_OR_NONE),
                status: ProjectStatus::Pending,
                progress: 0,
            })
            .await
            .map_err(CtxError::from(self.ctx))?;
        info!(project_id = %project.key(), "job created");
        Ok(JobView::from(&project))
    }

    pub async fn list_jobs(&self, query: ProjectListQuery) -> CtxResult<Vec<JobView>> {
        let status = self.parse_status_filter(query.status.as_deref())?;
        let projects = self
            .projects
            .list(ProjectFilter {
                client_email: query
                    .client_email
                    .clone()
                    .or(query.email.clone())
                    .and_then(LEN_OR_NONE)
                    .map(|e| e.to_lowercase()),
                freelancer_id: query.freelancer_id.clone().and_then(LEN_OR_NONE),
                status,
                unassigned_only: false,
                pagination: query.pagination(),
            })
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(projects.iter().map(JobView::from).collect())
    }

    pub async fn get_job(&self, project_id: &str) -> CtxResult<JobView> {
        let project = self.load(project_id).await?;
        Ok(JobView::from(&project))
    }

    pub async fn update_job(&self, project_id: &str, input: JobUpdateInput) -> CtxResult<JobView> {
        let current = self.load(project_id).await?;
        validate_budget_order(
            input.budget_from.or(current.budget_from),
            input.budget_to.or(current.budget_to),
        )
        .map_err(|e| self.validation(e.to_string()))?;

        let patch = ProjectDetailsPatch {
            title: input.title.map(|t| t.trim().to_string()),
            description: input.description,
            skills: input.skills,
            requirements: input.requirements,
            budget_from: input.budget_from,
            budget_to: input.budget_to,
            deadline: input
                .deadline
                .as_deref()
                .and_then(parse_date)
                .map(|date| date.format("%Y-%m-%d").to_string()),
            duration_days: input.duration_days,
            client_name: input.client_name,
        };
        let updated = self
            .projects
            .update_details(project_id, patch)
            .await
            .map_err(CtxError::from(self.ctx))?;
        let updated = with_not_found_err(updated, self.ctx, project_id)?;
        info!(project_id, "job details updated");
        Ok(JobView::from(&updated))
    }

    pub async fn delete_job(&self, project_id: &str) -> CtxResult<JobView> {
        let key = self.project_key(project_id)?;
        let deleted = self
            .projects
            .delete(key)
            .await
            .map_err(CtxError::from(self.ctx))?;
        let deleted = with_not_found_err(deleted, self.ctx, project_id)?;
        self.ratings
            .delete_by_project(key)
            .await
            .map_err(CtxError::from(self.ctx))?;
        info!(project_id, "job deleted");
        Ok(JobView::from(&deleted))
    }

    // lifecycle

    pub async fn accept(&self, project_id: &str, input: AcceptInput) -> CtxResult<Project> {
        let key = self.project_key(project_id)?;
        let assignee = Assignee {
            kind: if input.is_group {
                AssigneeKind::Group
            } else {
                AssigneeKind::Freelancer
            },
            id: input.freelancer_id,
            name: input.name,
            skills: input.skills,
            match_score: input.match_score,
        };
        let freelancer_id = assignee.id.clone();

        let projects = self.projects;
        let sources = self.policy.allowed_sources(ProjectStatus::Assigned);
        let assigned = self
            .guarded_write(key, move || projects.assign(key, assignee.clone(), sources.clone()))
            .await?;
        match assigned {
            Some(project) => {
                info!(project_id, freelancer_id = %freelancer_id, "project assigned");
                Ok(project)
            }
            None => Err(self.guard_failure(key, Guarded::Assign).await),
        }
    }

    pub async fn update_progress(
        &self,
        project_id: &str,
        input: ProgressInput,
    ) -> CtxResult<Project> {
        let key = self.project_key(project_id)?;
        let status = self.parse_status_filter(input.status.as_deref())?;

        let (allowed_from, guarded) = match status {
            Some(to) => (self.policy.allowed_sources(to), Guarded::Status(to)),
            None => (self.policy.progress_sources(), Guarded::Progress),
        };
        let patch = ProgressPatch {
            status,
            progress: input.progress,
        };

        let projects = self.projects;
        let updated = self
            .guarded_write(key, move || {
                projects.update_progress(key, patch.clone(), allowed_from.clone())
            })
            .await?;
        match updated {
            Some(project) => {
                info!(
                    project_id,
                    status = %project.status,
                    progress = project.progress,
                    "project progress updated"
                );
                Ok(project)
            }
            None => Err(self.guard_failure(key, guarded).await),
        }
    }

    pub async fn submit(&self, project_id: &str, input: SubmitInput) -> CtxResult<Project> {
        let key = self.project_key(project_id)?;

        let link = input.link.and_then(LEN_OR_NONE);
        let raw_file = input.file.and_then(LEN_OR_NONE);
        if link.is_none() && raw_file.is_none() {
            return Err(self.validation("A link or a file is required"));
        }

        let (file, file_name) = match raw_file {
            Some(raw) => {
                let file_name = input.file_name.as_deref().map(sanitize_filename);
                let (data_uri, size) = normalize_upload(&raw, file_name.as_deref())
                    .map_err(CtxError::from(self.ctx))?;
                if size > self.upload_max_bytes {
                    return Err(self.validation(format!(
                        "File is larger than {} bytes",
                        self.upload_max_bytes
                    )));
                }
                (Some(data_uri), file_name)
            }
            None => (None, None),
        };

        let submission = SubmissionCreate {
            link,
            file,
            file_name,
            note: input.note.and_then(LEN_OR_NONE),
        };
        let projects = self.projects;
        let sources = self.policy.allowed_sources(ProjectStatus::Completed);
        let submitted = self
            .guarded_write(key, move || {
                projects.submit(key, submission.clone(), sources.clone())
            })
            .await?;
        match submitted {
            Some(project) => {
                info!(project_id, "project submitted");
                Ok(project)
            }
            None => Err(self.guard_failure(key, Guarded::Status(ProjectStatus::Completed)).await),
        }
    }

    /// Decoded submission file and the name to offer it under.
    pub async fn get_submission_file(&self, project_id: &str) -> CtxResult<(DecodedFile, String)> {
        let project = self.load(project_id).await?;
        let not_found = || {
            self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                ident: format!("{project_id}/file"),
            })
        };
        let submission = project.submission.ok_or_else(not_found)?;
        let raw = submission.file.ok_or_else(not_found)?;
        let decoded = decode_data_uri(&raw).map_err(CtxError::from(self.ctx))?;
        let file_name = sanitize_filename(submission.file_name.as_deref().unwrap_or_default());
        Ok((decoded, file_name))
    }

    pub async fn cancel(&self, project_id: &str) -> CtxResult<Project> {
        let key = self.project_key(project_id)?;
        let to = ProjectStatus::Canceled;
        let patch = ProgressPatch {
            status: Some(to),
            progress: None,
        };
        let projects = self.projects;
        let canceled = self
            .guarded_write(key, move || {
                projects.update_progress(
                    key,
                    patch.clone(),
                    Some(vec![ProjectStatus::Pending, ProjectStatus::Assigned]),
                )
            })
            .await?;
        match canceled {
            Some(project) => {
                info!(project_id, "project canceled");
                Ok(project)
            }
            None => Err(self.guard_failure(key, Guarded::Status(to)).await),
        }
    }

    // ratings

    pub async fn rate(&self, project_id: &str, input: RateInput) -> CtxResult<RatingView> {
        self.record_rating(
            project_id,
            input.rating as f64,
            input.review.and_then(LEN_OR_NONE),
            None,
            None,
            None,
        )
        .await
    }

    pub async fn feedback(&self, project_id: &str, input: FeedbackInput) -> CtxResult<RatingView> {
        if let Some(umkm_email) = input.umkm_email.and_then(LEN_OR_NONE) {
            let project = self.load(project_id).await?;
            if !umkm_email.eq_ignore_ascii_case(&project.client_email) {
                return Err(self.validation("umkmEmail does not match the project owner"));
            }
        }
        let values: [u8; 6] = input
            .ratings
            .as_slice()
            .try_into()
            .map_err(|_| self.validation("Expected 6 answers"))?;
        let categories = RatingCategories::from_vector(values);
        self.record_rating(
            project_id,
            categories.score(),
            None,
            Some(categories),
            input.suggestion.and_then(LEN_OR_NONE),
            input.freelancer_id.and_then(LEN_OR_NONE),
        )
        .await
    }

    /// Claims the project summary first, then writes the rating record.
    /// A failed record write releases the claim again.
    async fn record_rating(
        &self,
        project_id: &str,
        score: f64,
        review: Option<String>,
        categories: Option<RatingCategories>,
        suggestion: Option<String>,
        freelancer_id: Option<String>,
    ) -> CtxResult<RatingView> {
        let key = self.project_key(project_id)?;
        let projects = self.projects;
        let sources = self.policy.rating_sources();
        let claim_review = review.clone();
        let claimed = self
            .guarded_write(key, move || {
                projects.set_rating_summary(key, score, claim_review.clone(), sources.clone())
            })
            .await?;
        let Some(project) = claimed else {
            return Err(self.guard_failure(key, Guarded::Rate).await);
        };

        let created = self
            .ratings
            .create(RatingCreate {
                project: project.id.clone(),
                score,
                review,
                categories,
                suggestion,
                job_title: project.title.clone(),
                freelancer_id: project.freelancer_id.clone().or(freelancer_id),
                freelancer_name: project.selected_freelancer.as_ref().map(|f| f.name.clone()),
                client_email: project.client_email.clone(),
            })
            .await;

        match created {
            Ok(rating) => {
                info!(project_id, score, "project rated");
                Ok(RatingView::from(&rating))
            }
            Err(err) => {
                error!(project_id, error = ?err, "rating record failed, releasing summary");
                if let Err(rollback) = self.projects.clear_rating_summary(key).await {
                    error!(project_id, error = ?rollback, "rating summary rollback failed");
                }
                Err(self.ctx.to_ctx_error(err))
            }
        }
    }

    // views

    pub async fn client_projects(
        &self,
        query: ProjectListQuery,
    ) -> CtxResult<Vec<ClientProjectView>> {
        let email = query
            .email
            .clone()
            .or(query.client_email.clone())
            .and_then(LEN_OR_NONE)
            .ok_or_else(|| self.validation("email is required"))?;
        let status = self.parse_status_filter(query.status.as_deref())?;
        let projects = self
            .projects
            .list(ProjectFilter {
                client_email: Some(email.to_lowercase()),
                status,
                pagination: query.pagination(),
                ..Default::default()
            })
            .await
            .map_err(CtxError::from(self.ctx))?;
        let ratings = self.ratings_by_project(&projects).await?;
        Ok(projects
            .iter()
            .map(|p| ClientProjectView::build(p, ratings.get(&p.key())))
            .collect())
    }

    pub async fn client_project(&self, project_id: &str) -> CtxResult<ClientProjectView> {
        let project = self.load(project_id).await?;
        let rating = self.rating_of(&project).await?;
        Ok(ClientProjectView::build(&project, rating.as_ref()))
    }

    pub async fn freelancer_projects(
        &self,
        query: ProjectListQuery,
    ) -> CtxResult<Vec<FreelancerProjectView>> {
        let freelancer_id = query
            .freelancer_id
            .clone()
            .and_then(LEN_OR_NONE)
            .ok_or_else(|| self.validation("freelancerId is required"))?;
        let status = self.parse_status_filter(query.status.as_deref())?;
        let projects = self
            .projects
            .list(ProjectFilter {
                freelancer_id: Some(freelancer_id.clone()),
                status,
                pagination: query.pagination(),
                ..Default::default()
            })
            .await
            .map_err(CtxError::from(self.ctx))?;
        let ratings = self.ratings_by_project(&projects).await?;
        Ok(projects
            .iter()
            .map(|p| {
                FreelancerProjectView::build(p, ratings.get(&p.key()), Some(freelancer_id.as_str()))
            })
            .collect())
    }

    pub async fn available_projects(
        &self,
        query: ProjectListQuery,
    ) -> CtxResult<Vec<FreelancerProjectView>> {
        let projects = self
            .projects
            .list(ProjectFilter {
                status: Some(ProjectStatus::Pending),
                unassigned_only: true,
                pagination: query.pagination(),
                ..Default::default()
            })
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(projects
            .iter()
            .map(|p| FreelancerProjectView::build(p, None, None))
            .collect())
    }

    pub async fn freelancer_project(
        &self,
        project_id: &str,
        freelancer_id: Option<&str>,
    ) -> CtxResult<FreelancerProjectView> {
        let project = self.load(project_id).await?;
        let rating = self.rating_of(&project).await?;
        Ok(FreelancerProjectView::build(&project, rating.as_ref(), freelancer_id))
    }

    pub async fn admin_projects(
        &self,
        query: ProjectListQuery,
    ) -> CtxResult<Vec<AdminProjectView>> {
        let status = self.parse_status_filter(query.status.as_deref())?;
        let projects = self
            .projects
            .list(ProjectFilter {
                status,
                pagination: query.pagination(),
                ..Default::default()
            })
            .await
            .map_err(CtxError::from(self.ctx))?;
        let ratings = self.ratings_by_project(&projects).await?;
        Ok(projects
            .iter()
            .map(|p| AdminProjectView::build(p, ratings.get(&p.key())))
            .collect())
    }

    pub async fn admin_project(&self, project_id: &str) -> CtxResult<AdminProjectView> {
        let project = self.load(project_id).await?;
        let rating = self.rating_of(&project).await?;
        Ok(AdminProjectView::build(&project, rating.as_ref()))
    }

    pub async fn admin_stats(&self) -> CtxResult<ProjectStatsView> {
        let counts = self
            .projects
            .count_by_status()
            .await
            .map_err(CtxError::from(self.ctx))?;
        let average = self
            .ratings
            .average_score()
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(ProjectStatsView::build(&counts, average))
    }

    pub async fn admin_ratings(&self, query: ProjectListQuery) -> CtxResult<Vec<RatingView>> {
        let pagination = query.pagination();
        let ratings = self
            .ratings
            .list(pagination.start, pagination.count)
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(ratings.iter().map(RatingView::from).collect())
    }
}
