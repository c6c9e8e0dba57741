use crate::database::repositories::{project_repo::ProjectRepository, rating_repo::RatingRepository};
use crate::middleware::{ctx::Ctx, mw_ctx::CtxState};
use crate::services::project_service::ProjectService;

pub mod admin;
pub mod freelancer;
pub mod jobs;
pub mod projects;
pub mod umkm;

pub(crate) fn project_service<'a>(
    state: &'a CtxState,
    ctx: &'a Ctx,
) -> ProjectService<'a, ProjectRepository, RatingRepository> {
    ProjectService::new(
        ctx,
        &state.db.projects,
        &state.db.ratings,
        state.transition_policy,
        state.upload_max_size_mb,
    )
}
