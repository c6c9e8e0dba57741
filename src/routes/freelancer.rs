use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::middleware::{ctx::Ctx, error::CtxResult, mw_ctx::CtxState};
use crate::models::{view::project::FreelancerProjectView, web::ApiResponse};
use crate::routes::project_service;
use crate::services::project_service::ProjectListQuery;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/freelancer/projects", get(get_projects))
        .route("/api/freelancer/projects/available", get(get_available_projects))
        .route("/api/freelancer/projects/:project_id", get(get_project))
}

async fn get_projects(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Query(query): Query<ProjectListQuery>,
) -> CtxResult<Json<ApiResponse<Vec<FreelancerProjectView>>>> {
    let projects = project_service(&state, &ctx)
        .freelancer_projects(query)
        .await?;
    Ok(Json(ApiResponse::data(projects)))
}

async fn get_available_projects(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Query(query): Query<ProjectListQuery>,
) -> CtxResult<Json<ApiResponse<Vec<FreelancerProjectView>>>> {
    let projects = project_service(&state, &ctx)
        .available_projects(query)
        .await?;
    Ok(Json(ApiResponse::data(projects)))
}

async fn get_project(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(project_id): Path<String>,
    Query(query): Query<ProjectListQuery>,
) -> CtxResult<Json<ApiResponse<FreelancerProjectView>>> {
    let project = project_service(&state, &ctx)
        .freelancer_project(&project_id, query.freelancer_id.as_deref())
        .await?;
    Ok(Json(ApiResponse::data(project)))
}
