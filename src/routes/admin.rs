use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::middleware::{ctx::Ctx, error::CtxResult, mw_ctx::CtxState};
use crate::models::view::{
    project::{AdminProjectView, ProjectStatsView},
    rating::RatingView,
};
use crate::models::web::ApiResponse;
use crate::routes::project_service;
use crate::services::project_service::ProjectListQuery;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/admin/projects", get(get_projects))
        .route("/api/admin/projects/stats", get(get_stats))
        .route("/api/admin/projects/:project_id", get(get_project))
        .route("/api/admin/ratings", get(get_ratings))
}

async fn get_projects(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Query(query): Query<ProjectListQuery>,
) -> CtxResult<Json<ApiResponse<Vec<AdminProjectView>>>> {
    let projects = project_service(&state, &ctx).admin_projects(query).await?;
    Ok(Json(ApiResponse::data(projects)))
}

async fn get_stats(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
) -> CtxResult<Json<ApiResponse<ProjectStatsView>>> {
    let stats = project_service(&state, &ctx).admin_stats().await?;
    Ok(Json(ApiResponse::data(stats)))
}

async fn get_project(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(project_id): Path<String>,
) -> CtxResult<Json<ApiResponse<AdminProjectView>>> {
    let project = project_service(&state, &ctx)
        .admin_project(&project_id)
        .await?;
    Ok(Json(ApiResponse::data(project)))
}

async fn get_ratings(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Query(query): Query<ProjectListQuery>,
) -> CtxResult<Json<ApiResponse<Vec<RatingView>>>> {
    let ratings = project_service(&state, &ctx).admin_ratings(query).await?;
    Ok(Json(ApiResponse::data(ratings)))
}
