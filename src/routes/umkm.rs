use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::middleware::{ctx::Ctx, error::CtxResult, mw_ctx::CtxState};
use crate::models::{view::project::ClientProjectView, web::ApiResponse};
use crate::routes::project_service;
use crate::services::project_service::ProjectListQuery;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/umkm/projects", get(get_projects))
        .route("/api/umkm/projects/:project_id", get(get_project))
}

async fn get_projects(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Query(query): Query<ProjectListQuery>,
) -> CtxResult<Json<ApiResponse<Vec<ClientProjectView>>>> {
    let projects = project_service(&state, &ctx).client_projects(query).await?;
    Ok(Json(ApiResponse::data(projects)))
}

async fn get_project(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(project_id): Path<String>,
) -> CtxResult<Json<ApiResponse<ClientProjectView>>> {
    let project = project_service(&state, &ctx)
        .client_project(&project_id)
        .await?;
    Ok(Json(ApiResponse::data(project)))
}
