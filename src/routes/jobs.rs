use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::middleware::{ctx::Ctx, error::CtxResult, mw_ctx::CtxState};
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::{view::project::JobView, web::ApiResponse};
use crate::routes::project_service;
use crate::services::project_service::{JobInput, JobUpdateInput, ProjectListQuery};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/jobs", get(list_jobs).post(create_job))
        .route(
            "/api/jobs/:job_id",
            get(get_job).put(update_job).delete(delete_job),
        )
}

async fn create_job(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    JsonOrFormValidated(data): JsonOrFormValidated<JobInput>,
) -> CtxResult<(StatusCode, Json<ApiResponse<JobView>>)> {
    let job = project_service(&state, &ctx).create_job(data).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(job, "Job created")),
    ))
}

async fn list_jobs(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Query(query): Query<ProjectListQuery>,
) -> CtxResult<Json<ApiResponse<Vec<JobView>>>> {
    let jobs = project_service(&state, &ctx).list_jobs(query).await?;
    Ok(Json(ApiResponse::data(jobs)))
}

async fn get_job(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(job_id): Path<String>,
) -> CtxResult<Json<ApiResponse<JobView>>> {
    let job = project_service(&state, &ctx).get_job(&job_id).await?;
    Ok(Json(ApiResponse::data(job)))
}

async fn update_job(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(job_id): Path<String>,
    JsonOrFormValidated(data): JsonOrFormValidated<JobUpdateInput>,
) -> CtxResult<Json<ApiResponse<JobView>>> {
    let job = project_service(&state, &ctx)
        .update_job(&job_id, data)
        .await?;
    Ok(Json(ApiResponse::with_message(job, "Job updated")))
}

async fn delete_job(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(job_id): Path<String>,
) -> CtxResult<Json<ApiResponse<JobView>>> {
    let job = project_service(&state, &ctx).delete_job(&job_id).await?;
    Ok(Json(ApiResponse::with_message(job, "Job deleted")))
}
