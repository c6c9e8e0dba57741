use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::config::upload_limit_bytes;
use crate::middleware::{ctx::Ctx, error::CtxResult, mw_ctx::CtxState};
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::{project::JobView, rating::RatingView};
use crate::models::web::ApiResponse;
use crate::routes::project_service;
use crate::services::project_service::{
    AcceptInput, FeedbackInput, ProgressInput, RateInput, SubmitInput,
};

pub fn routes(upload_max_size_mb: u64) -> Router<Arc<CtxState>> {
    // base64 grows the payload by a third
    let max_bytes_val = (upload_limit_bytes(upload_max_size_mb) / 3)
        .saturating_mul(4)
        .saturating_add(64 * 1024);
    Router::new()
        .route("/api/projects/:project_id", patch(update_progress))
        .route("/api/projects/:project_id/accept", post(accept_project))
        .route(
            "/api/projects/:project_id/submit",
            post(submit_project).layer(DefaultBodyLimit::max(max_bytes_val)),
        )
        .route("/api/projects/:project_id/file", get(download_submission))
        .route("/api/projects/:project_id/cancel", post(cancel_project))
        .route("/api/projects/:project_id/rating", post(rate_project))
        .route("/api/projects/:project_id/feedback", post(project_feedback))
}

async fn accept_project(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(project_id): Path<String>,
    JsonOrFormValidated(data): JsonOrFormValidated<AcceptInput>,
) -> CtxResult<Json<ApiResponse<JobView>>> {
    let project = project_service(&state, &ctx)
        .accept(&project_id, data)
        .await?;
    Ok(Json(ApiResponse::with_message(
        JobView::from(&project),
        "Project accepted",
    )))
}

async fn update_progress(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(project_id): Path<String>,
    JsonOrFormValidated(data): JsonOrFormValidated<ProgressInput>,
) -> CtxResult<Json<ApiResponse<JobView>>> {
    let project = project_service(&state, &ctx)
        .update_progress(&project_id, data)
        .await?;
    Ok(Json(ApiResponse::with_message(
        JobView::from(&project),
        "Project updated",
    )))
}

async fn submit_project(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(project_id): Path<String>,
    JsonOrFormValidated(data): JsonOrFormValidated<SubmitInput>,
) -> CtxResult<Json<ApiResponse<JobView>>> {
    let project = project_service(&state, &ctx)
        .submit(&project_id, data)
        .await?;
    Ok(Json(ApiResponse::with_message(
        JobView::from(&project),
        "Project submitted",
    )))
}

async fn download_submission(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(project_id): Path<String>,
) -> CtxResult<Response> {
    let (file, file_name) = project_service(&state, &ctx)
        .get_submission_file(&project_id)
        .await?;
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        file.data,
    )
        .into_response())
}

async fn cancel_project(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(project_id): Path<String>,
) -> CtxResult<Json<ApiResponse<JobView>>> {
    let project = project_service(&state, &ctx).cancel(&project_id).await?;
    Ok(Json(ApiResponse::with_message(
        JobView::from(&project),
        "Project canceled",
    )))
}

async fn rate_project(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(project_id): Path<String>,
    JsonOrFormValidated(data): JsonOrFormValidated<RateInput>,
) -> CtxResult<Json<ApiResponse<RatingView>>> {
    let rating = project_service(&state, &ctx)
        .rate(&project_id, data)
        .await?;
    Ok(Json(ApiResponse::with_message(rating, "Rating saved")))
}

async fn project_feedback(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(project_id): Path<String>,
    JsonOrFormValidated(data): JsonOrFormValidated<FeedbackInput>,
) -> CtxResult<Json<ApiResponse<RatingView>>> {
    let rating = project_service(&state, &ctx)
        .feedback(&project_id, data)
        .await?;
    Ok(Json(ApiResponse::with_message(rating, "Feedback saved")))
}
