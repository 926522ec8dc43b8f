use super::dto::{ImageToVideoParams, ImageToVideoRequest, POLL_DEFAULTS, WAN_25_FAST};
use crate::common::response::ApiResponse;
use crate::modules::generation::delivery::DeliveryMode;
use crate::modules::generation::dto::{GenerateQuery, ProcessingResponse, ReadyResponse, WaitQuery};
use crate::modules::generation::model::MediaKind;
use crate::modules::generation::service::GenerationService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

/// Start a WAN 2.5 Fast image-to-video job
/// Returns the job set payload containing the job_set_id
#[utoipa::path(
    post,
    path = "/image-to-video/wan-25-fast",
    request_body = ImageToVideoParams,
    responses(
        (status = 200, description = "Upstream job set"),
        (status = 400, description = "Bad Request", body = ApiResponse<String>),
        (status = 500, description = "Internal Server Error", body = ApiResponse<String>)
    ),
    tag = "Image to Video"
)]
pub async fn wan_25_fast(
    State(state): State<AppState>,
    Json(params): Json<ImageToVideoParams>,
) -> impl IntoResponse {
    match GenerationService::passthrough(&state, WAN_25_FAST, &params).await {
        Ok(job_set) => Json(job_set).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Generate a video from an image and wait for it
/// Streams the video unless `mode=json` or `mode=redirect`
#[utoipa::path(
    post,
    path = "/image-to-video/generate",
    params(GenerateQuery),
    request_body = ImageToVideoRequest,
    responses(
        (status = 200, description = "Video bytes or descriptor", body = ReadyResponse),
        (status = 202, description = "Still processing", body = ProcessingResponse),
        (status = 502, description = "Generation failed", body = ApiResponse<String>),
        (status = 500, description = "Internal Server Error", body = ApiResponse<String>)
    ),
    tag = "Image to Video"
)]
pub async fn generate_video(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
    Json(req): Json<ImageToVideoRequest>,
) -> impl IntoResponse {
    let settings = match query.poll_settings(POLL_DEFAULTS) {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };
    let mode = query.mode.unwrap_or(DeliveryMode::Bytes);

    match GenerationService::generate(&state, MediaKind::Video, req.model.route(), &req.params, settings, mode).await {
        Ok(res) => res,
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/image-to-video/generate/bytes",
    params(GenerateQuery),
    request_body = ImageToVideoRequest,
    responses(
        (status = 200, description = "Video bytes", body = Vec<u8>, content_type = "video/mp4"),
        (status = 202, description = "Still processing", body = ProcessingResponse),
        (status = 502, description = "Generation failed", body = ApiResponse<String>)
    ),
    tag = "Image to Video"
)]
pub async fn generate_video_bytes(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
    Json(req): Json<ImageToVideoRequest>,
) -> impl IntoResponse {
    let settings = match query.poll_settings(POLL_DEFAULTS) {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    match GenerationService::generate(&state, MediaKind::Video, req.model.route(), &req.params, settings, DeliveryMode::Bytes).await {
        Ok(res) => res,
        Err(e) => e.into_response(),
    }
}

/// Poll an existing job set, then redirect to the video
#[utoipa::path(
    get,
    path = "/image-to-video/jobs/{job_set_id}/wait-video",
    params(
        ("job_set_id" = String, Path, description = "Job set ID"),
        WaitQuery
    ),
    responses(
        (status = 307, description = "Redirect to the video"),
        (status = 202, description = "Still processing", body = ProcessingResponse),
        (status = 502, description = "Generation failed", body = ApiResponse<String>)
    ),
    tag = "Image to Video"
)]
pub async fn wait_video(
    State(state): State<AppState>,
    Path(job_set_id): Path<String>,
    Query(query): Query<WaitQuery>,
) -> impl IntoResponse {
    let settings = match query.poll_settings(POLL_DEFAULTS) {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    match GenerationService::wait_and_redirect(&state, MediaKind::Video, job_set_id, settings).await {
        Ok(res) => res,
        Err(e) => e.into_response(),
    }
}
