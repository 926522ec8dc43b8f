use super::dto::{TextToImageParams, TextToImageRequest, NANO_BANANA, POLL_DEFAULTS, SEEDREAM};
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

/// Submit a Nano Banana job and return the raw job set
#[utoipa::path(
    post,
    path = "/text-to-image/nano-banana",
    request_body = TextToImageParams,
    responses(
        (status = 200, description = "Upstream job set"),
        (status = 400, description = "Bad Request", body = ApiResponse<String>),
        (status = 500, description = "Internal Server Error", body = ApiResponse<String>)
    ),
    tag = "Text to Image"
)]
pub async fn nano_banana(
    State(state): State<AppState>,
    Json(params): Json<TextToImageParams>,
) -> impl IntoResponse {
    match GenerationService::passthrough(&state, NANO_BANANA, &params).await {
        Ok(job_set) => Json(job_set).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Submit a Seedream job and return the raw job set
#[utoipa::path(
    post,
    path = "/text-to-image/seedream",
    request_body = TextToImageParams,
    responses(
        (status = 200, description = "Upstream job set"),
        (status = 400, description = "Bad Request", body = ApiResponse<String>),
        (status = 500, description = "Internal Server Error", body = ApiResponse<String>)
    ),
    tag = "Text to Image"
)]
pub async fn seedream(
    State(state): State<AppState>,
    Json(params): Json<TextToImageParams>,
) -> impl IntoResponse {
    match GenerationService::passthrough(&state, SEEDREAM, &params).await {
        Ok(job_set) => Json(job_set).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Generate an image and wait for it
/// Returns the image URL as JSON unless `mode` asks for bytes or a redirect
#[utoipa::path(
    post,
    path = "/text-to-image/generate",
    params(GenerateQuery),
    request_body = TextToImageRequest,
    responses(
        (status = 200, description = "Image ready", body = ReadyResponse),
        (status = 202, description = "Still processing", body = ProcessingResponse),
        (status = 307, description = "Redirect to the image"),
        (status = 502, description = "Generation failed", body = ApiResponse<String>),
        (status = 500, description = "Internal Server Error", body = ApiResponse<String>)
    ),
    tag = "Text to Image"
)]
pub async fn generate_image(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
    Json(req): Json<TextToImageRequest>,
) -> impl IntoResponse {
    let settings = match query.poll_settings(POLL_DEFAULTS) {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };
    let mode = query.mode.unwrap_or(DeliveryMode::Json);

    match GenerationService::generate(&state, MediaKind::Image, req.model.route(), &req.params, settings, mode).await {
        Ok(res) => res,
        Err(e) => e.into_response(),
    }
}

/// Generate an image and stream its bytes
#[utoipa::path(
    post,
    path = "/text-to-image/generate/bytes",
    params(GenerateQuery),
    request_body = TextToImageRequest,
    responses(
        (status = 200, description = "Image bytes", body = Vec<u8>, content_type = "image/png"),
        (status = 202, description = "Still processing", body = ProcessingResponse),
        (status = 502, description = "Generation failed", body = ApiResponse<String>),
        (status = 500, description = "Internal Server Error", body = ApiResponse<String>)
    ),
    tag = "Text to Image"
)]
pub async fn generate_image_bytes(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
    Json(req): Json<TextToImageRequest>,
) -> impl IntoResponse {
    let settings = match query.poll_settings(POLL_DEFAULTS) {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    match GenerationService::generate(&state, MediaKind::Image, req.model.route(), &req.params, settings, DeliveryMode::Bytes).await {
        Ok(res) => res,
        Err(e) => e.into_response(),
    }
}

/// Poll an existing job set, then redirect to the image
#[utoipa::path(
    get,
    path = "/text-to-image/jobs/{job_set_id}/wait-image",
    params(
        ("job_set_id" = String, Path, description = "Job set ID"),
        WaitQuery
    ),
    responses(
        (status = 307, description = "Redirect to the image"),
        (status = 202, description = "Still processing", body = ProcessingResponse),
        (status = 502, description = "Generation failed", body = ApiResponse<String>)
    ),
    tag = "Text to Image"
)]
pub async fn wait_image(
    State(state): State<AppState>,
    Path(job_set_id): Path<String>,
    Query(query): Query<WaitQuery>,
) -> impl IntoResponse {
    let settings = match query.poll_settings(POLL_DEFAULTS) {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    match GenerationService::wait_and_redirect(&state, MediaKind::Image, job_set_id, settings).await {
        Ok(res) => res,
        Err(e) => e.into_response(),
    }
}
