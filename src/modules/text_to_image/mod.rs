use axum::Router;
use axum::routing::{get, post};
use crate::state::AppState;

pub mod dto;
pub mod handler;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nano-banana", post(handler::nano_banana))
        .route("/seedream", post(handler::seedream))
        .route("/generate", post(handler::generate_image))
        .route("/generate/bytes", post(handler::generate_image_bytes))
        .route("/jobs/{job_set_id}/wait-image", get(handler::wait_image))
}
