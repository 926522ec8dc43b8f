use axum::Router;
use axum::routing::{get, post};
use crate::state::AppState;

pub mod dto;
pub mod handler;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wan-25-fast", post(handler::wan_25_fast))
        .route("/generate", post(handler::generate_video))
        .route("/generate/bytes", post(handler::generate_video_bytes))
        .route("/jobs/{job_set_id}/wait-video", get(handler::wait_video))
}
