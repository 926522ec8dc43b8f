use axum::Router;
use axum::routing::{get, post};
use crate::state::AppState;

pub mod dto;
pub mod handler;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/minimax-t2v", post(handler::minimax_t2v))
        .route("/seedance-v1-lite-t2v", post(handler::seedance_v1_lite_t2v))
        .route("/generate", post(handler::generate_video))
        .route("/generate/bytes", post(handler::generate_video_bytes))
        .route("/jobs/{job_set_id}/wait-video", get(handler::wait_video))
}
