use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::generation::dto::PollDefaults;
use crate::modules::generation::model::ModelRoute;

pub const POLL_DEFAULTS: PollDefaults = PollDefaults {
    timeout_secs: 180.0,
    interval_secs: 3.0,
};

pub const MINIMAX_T2V: ModelRoute = ModelRoute {
    name: "minimax-t2v",
    endpoint: "/generate/minimax-t2v",
};

pub const SEEDANCE_V1_LITE_T2V: ModelRoute = ModelRoute {
    name: "seedance-v1-lite-t2v",
    endpoint: "/generate/seedance-v1-lite-t2v",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub enum TextToVideoModel {
    #[serde(rename = "minimax-t2v")]
    MinimaxT2v,
    #[serde(rename = "seedance-v1-lite-t2v")]
    SeedanceV1LiteT2v,
}

impl TextToVideoModel {
    pub fn route(&self) -> ModelRoute {
        match self {
            TextToVideoModel::MinimaxT2v => MINIMAX_T2V,
            TextToVideoModel::SeedanceV1LiteT2v => SEEDANCE_V1_LITE_T2V,
        }
    }
}

fn default_duration() -> u32 {
    6
}

fn default_resolution() -> String {
    "768".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TextToVideoParams {
    #[validate(length(min = 1, message = "prompt is required"))]
    pub prompt: String,
    /// Clip length in seconds
    #[serde(default = "default_duration")]
    #[validate(range(min = 1, message = "duration must be at least one second"))]
    pub duration: u32,
    /// Video side length, e.g. "576", "720", "768"
    #[serde(default = "default_resolution")]
    pub resolution: String,
    // Provider spells it this way.
    #[serde(rename = "enable_prompt_optimizier", default = "default_true")]
    pub enable_prompt_optimizer: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TextToVideoRequest {
    pub model: TextToVideoModel,
    pub params: TextToVideoParams,
}
