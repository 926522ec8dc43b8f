use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::generation::dto::{InputImage, PollDefaults};
use crate::modules::generation::model::ModelRoute;

pub const POLL_DEFAULTS: PollDefaults = PollDefaults {
    timeout_secs: 75.0,
    interval_secs: 2.0,
};

pub const NANO_BANANA: ModelRoute = ModelRoute {
    name: "nano-banana",
    endpoint: "/v1/text2image/nano-banana",
};

pub const SEEDREAM: ModelRoute = ModelRoute {
    name: "seedream",
    endpoint: "/v1/text2image/seedream",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub enum TextToImageModel {
    #[serde(rename = "nano-banana")]
    NanoBanana,
    #[serde(rename = "seedream")]
    Seedream,
}

impl TextToImageModel {
    pub fn route(&self) -> ModelRoute {
        match self {
            TextToImageModel::NanoBanana => NANO_BANANA,
            TextToImageModel::Seedream => SEEDREAM,
        }
    }
}

fn default_aspect_ratio() -> String {
    "4:3".to_string()
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TextToImageParams {
    /// Text prompt
    #[validate(length(min = 1, message = "prompt is required"))]
    pub prompt: String,
    /// e.g. "4:3", "1:1", "16:9"
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub input_images: Option<Vec<InputImage>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TextToImageRequest {
    pub model: TextToImageModel,
    pub params: TextToImageParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_fill_defaults_and_drop_unset_images() {
        let params: TextToImageParams = serde_json::from_value(json!({"prompt": "a red fox"})).unwrap();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"prompt": "a red fox", "aspect_ratio": "4:3"})
        );
    }

    #[test]
    fn test_unknown_model_rejected() {
        let bad = serde_json::from_value::<TextToImageRequest>(json!({
            "model": "dall-e",
            "params": {"prompt": "x"}
        }));
        assert!(bad.is_err());

        let ok: TextToImageRequest = serde_json::from_value(json!({
            "model": "seedream",
            "params": {"prompt": "x"}
        }))
        .unwrap();
        assert_eq!(ok.model.route(), SEEDREAM);
    }

    #[test]
    fn test_empty_prompt_and_bad_image_fail_validation() {
        let empty: TextToImageParams = serde_json::from_value(json!({"prompt": ""})).unwrap();
        assert!(empty.validate().is_err());

        let bad_image: TextToImageParams = serde_json::from_value(json!({
            "prompt": "x",
            "input_images": [{"type": "image_url", "image_url": "nope"}]
        }))
        .unwrap();
        assert!(bad_image.validate().is_err());
    }
}
