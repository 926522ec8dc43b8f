use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::modules::generation::dto::{InputImage, PollDefaults};
use crate::modules::generation::model::ModelRoute;

pub const POLL_DEFAULTS: PollDefaults = PollDefaults {
    timeout_secs: 180.0,
    interval_secs: 3.0,
};

pub const WAN_25_FAST: ModelRoute = ModelRoute {
    name: "wan-25-fast",
    endpoint: "/generate/wan-25-fast",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub enum ImageToVideoModel {
    #[serde(rename = "wan-25-fast")]
    Wan25Fast,
}

impl ImageToVideoModel {
    pub fn route(&self) -> ModelRoute {
        match self {
            ImageToVideoModel::Wan25Fast => WAN_25_FAST,
        }
    }
}

fn default_duration() -> Number {
    Number::from(5)
}

// Kept as a JSON number so `5` goes upstream as `5`, not `5.0`.
fn positive_seconds(duration: &Number) -> Result<(), ValidationError> {
    match duration.as_f64() {
        Some(secs) if secs > 0.0 => Ok(()),
        _ => Err(ValidationError::new("range").with_message("duration must be positive".into())),
    }
}

fn default_resolution() -> String {
    "720p".to_string()
}

fn default_seed() -> i64 {
    -1
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ImageToVideoParams {
    #[validate(length(min = 1, message = "prompt is required"))]
    pub prompt: String,
    /// Video length in seconds
    #[serde(default = "default_duration")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "positive_seconds"))]
    pub duration: Number,
    /// e.g. "720p", "1080p"
    #[serde(default = "default_resolution")]
    pub resolution: String,
    /// Single driving image
    #[validate(nested)]
    pub input_image: InputImage,
    /// -1 picks a random seed
    #[serde(default = "default_seed")]
    pub seed: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "input_audio must be a valid URL"))]
    pub input_audio: Option<String>,
    #[serde(default)]
    pub enhance_prompt: bool,
    #[serde(default)]
    pub negative_prompt: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImageToVideoRequest {
    pub model: ImageToVideoModel,
    pub params: ImageToVideoParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_on_the_wire() {
        let params: ImageToVideoParams = serde_json::from_value(json!({
            "prompt": "waves",
            "input_image": {"image_url": "https://a/in.png"}
        }))
        .unwrap();
        assert!(params.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "prompt": "waves",
                "duration": 5,
                "resolution": "720p",
                "input_image": {"type": "image_url", "image_url": "https://a/in.png"},
                "seed": -1,
                "enhance_prompt": false,
                "negative_prompt": ""
            })
        );
    }

    #[test]
    fn test_duration_keeps_its_number_form() {
        let whole: ImageToVideoParams = serde_json::from_value(json!({
            "prompt": "waves",
            "duration": 8,
            "input_image": {"image_url": "https://a/in.png"}
        }))
        .unwrap();
        assert_eq!(serde_json::to_value(&whole).unwrap()["duration"], json!(8));

        let fractional: ImageToVideoParams = serde_json::from_value(json!({
            "prompt": "waves",
            "duration": 2.5,
            "input_image": {"image_url": "https://a/in.png"}
        }))
        .unwrap();
        assert_eq!(serde_json::to_value(&fractional).unwrap()["duration"], json!(2.5));
    }

    #[test]
    fn test_non_positive_duration_fails_validation() {
        for duration in [json!(0), json!(-1.5)] {
            let params: ImageToVideoParams = serde_json::from_value(json!({
                "prompt": "waves",
                "duration": duration,
                "input_image": {"image_url": "https://a/in.png"}
            }))
            .unwrap();
            assert!(params.validate().is_err());
        }
    }

    #[test]
    fn test_input_image_is_required() {
        let missing = serde_json::from_value::<ImageToVideoParams>(json!({"prompt": "waves"}));
        assert!(missing.is_err());
    }

    #[test]
    fn test_bad_audio_url_fails_validation() {
        let params: ImageToVideoParams = serde_json::from_value(json!({
            "prompt": "waves",
            "input_image": {"image_url": "https://a/in.png"},
            "input_audio": "not-a-url"
        }))
        .unwrap();
        assert!(params.validate().is_err());
    }
}
