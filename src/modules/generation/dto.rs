use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::delivery::DeliveryMode;
use super::error::GenerationError;
use super::model::{MediaKind, PollSettings, ResolvedResult};

// --- REQUEST DTOs ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum InputImageType {
    #[default]
    #[serde(rename = "image_url")]
    ImageUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InputImage {
    /// Image source type. Only `image_url` is supported.
    #[serde(rename = "type", default)]
    pub kind: InputImageType,
    /// Publicly accessible image URL
    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenerateQuery {
    /// Total poll budget in seconds
    pub timeout: Option<f64>,
    /// Seconds between status polls
    pub interval: Option<f64>,
    /// How the finished result is delivered
    pub mode: Option<DeliveryMode>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WaitQuery {
    pub timeout: Option<f64>,
    pub interval: Option<f64>,
}

impl GenerateQuery {
    pub fn poll_settings(&self, defaults: PollDefaults) -> Result<PollSettings, GenerationError> {
        poll_settings(self.timeout, self.interval, defaults)
    }
}

impl WaitQuery {
    pub fn poll_settings(&self, defaults: PollDefaults) -> Result<PollSettings, GenerationError> {
        poll_settings(self.timeout, self.interval, defaults)
    }
}

/// Per-kind poll budget used when the caller does not pass one.
#[derive(Debug, Clone, Copy)]
pub struct PollDefaults {
    pub timeout_secs: f64,
    pub interval_secs: f64,
}

fn poll_settings(
    timeout: Option<f64>,
    interval: Option<f64>,
    defaults: PollDefaults,
) -> Result<PollSettings, GenerationError> {
    let timeout = timeout.unwrap_or(defaults.timeout_secs);
    let interval = interval.unwrap_or(defaults.interval_secs);

    if !timeout.is_finite() || timeout < 0.0 {
        return Err(GenerationError::InvalidRequest(
            "timeout must be a non-negative number of seconds".to_string(),
        ));
    }
    if !interval.is_finite() || interval <= 0.0 {
        return Err(GenerationError::InvalidRequest(
            "interval must be a positive number of seconds".to_string(),
        ));
    }

    let timeout = Duration::try_from_secs_f64(timeout)
        .map_err(|_| GenerationError::InvalidRequest("timeout is too large".to_string()))?;
    let interval = Duration::try_from_secs_f64(interval)
        .map_err(|_| GenerationError::InvalidRequest("interval is too large".to_string()))?;
    if interval.is_zero() {
        return Err(GenerationError::InvalidRequest(
            "interval must be a positive number of seconds".to_string(),
        ));
    }

    Ok(PollSettings::new(timeout, interval))
}

// --- RESPONSE DTOs ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadyResponse {
    pub status: String,
    pub model: String,
    pub job_set_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl ReadyResponse {
    pub fn new(model: &str, job_set_id: &str, result: &ResolvedResult) -> Self {
        let (image_url, video_url) = match result.kind {
            MediaKind::Image => (Some(result.url.clone()), None),
            MediaKind::Video => (None, Some(result.url.clone())),
        };

        Self {
            status: "ready".to_string(),
            model: model.to_string(),
            job_set_id: job_set_id.to_string(),
            image_url,
            video_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessingResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Pass this to the wait endpoint to resume polling
    pub job_set_id: String,
    pub detail: String,
}
