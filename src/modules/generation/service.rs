use axum::response::Response;
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use super::delivery::{self, DeliveryMode};
use super::error::GenerationError;
use super::model::{JobHandle, MediaKind, ModelRoute, PollOutcome, PollSettings};
use super::poller::{self, TokioSleeper};
use super::submit;
use crate::state::AppState;

pub struct GenerationService;

impl GenerationService {
    fn validated<P: Validate>(params: &P) -> Result<(), GenerationError> {
        params
            .validate()
            .map_err(|e| GenerationError::InvalidRequest(e.to_string()))
    }

    /// Submit only; hands back the provider's job-set JSON untouched.
    pub async fn passthrough<P>(state: &AppState, route: ModelRoute, params: &P) -> Result<Value, GenerationError>
    where
        P: Serialize + Validate,
    {
        Self::validated(params)?;
        state.higgsfield.submit(route.endpoint, params).await
    }

    /// Submit, poll until resolved, then deliver in the requested mode.
    pub async fn generate<P>(
        state: &AppState,
        kind: MediaKind,
        route: ModelRoute,
        params: &P,
        settings: PollSettings,
        mode: DeliveryMode,
    ) -> Result<Response, GenerationError>
    where
        P: Serialize + Validate,
    {
        Self::validated(params)?;
        let client = &state.higgsfield;

        let handle = submit::submit(client, route, params).await?;
        match poller::resolve(client, &TokioSleeper, &handle, kind, settings).await? {
            PollOutcome::Ready(result) => delivery::deliver(client, mode, route.name, &handle, &result).await,
            PollOutcome::Pending => Ok(delivery::still_processing(Some(route.name), &handle, kind)),
        }
    }

    /// Resume polling an existing job set and redirect to its result.
    pub async fn wait_and_redirect(
        state: &AppState,
        kind: MediaKind,
        job_set_id: String,
        settings: PollSettings,
    ) -> Result<Response, GenerationError> {
        let handle = JobHandle::new(job_set_id)
            .ok_or_else(|| GenerationError::InvalidRequest("job_set_id must be a single non-empty path segment".to_string()))?;

        match poller::resolve(&state.higgsfield, &TokioSleeper, &handle, kind, settings).await? {
            PollOutcome::Ready(result) => Ok(delivery::redirect(&result)),
            PollOutcome::Pending => Ok(delivery::still_processing(None, &handle, kind)),
        }
    }
}
