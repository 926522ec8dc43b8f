use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::error::GenerationError;
use super::model::{JobHandle, ModelRoute};
use crate::infrastructure::higgsfield::client::HiggsfieldClient;

/// Key paths that may hold the job-set id of a submission response, in lookup order.
pub const JOB_ID_PATHS: [&[&str]; 3] = [&["id"], &["data", "id"], &["job_set_id"]];

pub fn job_set_id(body: &Value) -> Option<String> {
    JOB_ID_PATHS.iter().find_map(|path| {
        let node = path.iter().try_fold(body, |node, key| node.get(*key))?;
        match node {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    })
}

pub fn job_handle(body: &Value) -> Result<JobHandle, GenerationError> {
    job_set_id(body).and_then(JobHandle::new).ok_or_else(|| {
        GenerationError::MalformedResponse("Upstream response did not include a job set id".to_string())
    })
}

/// Sends one generation request and returns the job handle to poll.
pub async fn submit<P>(
    client: &HiggsfieldClient,
    route: ModelRoute,
    params: &P,
) -> Result<JobHandle, GenerationError>
where
    P: Serialize + ?Sized,
{
    let body = client.submit(route.endpoint, params).await?;
    let handle = job_handle(&body)?;
    info!("Submitted {} job set {}", route.name, handle.job_set_id());
    Ok(handle)
}
