use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::settings::AppConfig;
use crate::modules::generation::error::GenerationError;
use crate::modules::generation::model::{JobHandle, JobStatusSnapshot};
use crate::modules::generation::poller::JobStatusSource;

const API_KEY_HEADER: &str = "hf-api-key";
const API_SECRET_HEADER: &str = "hf-secret";

#[derive(Serialize)]
struct SubmitEnvelope<'a, P: ?Sized> {
    params: &'a P,
}

pub struct FetchedMedia {
    pub body: Bytes,
    pub content_type: Option<String>,
}

/// Shared, pooled client for the generation provider.
#[derive(Clone)]
pub struct HiggsfieldClient {
    http: Client,
    base_url: String,
    api_key_id: String,
    api_key_secret: String,
    submit_timeout: Duration,
    status_timeout: Duration,
    media_timeout: Duration,
}

impl HiggsfieldClient {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        info!("✅ Higgsfield client ready for {}", config.higgsfield_base_url);

        Ok(Self {
            http,
            base_url: config.higgsfield_base_url.clone(),
            api_key_id: config.higgsfield_api_key_id.clone(),
            api_key_secret: config.higgsfield_api_key_secret.clone(),
            submit_timeout: config.submit_timeout(),
            status_timeout: config.status_timeout(),
            media_timeout: config.media_timeout(),
        })
    }

    pub fn submit_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// `{base}/v1/job-sets/{id}`, with the id escaped as one path segment.
    pub fn job_set_url(&self, job_set_id: &str) -> Result<Url, GenerationError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| anyhow!("Invalid provider base URL {}: {}", self.base_url, e))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Provider base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(["v1", "job-sets", job_set_id]);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key_id)
            .header(API_SECRET_HEADER, &self.api_key_secret)
    }

    /// Posts `{"params": ...}` to a model endpoint and returns the raw job-set JSON.
    pub async fn submit<P>(&self, endpoint: &str, params: &P) -> Result<Value, GenerationError>
    where
        P: Serialize + ?Sized,
    {
        let url = self.submit_url(endpoint);
        debug!("POST {}", url);

        let response = self
            .authorized(self.http.post(&url))
            .timeout(self.submit_timeout)
            .json(&SubmitEnvelope { params })
            .send()
            .await?;

        Self::json_body(response).await
    }

    pub async fn job_set(&self, job_set_id: &str) -> Result<Value, GenerationError> {
        let response = self
            .authorized(self.http.get(self.job_set_url(job_set_id)?))
            .timeout(self.status_timeout)
            .send()
            .await?;

        Self::json_body(response).await
    }

    /// Downloads a resolved result. Credentials are not forwarded to result hosts.
    pub async fn fetch_media(&self, url: &str) -> Result<FetchedMedia, GenerationError> {
        let response = self.http.get(url).timeout(self.media_timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(GenerationError::Upstream { status, body });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        info!("Fetched {} bytes from {}", body.len(), url);
        Ok(FetchedMedia { body, content_type })
    }

    async fn json_body(response: Response) -> Result<Value, GenerationError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Upstream { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl JobStatusSource for HiggsfieldClient {
    async fn job_status(&self, handle: &JobHandle) -> Result<JobStatusSnapshot, GenerationError> {
        self.job_set(handle.job_set_id()).await.map(JobStatusSnapshot::new)
    }
}
